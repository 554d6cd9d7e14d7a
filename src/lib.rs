//! Vermin Hunt - a single-screen arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (avatar, vermin, spawning, shot resolution)
//! - `director`: Session lifecycle, input callbacks and tick scheduling
//! - `platform`: Timer and input abstractions the host drives
//! - `view`: The view-sink capability the core renders through
//! - `settings`: Data-driven game tuning

pub mod director;
pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod view;

pub use director::Director;
pub use error::SettingsError;
pub use settings::Settings;

use glam::DVec2;

/// Game configuration constants (default tuning)
pub mod consts {
    /// Simulation tick period in milliseconds
    pub const TICK_PERIOD_MS: u64 = 100;
    /// Maximum ticks run per `advance` call to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Field dimensions
    pub const FIELD_WIDTH: f64 = 800.0;
    pub const FIELD_HEIGHT: f64 = 600.0;

    /// Avatar defaults
    pub const AVATAR_SIZE: f64 = 40.0;
    pub const AVATAR_SPEED: f64 = 5.0;
    pub const AVATAR_LIVES: u32 = 1;

    /// Vermin defaults
    pub const VERMIN_SIZE: f64 = 20.0;
    pub const VERMIN_SPEED: f64 = 3.0;
    pub const VERMIN_LIVES: u32 = 1;

    /// Elapsed time of the first spawn after (re)start
    pub const FIRST_SPAWN_MS: u64 = 5000;

    /// Length of the feedback ray drawn for a missed shot
    pub const SHOT_MISS_LENGTH: f64 = 500.0;
    /// Delay before a drawn shot is cleared (and shooting re-enabled)
    pub const SHOT_CLEAR_DELAY_MS: u64 = 100;
}

/// Per-tick step of length `speed` along `angle`, floored to whole units.
///
/// Flooring happens per axis after scaling, so diagonal steps keep (roughly)
/// the same magnitude as axis-aligned ones. Negative components round away
/// from zero.
#[inline]
pub fn heading_step(angle: f64, speed: f64) -> DVec2 {
    DVec2::new((angle.cos() * speed).floor(), (angle.sin() * speed).floor())
}

/// Direction of travel toward `delta` (radians)
#[inline]
pub fn heading(delta: DVec2) -> f64 {
    delta.y.atan2(delta.x)
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    while angle >= PI {
        angle -= TAU;
    }
    while angle < -PI {
        angle += TAU;
    }
    angle
}
