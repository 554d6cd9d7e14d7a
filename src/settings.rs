//! Game settings and tuning
//!
//! Every field has a default, so a settings file only needs the values it
//! overrides.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;
use crate::sim::SpawnPolicy;

/// Avatar tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarSettings {
    pub width: f64,
    pub height: f64,
    /// Displacement per tick
    pub speed: f64,
    pub lives: u32,
}

impl Default for AvatarSettings {
    fn default() -> Self {
        Self {
            width: AVATAR_SIZE,
            height: AVATAR_SIZE,
            speed: AVATAR_SPEED,
            lives: AVATAR_LIVES,
        }
    }
}

impl AvatarSettings {
    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }
}

/// Vermin tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerminSettings {
    pub width: f64,
    pub height: f64,
    /// Displacement per tick
    pub speed: f64,
    pub lives: u32,
}

impl Default for VerminSettings {
    fn default() -> Self {
        Self {
            width: VERMIN_SIZE,
            height: VERMIN_SIZE,
            speed: VERMIN_SPEED,
            lives: VERMIN_LIVES,
        }
    }
}

impl VerminSettings {
    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }
}

/// Spawn schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnSettings {
    pub policy: SpawnPolicy,
    /// Spawn deadline right after (re)start
    pub first_spawn_ms: u64,
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            policy: SpawnPolicy::default(),
            first_spawn_ms: FIRST_SPAWN_MS,
        }
    }
}

/// Shot feedback and rate limiting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotSettings {
    /// Length of the ray drawn when nothing was hit
    pub miss_length: f64,
    /// How long a drawn shot stays on screen
    pub clear_delay_ms: u64,
    /// Ignore clicks while a shot is still on screen
    pub cooldown: bool,
}

impl Default for ShotSettings {
    fn default() -> Self {
        Self {
            miss_length: SHOT_MISS_LENGTH,
            clear_delay_ms: SHOT_CLEAR_DELAY_MS,
            cooldown: true,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub field_width: f64,
    pub field_height: f64,
    /// Fixed tick interval
    pub tick_period_ms: u64,
    /// Cap on ticks caught up in a single `advance`
    pub max_substeps: u32,
    pub avatar: AvatarSettings,
    pub vermin: VerminSettings,
    pub spawn: SpawnSettings,
    pub shot: ShotSettings,
    /// RNG seed; the host picks one when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            tick_period_ms: TICK_PERIOD_MS,
            max_substeps: MAX_SUBSTEPS,
            avatar: AvatarSettings::default(),
            vermin: VerminSettings::default(),
            spawn: SpawnSettings::default(),
            shot: ShotSettings::default(),
            seed: None,
        }
    }
}

impl Settings {
    pub fn field_size(&self) -> DVec2 {
        DVec2::new(self.field_width, self.field_height)
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn invalid(field: &'static str, reason: &str) -> SettingsError {
            SettingsError::Invalid {
                field,
                reason: reason.to_string(),
            }
        }

        if self.tick_period_ms == 0 {
            return Err(invalid("tick_period_ms", "must be positive"));
        }
        if self.max_substeps == 0 {
            return Err(invalid("max_substeps", "must be positive"));
        }
        if !(self.avatar.width > 0.0 && self.avatar.height > 0.0) {
            return Err(invalid("avatar", "size must be positive"));
        }
        if !(self.vermin.width > 0.0 && self.vermin.height > 0.0) {
            return Err(invalid("vermin", "size must be positive"));
        }
        if !(self.avatar.speed > 0.0) {
            return Err(invalid("avatar.speed", "must be positive"));
        }
        if !(self.vermin.speed > 0.0) {
            return Err(invalid("vermin.speed", "must be positive"));
        }
        if self.avatar.lives == 0 {
            return Err(invalid("avatar.lives", "must be at least 1"));
        }
        if self.vermin.lives == 0 {
            return Err(invalid("vermin.lives", "must be at least 1"));
        }
        if !(self.field_width >= self.avatar.width && self.field_height >= self.avatar.height) {
            return Err(invalid("field", "must be at least as large as the avatar"));
        }
        self.spawn.policy.validate()?;
        Ok(())
    }
}
