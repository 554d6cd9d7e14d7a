//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering beyond calls into a `ViewSink`

pub mod avatar;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod vermin;

pub use avatar::Avatar;
pub use collision::{miss_endpoint, ray_circle_hit};
pub use spawn::SpawnPolicy;
pub use state::{DirectionalInput, GamePhase, GameState};
pub use tick::{ShotOutcome, TickReport, resolve_shot, tick};
pub use vermin::{SpawnEdge, Vermin, VerminStep};
