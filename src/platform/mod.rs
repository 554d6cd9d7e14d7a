//! Platform abstraction layer
//!
//! What the host feeds the core:
//! - Time/ticks (`time`)
//! - Input events (`input`)

pub mod input;
pub mod time;

pub use input::{Direction, apply_key};
pub use time::{FixedTicker, Timeouts};
