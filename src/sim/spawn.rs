//! Spawn scheduling
//!
//! Maps elapsed active time to the next spawn deadline. The gap until the
//! next spawn is a uniform draw over `(0, max_gap]`, rounded up to whole
//! milliseconds; the policy decides how `max_gap` evolves over a run.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Largest configurable spawn gap (one hour)
pub const MAX_SPAWN_GAP_MS: f64 = 3_600_000.0;

/// How the maximum spawn gap evolves with elapsed time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpawnPolicy {
    /// Gap bound never changes
    Constant { max_gap_ms: f64 },
    /// Gap bound decays exponentially from `start_gap_ms` toward `floor_gap_ms`
    /// with time constant `ramp_ms`
    Ramped {
        start_gap_ms: f64,
        floor_gap_ms: f64,
        ramp_ms: f64,
    },
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        SpawnPolicy::Ramped {
            start_gap_ms: 5000.0,
            floor_gap_ms: 500.0,
            ramp_ms: 10000.0,
        }
    }
}

impl SpawnPolicy {
    /// Classic constant-bound schedule (gaps up to 10 seconds)
    pub fn constant() -> Self {
        SpawnPolicy::Constant { max_gap_ms: 10000.0 }
    }

    /// Upper bound of the next spawn gap at `elapsed_ms`
    pub fn max_gap(&self, elapsed_ms: u64) -> f64 {
        match *self {
            SpawnPolicy::Constant { max_gap_ms } => max_gap_ms,
            SpawnPolicy::Ramped {
                start_gap_ms,
                floor_gap_ms,
                ramp_ms,
            } => {
                let ramp = 1.0 - (-(elapsed_ms as f64) / ramp_ms).exp();
                start_gap_ms - (start_gap_ms - floor_gap_ms) * ramp
            }
        }
    }

    /// Deadline for a uniform draw `u` in `[0, 1)`
    pub fn deadline_for_draw(&self, elapsed_ms: u64, u: f64) -> u64 {
        let gap = (u * self.max_gap(elapsed_ms)).ceil().max(0.0);
        elapsed_ms.saturating_add(gap as u64)
    }

    /// Draw the next spawn deadline
    pub fn next_deadline<R: Rng>(&self, elapsed_ms: u64, rng: &mut R) -> u64 {
        let u: f64 = rng.random();
        self.deadline_for_draw(elapsed_ms, u)
    }

    pub(crate) fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |reason: &str| SettingsError::Invalid {
            field: "spawn.policy",
            reason: reason.to_string(),
        };
        match *self {
            SpawnPolicy::Constant { max_gap_ms } => {
                if !gap_in_range(max_gap_ms) {
                    return Err(invalid("max_gap_ms must be within [0, 3600000]"));
                }
            }
            SpawnPolicy::Ramped {
                start_gap_ms,
                floor_gap_ms,
                ramp_ms,
            } => {
                if !(gap_in_range(start_gap_ms) && gap_in_range(floor_gap_ms)) {
                    return Err(invalid("gaps must be within [0, 3600000]"));
                }
                if start_gap_ms < floor_gap_ms {
                    return Err(invalid("need 0 <= floor_gap_ms <= start_gap_ms"));
                }
                if !(ramp_ms > 0.0 && ramp_ms.is_finite()) {
                    return Err(invalid("ramp_ms must be positive and finite"));
                }
            }
        }
        Ok(())
    }
}

fn gap_in_range(gap_ms: f64) -> bool {
    (0.0..=MAX_SPAWN_GAP_MS).contains(&gap_ms)
}
