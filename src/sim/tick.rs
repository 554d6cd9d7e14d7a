//! Fixed-interval simulation tick and shot resolution
//!
//! Within a tick the order is fixed: advance the clock, spawn if due, move
//! every vermin (which may bite the avatar), then move the avatar. The
//! caller checks for death afterwards, so a bite lands in the same tick.

use glam::DVec2;

use super::collision::miss_endpoint;
use super::state::{GamePhase, GameState};
use super::vermin::{Vermin, VerminStep};
use crate::settings::Settings;
use crate::view::{EntityId, ViewSink};

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Vermin spawned this tick
    pub spawned: Option<EntityId>,
    /// Number of bites the avatar took
    pub bites: u32,
    /// Whether the avatar moved
    pub avatar_moved: bool,
    /// Avatar has no lives left
    pub avatar_dead: bool,
}

/// Advance the session by one fixed tick
///
/// No-op outside `Running` or without an avatar.
pub fn tick<V: ViewSink + ?Sized>(
    state: &mut GameState,
    settings: &Settings,
    view: &mut V,
) -> TickReport {
    let mut report = TickReport::default();
    if state.phase != GamePhase::Running || state.avatar.is_none() {
        return report;
    }

    state.elapsed_ms += settings.tick_period_ms;

    if state.elapsed_ms >= state.spawn_deadline_ms {
        let id = state.next_entity_id();
        let vermin = Vermin::spawn(id, &settings.vermin, settings.field_size(), &mut state.rng);
        vermin.show(view);
        state.vermin.push(vermin);
        state.spawn_deadline_ms = settings
            .spawn
            .policy
            .next_deadline(state.elapsed_ms, &mut state.rng);
        report.spawned = Some(id);
    }

    let Some(avatar) = state.avatar.as_mut() else {
        return report;
    };

    for vermin in state.vermin.iter_mut() {
        if vermin.advance(avatar, view) == VerminStep::Bit {
            report.bites += 1;
        }
    }

    report.avatar_moved = avatar.advance(&state.input, view);
    report.avatar_dead = avatar.is_dead();
    report
}

/// Result of a resolved shot
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShotOutcome {
    /// A vermin was hit at `point`; `killed` if it lost its last life
    Hit {
        vermin: EntityId,
        point: DVec2,
        killed: bool,
    },
    /// Nothing was hit; the shot runs on to `end`
    Miss { end: DVec2 },
}

impl ShotOutcome {
    /// Where the drawn shot stops
    pub fn endpoint(&self) -> DVec2 {
        match *self {
            ShotOutcome::Hit { point, .. } => point,
            ShotOutcome::Miss { end } => end,
        }
    }
}

/// Resolve a shot from the avatar centre toward `aim` against the live vermin
///
/// Vermin are tested in spawn order and the first hit stops the search. A
/// killed vermin is removed from the session and the view and scores a
/// point. Returns `None` outside `Running` or without an avatar.
pub fn resolve_shot<V: ViewSink + ?Sized>(
    state: &mut GameState,
    settings: &Settings,
    aim: DVec2,
    view: &mut V,
) -> Option<(DVec2, ShotOutcome)> {
    if state.phase != GamePhase::Running {
        return None;
    }
    let origin = state.avatar.as_ref()?.center();

    let hit = state
        .vermin
        .iter_mut()
        .enumerate()
        .find_map(|(index, vermin)| vermin.is_hit(origin, aim).map(|point| (index, point)));

    let outcome = match hit {
        Some((index, point)) => {
            let vermin = &state.vermin[index];
            let (id, lives) = (vermin.id, vermin.lives);
            let killed = vermin.is_dead();
            if killed {
                state.vermin.remove(index);
                view.remove_entity(id);
                state.score += 1;
                view.show_score(state.score);
                log::debug!("Vermin {} killed, score {}", id, state.score);
            } else {
                log::debug!("Vermin {} hit ({} lives left)", id, lives);
            }
            ShotOutcome::Hit {
                vermin: id,
                point,
                killed,
            }
        }
        None => ShotOutcome::Miss {
            end: miss_endpoint(origin, aim, settings.shot.miss_length),
        },
    };

    Some((origin, outcome))
}
