//! Game session state
//!
//! Everything one run needs: lifecycle phase, score, clocks, held
//! directions, the avatar and the live vermin. Serializable so a host can
//! snapshot a run.

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::avatar::Avatar;
use super::vermin::Vermin;
use crate::settings::Settings;
use crate::view::{EntityId, ViewSink};

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Nothing started yet, no entities
    Start,
    /// Ticks running, input accepted
    Running,
    /// Run over; entities cleared from the view
    End,
}

/// Which directions are currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionalInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionalInput {
    /// Raw heading vector; opposite directions cancel
    pub fn vector(&self) -> DVec2 {
        let mut v = DVec2::ZERO;
        if self.left {
            v.x -= 1.0;
        }
        if self.right {
            v.x += 1.0;
        }
        if self.up {
            v.y += 1.0;
        }
        if self.down {
            v.y -= 1.0;
        }
        v
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Complete session state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u32,
    /// Active time of the current run
    pub elapsed_ms: u64,
    /// Elapsed time at which the next vermin spawns
    pub spawn_deadline_ms: u64,
    pub input: DirectionalInput,
    /// Absent until the first run starts
    pub avatar: Option<Avatar>,
    /// Live vermin in spawn order
    pub vermin: Vec<Vermin>,
    /// Next entity/segment ID
    next_id: u32,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Start,
            score: 0,
            elapsed_ms: 0,
            spawn_deadline_ms: 0,
            input: DirectionalInput::default(),
            avatar: None,
            vermin: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Reset run data and place a fresh avatar
    pub fn begin_run<V: ViewSink + ?Sized>(&mut self, settings: &Settings, view: &mut V) {
        self.score = 0;
        self.elapsed_ms = 0;
        self.spawn_deadline_ms = settings.spawn.first_spawn_ms;
        self.vermin.clear();

        let id = self.next_entity_id();
        let avatar = Avatar::new(id, &settings.avatar, settings.field_size());
        avatar.show(view);
        self.avatar = Some(avatar);
    }

    /// Remove every entity from the view (state is kept for inspection)
    pub fn clear_view<V: ViewSink + ?Sized>(&self, view: &mut V) {
        for vermin in &self.vermin {
            view.remove_entity(vermin.id);
        }
        if let Some(avatar) = &self.avatar {
            view.remove_entity(avatar.id);
        }
    }

    pub fn avatar_dead(&self) -> bool {
        self.avatar.as_ref().is_some_and(Avatar::is_dead)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{EntityKind, RecordingView, ViewCommand};

    #[test]
    fn test_input_vector() {
        let mut input = DirectionalInput::default();
        assert_eq!(input.vector(), DVec2::ZERO);
        input.up = true;
        input.right = true;
        assert_eq!(input.vector(), DVec2::new(1.0, 1.0));
        input.left = true;
        assert_eq!(input.vector(), DVec2::new(0.0, 1.0));
        input.down = true;
        assert_eq!(input.vector(), DVec2::ZERO);
        input.clear();
        assert_eq!(input, DirectionalInput::default());
    }

    #[test]
    fn test_new_state_has_no_avatar() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Start);
        assert!(state.avatar.is_none());
        assert!(!state.avatar_dead());
    }

    #[test]
    fn test_begin_run_places_avatar() {
        let mut state = GameState::new(1);
        let mut view = RecordingView::new();
        state.score = 12;
        state.elapsed_ms = 9000;
        state.begin_run(&Settings::default(), &mut view);
        assert_eq!(state.score, 0);
        assert_eq!(state.elapsed_ms, 0);
        assert_eq!(state.spawn_deadline_ms, 5000);
        let avatar = state.avatar.as_ref().unwrap();
        assert_eq!(avatar.pos, DVec2::new(400.0, 300.0));
        assert_eq!(
            view.commands,
            vec![ViewCommand::CreateEntity {
                id: avatar.id,
                kind: EntityKind::Avatar,
                pos: DVec2::new(400.0, 300.0),
                size: DVec2::splat(40.0),
            }]
        );
    }

    #[test]
    fn test_ids_are_unique() {
        let mut state = GameState::new(1);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
    }
}
