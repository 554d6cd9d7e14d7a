//! The player-controlled avatar

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::state::DirectionalInput;
use crate::settings::AvatarSettings;
use crate::view::{EntityId, EntityKind, ViewSink};
use crate::{heading, heading_step};

/// The player's box on the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    pub id: EntityId,
    /// Bottom-left corner
    pub pos: DVec2,
    pub size: DVec2,
    /// Displacement per tick
    pub speed: f64,
    pub lives: u32,
    /// Field dimensions, for clamping
    field: DVec2,
}

impl Avatar {
    /// Create an avatar in the middle of the field
    pub fn new(id: EntityId, tuning: &AvatarSettings, field: DVec2) -> Self {
        Self {
            id,
            pos: (field / 2.0).floor(),
            size: tuning.size(),
            speed: tuning.speed,
            lives: tuning.lives,
            field,
        }
    }

    /// Register the avatar's box with the view
    pub fn show<V: ViewSink + ?Sized>(&self, view: &mut V) {
        view.create_entity(self.id, EntityKind::Avatar, self.pos, self.size);
    }

    pub fn center(&self) -> DVec2 {
        self.pos + self.size / 2.0
    }

    /// Largest allowed bottom-left corner
    pub fn max_pos(&self) -> DVec2 {
        (self.field - self.size).max(DVec2::ZERO)
    }

    /// Position after one tick of `input`, or `None` if it produces no heading
    pub fn step(&self, input: &DirectionalInput) -> Option<DVec2> {
        let raw = input.vector();
        if raw == DVec2::ZERO {
            return None;
        }
        let next = self.pos + heading_step(heading(raw), self.speed);
        Some(next.clamp(DVec2::ZERO, self.max_pos()))
    }

    /// Move one tick according to the held directions
    ///
    /// Returns true if a new position was reported to the view.
    pub fn advance<V: ViewSink + ?Sized>(&mut self, input: &DirectionalInput, view: &mut V) -> bool {
        match self.step(input) {
            Some(next) => {
                self.pos = next;
                view.update_entity(self.id, self.pos);
                true
            }
            None => false,
        }
    }

    /// Take one point of damage (never below zero)
    pub fn lose_life(&mut self) {
        if self.lives == 0 {
            log::warn!("Avatar {} took damage with no lives left", self.id);
        }
        self.lives = self.lives.saturating_sub(1);
    }

    pub fn is_dead(&self) -> bool {
        self.lives == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{NullView, RecordingView, ViewCommand};
    use proptest::prelude::*;

    fn avatar() -> Avatar {
        Avatar::new(1, &AvatarSettings::default(), DVec2::new(800.0, 600.0))
    }

    fn input(up: bool, down: bool, left: bool, right: bool) -> DirectionalInput {
        DirectionalInput {
            up,
            down,
            left,
            right,
        }
    }

    #[test]
    fn test_starts_centered() {
        let a = Avatar::new(1, &AvatarSettings::default(), DVec2::new(801.0, 599.0));
        assert_eq!(a.pos, DVec2::new(400.0, 299.0));
        assert_eq!(a.lives, 1);
        assert_eq!(a.center(), DVec2::new(420.0, 319.0));
    }

    #[test]
    fn test_axis_moves() {
        let mut a = avatar();
        let start = a.pos;
        a.advance(&input(true, false, false, false), &mut NullView);
        assert_eq!(a.pos, start + DVec2::new(0.0, 5.0));
        a.advance(&input(false, false, true, false), &mut NullView);
        assert_eq!(a.pos, start + DVec2::new(-5.0, 5.0));
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let mut a = avatar();
        let start = a.pos;
        a.advance(&input(true, false, false, true), &mut NullView);
        assert_eq!(a.pos - start, DVec2::new(3.0, 3.0));

        let mut a = avatar();
        a.advance(&input(false, true, true, false), &mut NullView);
        assert_eq!(a.pos - start, DVec2::new(-4.0, -4.0));
    }

    #[test]
    fn test_no_input_is_silent() {
        let mut a = avatar();
        let mut view = RecordingView::new();
        assert!(!a.advance(&DirectionalInput::default(), &mut view));
        assert!(!a.advance(&input(true, true, true, true), &mut view));
        assert!(!a.advance(&input(true, true, false, false), &mut view));
        assert!(view.commands.is_empty());
    }

    #[test]
    fn test_move_reports_position() {
        let mut a = avatar();
        let mut view = RecordingView::new();
        a.advance(&input(false, false, false, true), &mut view);
        assert_eq!(
            view.commands,
            vec![ViewCommand::UpdateEntity {
                id: 1,
                pos: DVec2::new(405.0, 300.0)
            }]
        );
    }

    #[test]
    fn test_clamps_to_field() {
        let mut a = avatar();
        a.pos = DVec2::new(2.0, 758.0 - 200.0);
        a.advance(&input(false, false, true, false), &mut NullView);
        assert_eq!(a.pos.x, 0.0);
        a.pos = DVec2::new(758.0, 558.0);
        a.advance(&input(true, false, false, true), &mut NullView);
        assert_eq!(a.pos, DVec2::new(760.0, 560.0));
    }

    #[test]
    fn test_lose_life_saturates() {
        let mut a = avatar();
        assert!(!a.is_dead());
        a.lose_life();
        assert!(a.is_dead());
        a.lose_life();
        assert_eq!(a.lives, 0);
        assert!(a.is_dead());
    }

    #[test]
    fn test_all_flag_combinations_have_unit_magnitude() {
        for bits in 0u8..16 {
            let held = input(bits & 1 != 0, bits & 2 != 0, bits & 4 != 0, bits & 8 != 0);
            let a = avatar();
            let delta = a.step(&held).map(|p| p - a.pos).unwrap_or(DVec2::ZERO);
            if held.vector() == DVec2::ZERO {
                assert_eq!(delta, DVec2::ZERO, "flags {:04b}", bits);
            } else {
                assert!(
                    (delta.length() - a.speed).abs() <= std::f64::consts::SQRT_2,
                    "flags {:04b} moved {}",
                    bits,
                    delta.length()
                );
            }
        }
    }

    proptest! {
        #[test]
        fn stays_inside_field(
            moves in prop::collection::vec(0u8..16, 0..300),
            speed in 1.0f64..60.0,
        ) {
            let tuning = AvatarSettings { speed, ..AvatarSettings::default() };
            let mut a = Avatar::new(1, &tuning, DVec2::new(300.0, 200.0));
            for bits in moves {
                let held = input(bits & 1 != 0, bits & 2 != 0, bits & 4 != 0, bits & 8 != 0);
                a.advance(&held, &mut NullView);
                prop_assert!(a.pos.x >= 0.0 && a.pos.x <= 260.0);
                prop_assert!(a.pos.y >= 0.0 && a.pos.y <= 160.0);
            }
        }

        #[test]
        fn diagonal_never_doubles(speed in 1.0f64..200.0, bits in 1u8..16) {
            let held = input(bits & 1 != 0, bits & 2 != 0, bits & 4 != 0, bits & 8 != 0);
            let tuning = AvatarSettings { speed, ..AvatarSettings::default() };
            let a = Avatar::new(1, &tuning, DVec2::new(10_000.0, 10_000.0));
            if let Some(next) = a.step(&held) {
                let moved = (next - a.pos).length();
                prop_assert!((moved - speed).abs() <= std::f64::consts::SQRT_2);
            }
        }
    }
}
