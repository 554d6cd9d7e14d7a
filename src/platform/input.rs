//! Keyboard mapping
//!
//! Each direction answers to its arrow key and a WASD letter.

use crate::sim::DirectionalInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Map a DOM-style key name to a direction
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" => Some(Direction::Up),
            "ArrowDown" | "s" => Some(Direction::Down),
            "ArrowLeft" | "a" => Some(Direction::Left),
            "ArrowRight" | "d" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Set or clear the flag a key controls. Returns false for unmapped keys.
pub fn apply_key(input: &mut DirectionalInput, key: &str, held: bool) -> bool {
    let Some(direction) = Direction::from_key(key) else {
        return false;
    };
    let flag = match direction {
        Direction::Up => &mut input.up,
        Direction::Down => &mut input.down,
        Direction::Left => &mut input.left,
        Direction::Right => &mut input.right,
    };
    *flag = held;
    true
}
