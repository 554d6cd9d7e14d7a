//! View sink
//!
//! The simulation never renders. It reports what changed through
//! [`ViewSink`] and the host decides how to draw it (DOM nodes, a canvas,
//! a log, or nothing at all).

pub mod recording;

pub use recording::{RecordingView, ViewCommand};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::sim::GamePhase;

/// Identifies a positioned box (avatar or vermin) in the view
pub type EntityId = u32;
/// Identifies a drawn shot segment in the view
pub type SegmentId = u32;

/// What a positioned box represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Avatar,
    Vermin,
}

/// Rendering capability the core calls into.
///
/// Positions are field-local with the origin at the bottom-left corner and
/// refer to the box's bottom-left corner.
pub trait ViewSink {
    fn create_entity(&mut self, id: EntityId, kind: EntityKind, pos: DVec2, size: DVec2);
    fn update_entity(&mut self, id: EntityId, pos: DVec2);
    fn remove_entity(&mut self, id: EntityId);
    /// Draw a shot from `from` to `to`; the core clears it after `clear_after_ms`
    fn draw_segment(&mut self, id: SegmentId, from: DVec2, to: DVec2, clear_after_ms: u64);
    fn clear_segment(&mut self, id: SegmentId);
    fn show_score(&mut self, score: u32);
    fn show_phase(&mut self, phase: GamePhase);
}

/// Sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullView;

impl ViewSink for NullView {
    fn create_entity(&mut self, _id: EntityId, _kind: EntityKind, _pos: DVec2, _size: DVec2) {}
    fn update_entity(&mut self, _id: EntityId, _pos: DVec2) {}
    fn remove_entity(&mut self, _id: EntityId) {}
    fn draw_segment(&mut self, _id: SegmentId, _from: DVec2, _to: DVec2, _clear_after_ms: u64) {}
    fn clear_segment(&mut self, _id: SegmentId) {}
    fn show_score(&mut self, _score: u32) {}
    fn show_phase(&mut self, _phase: GamePhase) {}
}
