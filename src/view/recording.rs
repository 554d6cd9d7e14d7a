//! A view sink that records every request it receives
//!
//! Used by tests and the headless harness (which can dump the stream as
//! JSON lines).

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::{EntityId, EntityKind, SegmentId, ViewSink};
use crate::sim::GamePhase;

/// One request made to the view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ViewCommand {
    CreateEntity {
        id: EntityId,
        kind: EntityKind,
        pos: DVec2,
        size: DVec2,
    },
    UpdateEntity {
        id: EntityId,
        pos: DVec2,
    },
    RemoveEntity {
        id: EntityId,
    },
    DrawSegment {
        id: SegmentId,
        from: DVec2,
        to: DVec2,
        clear_after_ms: u64,
    },
    ClearSegment {
        id: SegmentId,
    },
    Score {
        score: u32,
    },
    Phase {
        phase: GamePhase,
    },
}

/// Records [`ViewCommand`]s in call order
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    pub commands: Vec<ViewCommand>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take everything recorded so far
    pub fn drain(&mut self) -> Vec<ViewCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Ids of entities created and not yet removed, in creation order
    pub fn live_entities(&self) -> Vec<EntityId> {
        let mut live = Vec::new();
        for cmd in &self.commands {
            match *cmd {
                ViewCommand::CreateEntity { id, .. } => live.push(id),
                ViewCommand::RemoveEntity { id } => live.retain(|&e| e != id),
                _ => {}
            }
        }
        live
    }

    /// Last position reported for an entity
    pub fn last_position(&self, id: EntityId) -> Option<DVec2> {
        self.commands.iter().rev().find_map(|cmd| match *cmd {
            ViewCommand::CreateEntity { id: e, pos, .. } | ViewCommand::UpdateEntity { id: e, pos }
                if e == id =>
            {
                Some(pos)
            }
            _ => None,
        })
    }

    /// Last score pushed to the view
    pub fn last_score(&self) -> Option<u32> {
        self.commands.iter().rev().find_map(|cmd| match *cmd {
            ViewCommand::Score { score } => Some(score),
            _ => None,
        })
    }

    /// Every drawn segment as `(id, from, to)`
    pub fn segments(&self) -> Vec<(SegmentId, DVec2, DVec2)> {
        self.commands
            .iter()
            .filter_map(|cmd| match *cmd {
                ViewCommand::DrawSegment { id, from, to, .. } => Some((id, from, to)),
                _ => None,
            })
            .collect()
    }

    /// Serialize the stream as one JSON object per line
    pub fn to_json_lines(&self) -> Result<String, serde_json::Error> {
        let mut out = String::new();
        for cmd in &self.commands {
            out.push_str(&serde_json::to_string(cmd)?);
            out.push('\n');
        }
        Ok(out)
    }
}

impl ViewSink for RecordingView {
    fn create_entity(&mut self, id: EntityId, kind: EntityKind, pos: DVec2, size: DVec2) {
        self.commands.push(ViewCommand::CreateEntity { id, kind, pos, size });
    }

    fn update_entity(&mut self, id: EntityId, pos: DVec2) {
        self.commands.push(ViewCommand::UpdateEntity { id, pos });
    }

    fn remove_entity(&mut self, id: EntityId) {
        self.commands.push(ViewCommand::RemoveEntity { id });
    }

    fn draw_segment(&mut self, id: SegmentId, from: DVec2, to: DVec2, clear_after_ms: u64) {
        self.commands.push(ViewCommand::DrawSegment {
            id,
            from,
            to,
            clear_after_ms,
        });
    }

    fn clear_segment(&mut self, id: SegmentId) {
        self.commands.push(ViewCommand::ClearSegment { id });
    }

    fn show_score(&mut self, score: u32) {
        self.commands.push(ViewCommand::Score { score });
    }

    fn show_phase(&mut self, phase: GamePhase) {
        self.commands.push(ViewCommand::Phase { phase });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_entities_tracks_removal() {
        let mut view = RecordingView::new();
        view.create_entity(1, EntityKind::Avatar, DVec2::ZERO, DVec2::splat(40.0));
        view.create_entity(2, EntityKind::Vermin, DVec2::new(-20.0, 5.0), DVec2::splat(20.0));
        view.update_entity(2, DVec2::new(-17.0, 5.0));
        view.remove_entity(1);
        assert_eq!(view.live_entities(), vec![2]);
        assert_eq!(view.last_position(2), Some(DVec2::new(-17.0, 5.0)));
        assert_eq!(view.last_position(1), Some(DVec2::ZERO));
    }

    #[test]
    fn test_json_lines() {
        let mut view = RecordingView::new();
        view.show_score(3);
        view.clear_segment(9);
        let text = view.to_json_lines().unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], r#"{"op":"score","score":3}"#);
        assert_eq!(lines[1], r#"{"op":"clear_segment","id":9}"#);
    }
}
