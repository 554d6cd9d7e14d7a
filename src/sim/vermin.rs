//! Vermin: hostile boxes that spawn at the field edges and close in on the avatar

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::avatar::Avatar;
use super::collision::ray_circle_hit;
use crate::settings::VerminSettings;
use crate::view::{EntityId, EntityKind, ViewSink};
use crate::{heading, heading_step};

/// Field edge a vermin enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnEdge {
    Left,
    Right,
    Bottom,
    Top,
}

impl SpawnEdge {
    /// Map a uniform draw in `[0, 1)` to an edge, one quartile each
    pub fn from_draw(u: f64) -> Self {
        if u < 0.25 {
            SpawnEdge::Left
        } else if u < 0.5 {
            SpawnEdge::Right
        } else if u < 0.75 {
            SpawnEdge::Bottom
        } else {
            SpawnEdge::Top
        }
    }

    /// Bottom-left corner for a box of `size` entering from this edge.
    ///
    /// `along` in `[0, 1)` picks the coordinate along the edge. Boxes start
    /// just outside the left and bottom edges and on the right and top ones.
    pub fn position(self, along: f64, field: DVec2, size: DVec2) -> DVec2 {
        match self {
            SpawnEdge::Left => DVec2::new(-size.x, (along * field.y).floor()),
            SpawnEdge::Right => DVec2::new(field.x, (along * field.y).floor()),
            SpawnEdge::Bottom => DVec2::new((along * field.x).floor(), -size.y),
            SpawnEdge::Top => DVec2::new((along * field.x).floor(), field.y),
        }
    }
}

/// Outcome of one vermin movement step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerminStep {
    /// Moved toward the avatar
    Moved,
    /// Reached the avatar and damaged it instead of moving
    Bit,
}

/// A spawned hostile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vermin {
    pub id: EntityId,
    /// Bottom-left corner
    pub pos: DVec2,
    pub size: DVec2,
    /// Displacement per tick
    pub speed: f64,
    pub lives: u32,
}

impl Vermin {
    pub fn new(id: EntityId, tuning: &VerminSettings, pos: DVec2) -> Self {
        Self {
            id,
            pos,
            size: tuning.size(),
            speed: tuning.speed,
            lives: tuning.lives,
        }
    }

    /// Spawn at a random edge of the field
    pub fn spawn<R: Rng>(
        id: EntityId,
        tuning: &VerminSettings,
        field: DVec2,
        rng: &mut R,
    ) -> Self {
        let edge = SpawnEdge::from_draw(rng.random());
        let pos = edge.position(rng.random(), field, tuning.size());
        log::debug!("Vermin {} spawned on {:?} edge at {}", id, edge, pos);
        Self::new(id, tuning, pos)
    }

    /// Register the vermin's box with the view
    pub fn show<V: ViewSink + ?Sized>(&self, view: &mut V) {
        view.create_entity(self.id, EntityKind::Vermin, self.pos, self.size);
    }

    pub fn center(&self) -> DVec2 {
        self.pos + self.size / 2.0
    }

    /// Radius used by shot hit-tests
    pub fn radius(&self) -> f64 {
        self.size.x / 2.0
    }

    /// Whether this vermin is close enough to bite the avatar.
    ///
    /// Axis-aligned box test from the vermin's corner to the avatar's centre.
    pub fn touches(&self, avatar: &Avatar) -> bool {
        let diff = avatar.center() - self.pos;
        diff.x.abs() <= avatar.size.x / 2.0 && diff.y.abs() <= avatar.size.y / 2.0
    }

    /// Close in on the avatar by one tick, or bite it when in reach
    pub fn advance<V: ViewSink + ?Sized>(&mut self, avatar: &mut Avatar, view: &mut V) -> VerminStep {
        if self.touches(avatar) {
            avatar.lose_life();
            log::debug!("Vermin {} bit the avatar ({} lives left)", self.id, avatar.lives);
            return VerminStep::Bit;
        }
        let diff = avatar.center() - self.pos;
        self.pos += heading_step(heading(diff), self.speed);
        view.update_entity(self.id, self.pos);
        VerminStep::Moved
    }

    /// Test a shot from `origin` toward `aim`; a hit costs one life.
    ///
    /// Returns the impact point on a hit.
    pub fn is_hit(&mut self, origin: DVec2, aim: DVec2) -> Option<DVec2> {
        let point = ray_circle_hit(origin, aim, self.center(), self.radius())?;
        self.lives = self.lives.saturating_sub(1);
        Some(point)
    }

    pub fn is_dead(&self) -> bool {
        self.lives == 0
    }
}
