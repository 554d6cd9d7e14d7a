//! Shot geometry
//!
//! A shot is a ray from the shooter through the aimed point. Targets are
//! circles; a hit is reported at the foot of the perpendicular dropped from
//! the target centre onto the ray, which is where the drawn shot stops.

use glam::DVec2;
use std::f64::consts::FRAC_PI_2;

use crate::{heading, normalize_angle};

/// Check whether the ray from `origin` toward `aim` passes within `radius`
/// of `center`, ahead of the shooter.
///
/// Returns the impact point (foot of the perpendicular) on a hit.
pub fn ray_circle_hit(origin: DVec2, aim: DVec2, center: DVec2, radius: f64) -> Option<DVec2> {
    let angle_of_shot = heading(aim - origin);
    let angle_of_target = heading(center - origin);
    // Wrapped into [-π, π) rather than compared raw, so a target straight
    // ahead across the ±π seam still counts as in front of the shooter
    let angle_diff = normalize_angle(angle_of_shot - angle_of_target);

    // Target is beside or behind the shooter
    if angle_diff.abs() >= FRAC_PI_2 {
        return None;
    }

    let distance_to_target = (center - origin).length();
    let distance_on_line = angle_diff.cos() * distance_to_target;
    let foot = origin + distance_on_line * DVec2::new(angle_of_shot.cos(), angle_of_shot.sin());

    if (foot - center).length() < radius {
        Some(foot)
    } else {
        None
    }
}

/// End point of a shot that hit nothing: `length` units along the aim
pub fn miss_endpoint(origin: DVec2, aim: DVec2, length: f64) -> DVec2 {
    let angle = heading(aim - origin);
    origin + length * DVec2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: DVec2, b: DVec2) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn test_hit_on_ray() {
        let hit = ray_circle_hit(DVec2::ZERO, DVec2::new(100.0, 0.0), DVec2::new(50.0, 0.0), 10.0);
        assert!(close(hit.unwrap(), DVec2::new(50.0, 0.0)));
    }

    #[test]
    fn test_miss_perpendicular() {
        let hit = ray_circle_hit(DVec2::ZERO, DVec2::new(100.0, 0.0), DVec2::new(50.0, 100.0), 10.0);
        assert!(hit.is_none());
    }

    #[test]
    fn test_beyond_aim_point_still_hits() {
        // The ray is unbounded; the click only gives the direction
        let hit = ray_circle_hit(DVec2::ZERO, DVec2::new(10.0, 0.0), DVec2::new(300.0, 4.0), 10.0);
        assert!(close(hit.unwrap(), DVec2::new(300.0, 0.0)));
    }

    #[test]
    fn test_behind_shooter_never_hits() {
        let hit = ray_circle_hit(DVec2::ZERO, DVec2::new(100.0, 0.0), DVec2::new(-50.0, 0.0), 10.0);
        assert!(hit.is_none());
        // Even when the circle swallows the shooter's surroundings
        let hit = ray_circle_hit(DVec2::ZERO, DVec2::new(100.0, 0.0), DVec2::new(-5.0, 0.0), 10.0);
        assert!(hit.is_none());
    }

    #[test]
    fn test_grazing_edge_is_miss() {
        // Perpendicular distance exactly equals the radius
        let hit = ray_circle_hit(DVec2::ZERO, DVec2::new(100.0, 0.0), DVec2::new(50.0, 10.0), 10.0);
        assert!(hit.is_none());
        let hit = ray_circle_hit(DVec2::ZERO, DVec2::new(100.0, 0.0), DVec2::new(50.0, 9.5), 10.0);
        assert!(close(hit.unwrap(), DVec2::new(50.0, 0.0)));
    }

    #[test]
    fn test_hit_across_angle_seam() {
        // Shot points just above -x, target just below: headings straddle ±π
        let origin = DVec2::new(400.0, 300.0);
        let aim = origin + DVec2::new(-100.0, 1.0);
        let center = origin + DVec2::new(-200.0, -2.0);
        assert!(ray_circle_hit(origin, aim, center, 10.0).is_some());
    }

    #[test]
    fn test_diagonal_foot_point() {
        let hit = ray_circle_hit(DVec2::ZERO, DVec2::new(1.0, 1.0), DVec2::new(50.0, 54.0), 10.0);
        assert!(close(hit.unwrap(), DVec2::new(52.0, 52.0)));
    }

    #[test]
    fn test_miss_endpoint() {
        let end = miss_endpoint(DVec2::new(10.0, 10.0), DVec2::new(10.0, 20.0), 500.0);
        assert!(close(end, DVec2::new(10.0, 510.0)));
    }
}
