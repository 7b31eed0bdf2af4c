//! Collision detection and response for circles in a rectangular arena
//!
//! The vehicle, rocks and beacons are all circles. Responses are arcade
//! style: edge bounces damp and flip one axis, rock contacts shove the car
//! out and kick it along the separation vector.

use glam::Vec2;

/// Result of a circle-circle check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the circles overlap
    pub hit: bool,
    /// Vector from the obstacle center to the mover center (not normalized)
    pub separation: Vec2,
    /// Overlap depth along the separation vector
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            separation: Vec2::ZERO,
            penetration: 0.0,
        }
    }

    /// Position correction that moves the mover out by the penetration depth
    ///
    /// Coincident centers have no separation direction, so nothing moves.
    pub fn push_out(&self) -> Vec2 {
        let dist = self.separation.length();
        let dist = if dist == 0.0 { 1.0 } else { dist };
        self.separation * (self.penetration / dist)
    }
}

/// Check overlap between a moving circle and a fixed one
pub fn circle_collision(
    mover_pos: Vec2,
    mover_radius: f32,
    obstacle_pos: Vec2,
    obstacle_radius: f32,
) -> CollisionResult {
    let separation = mover_pos - obstacle_pos;
    let dist = separation.length();
    let reach = mover_radius + obstacle_radius;

    if dist < reach {
        return CollisionResult {
            hit: true,
            separation,
            penetration: reach - dist,
        };
    }

    CollisionResult::miss()
}

/// True when two circles are within `slack` of touching
#[inline]
pub fn circles_within(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32, slack: f32) -> bool {
    a.distance(b) < a_radius + b_radius + slack
}

/// Keep a circle inside `[0, width] x [0, height]`
///
/// Each crossed edge clamps the position and scales that velocity axis by
/// `restitution`. Returns true if any edge was crossed.
pub fn arena_bounds_collision(
    pos: &mut Vec2,
    vel: &mut Vec2,
    radius: f32,
    width: f32,
    height: f32,
    restitution: f32,
) -> bool {
    let mut hit = false;

    if pos.x < radius {
        pos.x = radius;
        vel.x *= restitution;
        hit = true;
    }
    if pos.x > width - radius {
        pos.x = width - radius;
        vel.x *= restitution;
        hit = true;
    }
    if pos.y < radius {
        pos.y = radius;
        vel.y *= restitution;
        hit = true;
    }
    if pos.y > height - radius {
        pos.y = height - radius;
        vel.y *= restitution;
        hit = true;
    }

    hit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_collision_overlap() {
        let result = circle_collision(Vec2::new(30.0, 0.0), 14.0, Vec2::ZERO, 20.0);
        assert!(result.hit);
        assert!((result.penetration - 4.0).abs() < 1e-5);

        let pushed = Vec2::new(30.0, 0.0) + result.push_out();
        assert!((pushed.x - 34.0).abs() < 1e-4);
        assert!(pushed.y.abs() < 1e-6);
    }

    #[test]
    fn test_circle_collision_miss() {
        let result = circle_collision(Vec2::new(34.0, 0.0), 14.0, Vec2::ZERO, 20.0);
        assert!(!result.hit);
        assert_eq!(result.push_out(), Vec2::ZERO);
    }

    #[test]
    fn test_coincident_centers_do_not_produce_nan() {
        let result = circle_collision(Vec2::new(5.0, 5.0), 14.0, Vec2::new(5.0, 5.0), 20.0);
        assert!(result.hit);
        assert_eq!(result.penetration, 34.0);
        let push = result.push_out();
        assert!(push.is_finite());
        assert_eq!(push, Vec2::ZERO);
    }

    #[test]
    fn test_circles_within_slack() {
        assert!(circles_within(Vec2::ZERO, 16.0, Vec2::new(35.0, 0.0), 14.0, 6.0));
        assert!(!circles_within(Vec2::ZERO, 16.0, Vec2::new(36.0, 0.0), 14.0, 6.0));
    }

    #[test]
    fn test_arena_bounds_left_edge() {
        let mut pos = Vec2::new(-5.0, 500.0);
        let mut vel = Vec2::new(-50.0, 10.0);
        let hit = arena_bounds_collision(&mut pos, &mut vel, 14.0, 2600.0, 2000.0, -0.4);

        assert!(hit);
        assert_eq!(pos.x, 14.0);
        assert!((vel.x - 20.0).abs() < 1e-5);
        assert_eq!(vel.y, 10.0);
    }

    #[test]
    fn test_arena_bounds_corner() {
        let mut pos = Vec2::new(2650.0, 2100.0);
        let mut vel = Vec2::new(100.0, 100.0);
        let hit = arena_bounds_collision(&mut pos, &mut vel, 14.0, 2600.0, 2000.0, -0.4);

        assert!(hit);
        assert_eq!(pos, Vec2::new(2586.0, 1986.0));
        assert!((vel.x + 40.0).abs() < 1e-4);
        assert!((vel.y + 40.0).abs() < 1e-4);
    }

    #[test]
    fn test_arena_bounds_inside() {
        let mut pos = Vec2::new(100.0, 100.0);
        let mut vel = Vec2::new(-50.0, 0.0);
        assert!(!arena_bounds_collision(&mut pos, &mut vel, 14.0, 2600.0, 2000.0, -0.4));
        assert_eq!(vel.x, -50.0);
    }
}
