//! Ball versus boundary ring collision
//!
//! The ball lives inside the ring; contact happens when its far edge reaches
//! the inner edge of the band.

use glam::Vec2;

use super::state::Boundary;

/// Normal used when the ball sits exactly on the boundary center.
/// Points along gravity (screen down), so correction pushes the ball up.
pub const FALLBACK_NORMAL: Vec2 = Vec2::Y;

/// Result of a boundary check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Whether the ball touches or penetrates the inner edge
    pub hit: bool,
    /// Unit vector from the boundary center toward the ball
    pub normal: Vec2,
    /// Distance from the boundary center to the ball center
    pub distance: f32,
    /// Inner radius at the time of the check
    pub inner_radius: f32,
    /// How far past the inner edge the ball reaches (<= 0 when no hit)
    pub penetration: f32,
}

/// Check the ball against the inner edge of the ring
pub fn ball_boundary_collision(ball_pos: Vec2, ball_radius: f32, boundary: &Boundary) -> CollisionResult {
    let delta = ball_pos - boundary.center;
    let distance = delta.length();
    let inner_radius = boundary.inner_radius();
    let penetration = distance + ball_radius - inner_radius;

    CollisionResult {
        hit: penetration >= 0.0,
        normal: delta.try_normalize().unwrap_or(FALLBACK_NORMAL),
        distance,
        inner_radius,
        penetration,
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring() -> Boundary {
        Boundary::new(Vec2::new(100.0, 100.0), 500.0, 20.0)
    }

    #[test]
    fn test_ball_inside_misses() {
        let result = ball_boundary_collision(Vec2::new(300.0, 100.0), 50.0, &ring());
        assert!(!result.hit);
        assert_eq!(result.distance, 200.0);
        assert_eq!(result.inner_radius, 480.0);
        assert!(result.penetration < 0.0);
    }

    #[test]
    fn test_ball_touching_inner_edge_hits() {
        // 430 + 50 == 480 exactly
        let result = ball_boundary_collision(Vec2::new(530.0, 100.0), 50.0, &ring());
        assert!(result.hit);
        assert_eq!(result.penetration, 0.0);
        assert_eq!(result.normal, Vec2::X);
    }

    #[test]
    fn test_penetration_and_normal() {
        let result = ball_boundary_collision(Vec2::new(100.0, 550.0), 50.0, &ring());
        assert!(result.hit);
        assert!((result.penetration - 20.0).abs() < 1e-4);
        assert!((result.normal - Vec2::Y).length() < 1e-6);
    }

    #[test]
    fn test_centered_ball_uses_fallback_normal() {
        let boundary = Boundary::new(Vec2::ZERO, 70.0, 20.0);
        let result = ball_boundary_collision(Vec2::ZERO, 50.0, &boundary);
        assert!(result.hit);
        assert_eq!(result.normal, FALLBACK_NORMAL);
        assert!(result.normal.is_finite());
    }

    #[test]
    fn test_reflect_velocity() {
        // Ball moving right, hits a wall whose normal points along x
        let reflected = reflect_velocity(Vec2::new(100.0, 0.0), Vec2::new(-1.0, 0.0));
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }

    #[test]
    fn test_reflect_keeps_tangential_component() {
        let reflected = reflect_velocity(Vec2::new(3.0, 4.0), Vec2::Y);
        assert_eq!(reflected, Vec2::new(3.0, -4.0));
    }
}
