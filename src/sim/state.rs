//! Simulation state
//!
//! Everything the physics step reads and mutates lives here. Presentation
//! state (trail, background) is kept out so the step can be tested alone.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::polar_to_cartesian;
use crate::settings::PhysicsSettings;

/// Seed plus stream selector for a reproducible PCG generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    /// Stream used for spawning the ball
    pub const PHYSICS_STREAM: u64 = 0;
    /// Stream used for decorative randomness
    pub const EFFECTS_STREAM: u64 = 1;

    pub fn new(seed: u64, stream: u64) -> Self {
        Self { seed, stream }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::new(self.seed, self.stream)
    }
}

/// The moving disc
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// The static ring the ball is confined within
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    pub center: Vec2,
    /// Outer radius of the ring band
    pub radius: f32,
    /// Radial thickness of the band
    pub thickness: f32,
}

impl Boundary {
    pub fn new(center: Vec2, radius: f32, thickness: f32) -> Self {
        Self {
            center,
            radius,
            thickness,
        }
    }

    /// Usable interior radius
    #[inline]
    pub fn inner_radius(&self) -> f32 {
        self.radius - self.thickness
    }

    /// Smallest radius that still fits a ball of the given size
    #[inline]
    pub fn floor_for(&self, ball_radius: f32) -> f32 {
        ball_radius + self.thickness
    }

    /// Shrink by `step`, never below the floor for `ball_radius`
    pub fn shrink(&mut self, step: f32, ball_radius: f32) {
        self.radius -= step;
        self.clamp_to_floor(ball_radius);
    }

    pub fn clamp_to_floor(&mut self, ball_radius: f32) {
        self.radius = self.radius.max(self.floor_for(ball_radius));
    }
}

/// Limits boundary shrinking to once per cooldown window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionCooldown {
    /// Frame index of the last shrink
    pub last_collision_frame: u64,
    /// Frames that must pass before the next shrink
    pub frames: u64,
}

impl CollisionCooldown {
    pub fn new(frames: u64) -> Self {
        Self {
            last_collision_frame: 0,
            frames,
        }
    }

    /// True once more than `frames` frames have passed since the last shrink
    pub fn ready(&self, frame: u64) -> bool {
        frame.saturating_sub(self.last_collision_frame) > self.frames
    }

    /// Claim the window if it is open; returns whether it was
    pub fn try_trigger(&mut self, frame: u64) -> bool {
        if self.ready(frame) {
            self.last_collision_frame = frame;
            true
        } else {
            false
        }
    }
}

/// Complete physics state, owned by the frame loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub ball: Ball,
    pub boundary: Boundary,
    /// Present only when shrinking is rate limited
    pub cooldown: Option<CollisionCooldown>,
    /// Number of completed steps
    pub frame: u64,
}

impl SimulationState {
    pub fn new(ball: Ball, boundary: Boundary, cooldown: Option<CollisionCooldown>) -> Self {
        Self {
            ball,
            boundary,
            cooldown,
            frame: 0,
        }
    }

    /// Spawn a ball somewhere in the upper half of the ring, heading in a
    /// random direction at the configured speed
    pub fn spawn(physics: &PhysicsSettings, center: Vec2, rng: &mut impl Rng) -> Self {
        use std::f32::consts::{PI, TAU};

        let boundary = Boundary::new(center, physics.boundary_radius, physics.ring_thickness);

        // Screen y grows downward, so angles in [pi, 2pi) point up
        let angle = rng.random_range(PI..TAU);
        let max_offset = boundary.inner_radius() - physics.ball_radius;
        let offset = if max_offset > 0.0 {
            rng.random_range(0.0..max_offset)
        } else {
            0.0
        };
        let pos = center + polar_to_cartesian(offset, angle);

        let heading = rng.random_range(0.0..TAU);
        let vel = polar_to_cartesian(physics.initial_speed, heading);

        Self::new(
            Ball::new(pos, vel, physics.ball_radius),
            boundary,
            physics.shrink_cooldown.map(CollisionCooldown::new),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_inner_radius_and_floor() {
        let mut boundary = Boundary::new(Vec2::ZERO, 500.0, 20.0);
        assert_eq!(boundary.inner_radius(), 480.0);

        boundary.shrink(10.0, 50.0);
        assert_eq!(boundary.radius, 490.0);

        boundary.shrink(1000.0, 50.0);
        assert_eq!(boundary.radius, 70.0);
    }

    #[test]
    fn test_cooldown_window() {
        let mut cooldown = CollisionCooldown::new(10);
        assert!(!cooldown.ready(10));
        assert!(cooldown.try_trigger(11));
        assert_eq!(cooldown.last_collision_frame, 11);
        assert!(!cooldown.try_trigger(21));
        assert!(cooldown.try_trigger(22));
    }

    #[test]
    fn test_spawn_in_upper_half() {
        let physics = PhysicsSettings::default();
        let center = Vec2::new(540.0, 960.0);

        for seed in 0..64 {
            let mut rng = RngState::new(seed, RngState::PHYSICS_STREAM).to_rng();
            let state = SimulationState::spawn(&physics, center, &mut rng);
            let offset = state.ball.pos - center;

            assert!(offset.y <= 1e-3, "seed {seed} spawned below center");
            assert!(offset.length() + state.ball.radius <= state.boundary.inner_radius() + 1e-2);
            assert!((state.ball.speed() - physics.initial_speed).abs() < 1e-4);
            assert_eq!(state.frame, 0);
        }
    }

    #[test]
    fn test_spawn_is_deterministic() {
        let physics = PhysicsSettings::default();
        let a = SimulationState::spawn(&physics, Vec2::ZERO, &mut RngState::new(7, 0).to_rng());
        let b = SimulationState::spawn(&physics, Vec2::ZERO, &mut RngState::new(7, 0).to_rng());
        assert_eq!(a, b);
    }

    #[test]
    fn test_spawn_cooldown_follows_settings() {
        let mut physics = PhysicsSettings::default();
        let mut rng = RngState::new(1, 0).to_rng();
        assert!(SimulationState::spawn(&physics, Vec2::ZERO, &mut rng).cooldown.is_none());

        physics.shrink_cooldown = Some(10);
        let state = SimulationState::spawn(&physics, Vec2::ZERO, &mut rng);
        assert_eq!(state.cooldown, Some(CollisionCooldown::new(10)));
    }
}
