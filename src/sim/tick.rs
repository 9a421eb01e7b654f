//! Fixed timestep simulation step
//!
//! One call advances the ball by exactly one frame.

use glam::Vec2;

use super::collision::{CollisionResult, ball_boundary_collision, reflect_velocity};
use super::state::SimulationState;
use crate::settings::PhysicsSettings;

/// What happened when the ball reached the ring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryHit {
    /// Outward unit normal used for reflection and correction
    pub normal: Vec2,
    /// Speed just before reflection
    pub impact_speed: f32,
    /// Distance the ball was pushed back inside
    pub overlap: f32,
    /// Boundary radius lost this frame (0 while the cooldown holds)
    pub shrink: f32,
    /// Ball radius gained this frame
    pub growth: f32,
}

/// Outcome of a single step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    /// Index of the frame that was simulated
    pub frame: u64,
    /// Ball position after integration, before any contact correction
    pub integrated_pos: Vec2,
    pub hit: Option<BoundaryHit>,
}

/// Advance the simulation by one frame
pub fn step(state: &mut SimulationState, physics: &PhysicsSettings) -> StepReport {
    let frame = state.frame;

    // Explicit Euler with a timestep of one frame
    let ball = &mut state.ball;
    ball.vel.y += physics.gravity;
    ball.pos += ball.vel;
    let integrated_pos = ball.pos;

    let contact = ball_boundary_collision(ball.pos, ball.radius, &state.boundary);
    let hit = if contact.hit {
        Some(resolve_boundary_hit(state, physics, &contact, frame))
    } else {
        None
    };

    state.frame += 1;
    StepReport {
        frame,
        integrated_pos,
        hit,
    }
}

/// Adapt radii, reflect, dampen and push the ball back inside
fn resolve_boundary_hit(
    state: &mut SimulationState,
    physics: &PhysicsSettings,
    contact: &CollisionResult,
    frame: u64,
) -> BoundaryHit {
    let SimulationState {
        ball,
        boundary,
        cooldown,
        ..
    } = state;

    let ball_radius_before = ball.radius;
    if let Some(growth) = physics.ball_growth {
        ball.radius = (ball.radius + growth).min(boundary.inner_radius());
    }

    let boundary_radius_before = boundary.radius;
    let may_shrink = match cooldown {
        Some(cooldown) => cooldown.try_trigger(frame),
        None => true,
    };
    if may_shrink {
        boundary.radius -= physics.shrink_step;
    }
    boundary.clamp_to_floor(ball.radius);

    let impact_speed = ball.speed();
    ball.vel = reflect_velocity(ball.vel, contact.normal) * physics.damping;

    // Single linear correction against the inner edge seen at contact time
    let overlap = contact.distance + ball.radius - contact.inner_radius;
    ball.pos -= overlap * contact.normal;

    BoundaryHit {
        normal: contact.normal,
        impact_speed,
        overlap,
        shrink: boundary_radius_before - boundary.radius,
        growth: ball.radius - ball_radius_before,
    }
}
