//! Deterministic simulation module
//!
//! All physics lives here. This module must stay pure and deterministic:
//! - Fixed timestep of one frame
//! - Seeded RNG only
//! - No rendering or filesystem dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, FALLBACK_NORMAL, ball_boundary_collision, reflect_velocity};
pub use state::{Ball, Boundary, CollisionCooldown, RngState, SimulationState};
pub use tick::{BoundaryHit, StepReport, step};
