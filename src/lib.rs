//! Ring Bounce - a ball bouncing inside a shrinking ring
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball, boundary, per-frame step)
//! - `effects`: Presentation-only state (trailing history, flicker grid)
//! - `renderer`: Software rasterizer producing RGB frames
//! - `export`: PNG frame sequence and external video encoding
//! - `app`: Frame loop driver tying everything together

pub mod app;
pub mod cli;
pub mod effects;
pub mod export;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::{App, RunSummary};
pub use settings::{Preset, Settings};

use glam::Vec2;

/// Default tunables (high-resolution pixel units, one frame per step)
pub mod consts {
    /// Output frame size
    pub const OUTPUT_WIDTH: u32 = 540;
    pub const OUTPUT_HEIGHT: u32 = 960;
    /// Frames are drawn at this multiple of the output size, then downsampled
    pub const SUPERSAMPLE: u32 = 2;

    /// Boundary ring
    pub const BOUNDARY_RADIUS: f32 = 500.0;
    pub const RING_THICKNESS: f32 = 20.0;

    /// Ball
    pub const BALL_RADIUS: f32 = 50.0;
    /// Energy kept on every boundary contact
    pub const DAMPING: f32 = 0.98;

    /// Background glyph grid cell size (supersampled pixels)
    pub const GLYPH_CELL_WIDTH: u32 = 25;
    pub const GLYPH_CELL_HEIGHT: u32 = 35;
    /// Frames between background flickers
    pub const FLICKER_EVERY: u64 = 10;
    /// Chance that a single glyph toggles during a flicker
    pub const FLICKER_PROBABILITY: f64 = 0.3;

    /// Trailing balls
    pub const TRAIL_LENGTH: usize = 10;
    pub const TRAIL_SAMPLE_EVERY: u64 = 5;

    /// Save every Nth simulated frame
    pub const EXPORT_EVERY: u64 = 2;
    /// Playback rate of the encoded video
    pub const VIDEO_FPS: u32 = 60;
    /// Frames simulated when no limit is given (one minute of simulation at 120 Hz)
    pub const DEFAULT_MAX_FRAMES: u64 = 7200;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
