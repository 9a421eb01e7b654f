//! Presentation-only state
//!
//! Nothing here feeds back into physics; the renderer reads it and the frame
//! loop updates it on its own cadence.

pub mod flicker;
pub mod trail;

pub use flicker::{FlickerGrid, Glyph};
pub use trail::TrailHistory;
