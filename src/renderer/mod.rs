//! Software rendering module
//!
//! Frames are rasterized on a supersampled CPU canvas and downsampled to the
//! output size, which smooths circle edges without a GPU.

pub mod frame;
pub mod glyphs;
pub mod palette;

pub use frame::FrameRenderer;
