//! Frame sequence export and video assembly
//!
//! Frames are written as numbered PNGs; once the run ends an external encoder
//! turns the sequence into a video.

pub mod frames;
pub mod video;

pub use frames::{ExportError, FRAME_PATTERN, FrameExporter, frame_path};
pub use video::{EncodeError, VideoEncoder};
