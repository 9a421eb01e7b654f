//! Video assembly through an external encoder process

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use super::frames::FRAME_PATTERN;
use crate::settings::OutputSettings;

/// Errors raised while producing the video
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("failed to launch encoder `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("encoder exited with {0}")]
    Failed(ExitStatus),
    #[error("failed to {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// ffmpeg-compatible command line encoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoEncoder {
    pub program: String,
    pub fps: u32,
    pub codec: String,
    pub pixel_format: String,
}

impl Default for VideoEncoder {
    fn default() -> Self {
        Self {
            program: "ffmpeg".to_string(),
            fps: crate::consts::VIDEO_FPS,
            codec: "libx264".to_string(),
            pixel_format: "yuv420p".to_string(),
        }
    }
}

impl VideoEncoder {
    pub fn from_settings(output: &OutputSettings) -> Self {
        Self {
            program: output.encoder.clone(),
            fps: output.fps,
            ..Self::default()
        }
    }

    /// Full argument list for encoding `frames_dir` into `output`
    pub fn args(&self, frames_dir: &Path, output: &Path) -> Vec<String> {
        vec![
            "-framerate".to_string(),
            self.fps.to_string(),
            "-i".to_string(),
            frames_dir.join(FRAME_PATTERN).to_string_lossy().into_owned(),
            "-c:v".to_string(),
            self.codec.clone(),
            "-pix_fmt".to_string(),
            self.pixel_format.clone(),
            output.to_string_lossy().into_owned(),
        ]
    }

    /// Replace `output` with a video built from the frames in `frames_dir`.
    /// Blocks until the encoder exits. Frames are left untouched.
    pub fn encode(&self, frames_dir: &Path, output: &Path) -> Result<(), EncodeError> {
        if output.exists() {
            fs::remove_file(output).map_err(|source| EncodeError::Io {
                action: "remove previous video",
                path: output.to_path_buf(),
                source,
            })?;
        }

        log::info!("Encoding {} with {}", output.display(), self.program);
        let status = Command::new(&self.program)
            .args(self.args(frames_dir, output))
            .status()
            .map_err(|source| EncodeError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(EncodeError::Failed(status));
        }
        log::info!("Video created: {}", output.display());
        Ok(())
    }

    /// Delete the frame directory and everything in it
    pub fn cleanup_frames(frames_dir: &Path) -> Result<(), EncodeError> {
        if !frames_dir.exists() {
            return Ok(());
        }
        fs::remove_dir_all(frames_dir).map_err(|source| EncodeError::Io {
            action: "remove frame directory",
            path: frames_dir.to_path_buf(),
            source,
        })?;
        log::info!("Removed {}", frames_dir.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_match_encoder_cli() {
        let encoder = VideoEncoder::default();
        let args = encoder.args(Path::new("frames"), Path::new("output.mp4"));
        let expected_input = Path::new("frames").join("frame_%04d.png");
        assert_eq!(
            args,
            vec![
                "-framerate",
                "60",
                "-i",
                expected_input.to_str().unwrap(),
                "-c:v",
                "libx264",
                "-pix_fmt",
                "yuv420p",
                "output.mp4",
            ]
        );
    }

    #[test]
    fn test_from_settings() {
        let output = OutputSettings {
            encoder: "/opt/ffmpeg".to_string(),
            fps: 30,
            ..OutputSettings::default()
        };
        let encoder = VideoEncoder::from_settings(&output);
        assert_eq!(encoder.program, "/opt/ffmpeg");
        assert_eq!(encoder.fps, 30);
        assert_eq!(encoder.codec, "libx264");
    }

    #[test]
    fn test_missing_encoder_keeps_frames_and_removes_old_video() {
        let tmp = tempfile::tempdir().unwrap();
        let frames = tmp.path().join("frames");
        fs::create_dir_all(&frames).unwrap();
        fs::write(frames.join("frame_0000.png"), b"png").unwrap();
        let output = tmp.path().join("output.mp4");
        fs::write(&output, b"old video").unwrap();

        let encoder = VideoEncoder {
            program: "ring-bounce-no-such-encoder".to_string(),
            ..VideoEncoder::default()
        };
        let result = encoder.encode(&frames, &output);

        assert!(matches!(result, Err(EncodeError::Spawn { .. })));
        assert!(!output.exists());
        assert!(frames.join("frame_0000.png").exists());
    }

    #[test]
    fn test_cleanup_frames() {
        let tmp = tempfile::tempdir().unwrap();
        let frames = tmp.path().join("frames");
        fs::create_dir_all(&frames).unwrap();
        fs::write(frames.join("frame_0000.png"), b"png").unwrap();

        VideoEncoder::cleanup_frames(&frames).unwrap();
        assert!(!frames.exists());
        // Already gone is fine
        VideoEncoder::cleanup_frames(&frames).unwrap();
    }
}
