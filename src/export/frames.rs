//! Numbered PNG frame writer

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbImage;

/// printf-style pattern understood by the encoder
pub const FRAME_PATTERN: &str = "frame_%04d.png";

/// Errors raised while writing frames
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to prepare frame directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write frame {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Path of frame `index` inside `dir`
pub fn frame_path(dir: &Path, index: u32) -> PathBuf {
    dir.join(format!("frame_{index:04}.png"))
}

/// Writes frames with sequential, gap-free indices
#[derive(Debug)]
pub struct FrameExporter {
    dir: PathBuf,
    saved: u32,
}

impl FrameExporter {
    /// Create the directory if needed and remove frames left by earlier runs
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, ExportError> {
        let dir = dir.into();
        let dir_error = |source| ExportError::Directory {
            path: dir.clone(),
            source,
        };

        fs::create_dir_all(&dir).map_err(dir_error)?;

        let mut stale = 0;
        for entry in fs::read_dir(&dir).map_err(dir_error)? {
            let path = entry.map_err(dir_error)?.path();
            if path.is_file() && is_frame_file(&path) {
                fs::remove_file(&path).map_err(dir_error)?;
                stale += 1;
            }
        }
        if stale > 0 {
            log::warn!("Removed {} stale frames from {}", stale, dir.display());
        }

        Ok(Self { dir, saved: 0 })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of frames written so far
    pub fn saved(&self) -> u32 {
        self.saved
    }

    /// Write the next frame in the sequence
    pub fn write(&mut self, frame: &RgbImage) -> Result<PathBuf, ExportError> {
        let path = frame_path(&self.dir, self.saved);
        frame.save(&path).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;
        self.saved += 1;
        Ok(path)
    }
}

fn is_frame_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with("frame_") && name.ends_with(".png"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_path_is_zero_padded() {
        let path = frame_path(Path::new("frames"), 7);
        assert_eq!(path, Path::new("frames").join("frame_0007.png"));
        assert_eq!(
            frame_path(Path::new("f"), 12345),
            Path::new("f").join("frame_12345.png")
        );
    }

    #[test]
    fn test_write_sequential_frames() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("frames");
        let mut exporter = FrameExporter::new(&dir).unwrap();
        let frame = RgbImage::new(4, 4);

        for expected in 0..3 {
            let path = exporter.write(&frame).unwrap();
            assert_eq!(path, frame_path(&dir, expected));
            assert!(path.exists());
        }
        assert_eq!(exporter.saved(), 3);

        let decoded = image::open(frame_path(&dir, 2)).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 4));
    }

    #[test]
    fn test_stale_frames_removed() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("frame_0000.png"), b"old").unwrap();
        fs::write(tmp.path().join("notes.txt"), b"keep").unwrap();

        FrameExporter::new(tmp.path()).unwrap();

        assert!(!tmp.path().join("frame_0000.png").exists());
        assert!(tmp.path().join("notes.txt").exists());
    }

    #[test]
    fn test_directory_error() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("not_a_dir");
        fs::write(&file, b"x").unwrap();
        let result = FrameExporter::new(file.join("frames"));
        assert!(matches!(result, Err(ExportError::Directory { .. })));
    }
}
