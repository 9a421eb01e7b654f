//! Command-line arguments

use std::path::PathBuf;

use crate::settings::Preset;

pub const USAGE: &str = "\
Usage: ring-bounce [OPTIONS]

Options:
  --preset NAME         growing-ball (default) or rainbow-trail
  --config FILE         load settings from a JSON file (overrides --preset)
  --seed N              seed for the spawn position and background
  --frames N            number of frames to simulate
  --out FILE            output video path
  --frames-dir DIR      directory for the PNG frames
  --keep-frames         keep the PNG frames after encoding
  --no-video            only write frames, do not run the encoder
  --write-config FILE   write the effective settings to FILE and exit
  -h, --help            print this help

Set RUST_LOG=debug for per-collision logging.";

/// Errors raised while parsing arguments
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CliError {
    #[error("missing value for {0}")]
    MissingValue(String),
    #[error("invalid value `{value}` for {flag}")]
    InvalidValue { flag: String, value: String },
    #[error("unknown preset `{0}` (expected growing-ball or rainbow-trail)")]
    UnknownPreset(String),
    #[error("unknown argument `{0}`")]
    UnknownArgument(String),
}

/// Parsed command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub preset: Option<Preset>,
    pub config: Option<PathBuf>,
    pub seed: Option<u64>,
    pub frames: Option<u64>,
    pub out: Option<PathBuf>,
    pub frames_dir: Option<PathBuf>,
    pub keep_frames: bool,
    pub no_video: bool,
    pub write_config: Option<PathBuf>,
    pub help: bool,
}

impl CliArgs {
    /// Parse arguments, excluding the program name
    pub fn parse<I>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = CliArgs::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            let mut value = || args.next().ok_or_else(|| CliError::MissingValue(arg.clone()));
            match arg.as_str() {
                "--preset" => {
                    let name = value()?;
                    parsed.preset =
                        Some(Preset::from_str(&name).ok_or(CliError::UnknownPreset(name))?);
                }
                "--config" => parsed.config = Some(value()?.into()),
                "--seed" => parsed.seed = Some(parse_number(&arg, value()?)?),
                "--frames" => parsed.frames = Some(parse_number(&arg, value()?)?),
                "--out" => parsed.out = Some(value()?.into()),
                "--frames-dir" => parsed.frames_dir = Some(value()?.into()),
                "--write-config" => parsed.write_config = Some(value()?.into()),
                "--keep-frames" => parsed.keep_frames = true,
                "--no-video" => parsed.no_video = true,
                "-h" | "--help" => parsed.help = true,
                _ => return Err(CliError::UnknownArgument(arg)),
            }
        }

        Ok(parsed)
    }
}

fn parse_number(flag: &str, value: String) -> Result<u64, CliError> {
    value.parse().map_err(|_| CliError::InvalidValue {
        flag: flag.to_string(),
        value,
    })
}
