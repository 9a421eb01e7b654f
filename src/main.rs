//! Ring Bounce entry point
//!
//! Simulates the run headlessly, writes PNG frames, then hands them to the
//! video encoder.

use anyhow::{Context, Result};

use ring_bounce::cli::{CliArgs, USAGE};
use ring_bounce::export::{FrameExporter, VideoEncoder};
use ring_bounce::{App, Settings};

fn main() -> Result<()> {
    env_logger::init();

    let args = CliArgs::parse(std::env::args().skip(1))?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    let settings = resolve_settings(&args)?;

    if let Some(path) = &args.write_config {
        settings
            .save(path)
            .with_context(|| format!("Failed to write settings to {}", path.display()))?;
        return Ok(());
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!(
        "Ring Bounce starting ({} preset, seed {})",
        settings.preset.as_str(),
        seed
    );

    let output = settings.output.clone();
    let exporter = FrameExporter::new(&output.frames_dir).context("Failed to set up frame export")?;
    let mut app = App::new(settings, seed, Some(exporter)).context("Invalid settings")?;
    let summary = app.run(output.max_frames).context("Frame export failed")?;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if args.no_video {
        log::info!(
            "Skipping video; {} frames left in {}",
            summary.frames_exported,
            output.frames_dir.display()
        );
        return Ok(());
    }

    let encoder = VideoEncoder::from_settings(&output);
    if let Err(err) = encoder.encode(&output.frames_dir, &output.video_path) {
        log::error!("Video encoding failed: {err}");
        return Err(err).with_context(|| {
            format!(
                "No video written; {} frames kept in {}",
                summary.frames_exported,
                output.frames_dir.display()
            )
        });
    }

    if !output.keep_frames {
        VideoEncoder::cleanup_frames(&output.frames_dir)?;
    }
    Ok(())
}

/// Preset or config file first, then command-line overrides
fn resolve_settings(args: &CliArgs) -> Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::from_preset(args.preset.unwrap_or_default()),
    };

    if let Some(frames) = args.frames {
        settings.output.max_frames = frames;
    }
    if let Some(out) = &args.out {
        settings.output.video_path = out.clone();
    }
    if let Some(dir) = &args.frames_dir {
        settings.output.frames_dir = dir.clone();
    }
    if args.keep_frames {
        settings.output.keep_frames = true;
    }

    settings.validate()?;
    Ok(settings)
}
