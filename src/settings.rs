//! Simulation settings and presets
//!
//! Stored as JSON. Both animation variants are expressed as presets over the
//! same settings; the toggles in [`PhysicsSettings`] select the behavior.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading or validating settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Built-in animation variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Ball grows on every contact, ring shrinks at most once per cooldown window
    #[default]
    GrowingBall,
    /// Fixed-size ball with a rainbow trail, ring shrinks on every contact
    RainbowTrail,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::GrowingBall, Preset::RainbowTrail];

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::GrowingBall => "growing-ball",
            Preset::RainbowTrail => "rainbow-trail",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "growing-ball" | "growing" | "grow" => Some(Preset::GrowingBall),
            "rainbow-trail" | "rainbow" | "trail" => Some(Preset::RainbowTrail),
            _ => None,
        }
    }

    /// Physics tuning for this preset
    pub fn physics(&self) -> PhysicsSettings {
        match self {
            Preset::GrowingBall => PhysicsSettings {
                gravity: 0.15,
                initial_speed: 8.0,
                shrink_step: 5.0,
                ball_growth: Some(5.0),
                shrink_cooldown: Some(10),
                ..PhysicsSettings::default()
            },
            Preset::RainbowTrail => PhysicsSettings {
                gravity: 0.2,
                initial_speed: 7.5,
                shrink_step: 10.0,
                ball_growth: None,
                shrink_cooldown: None,
                ..PhysicsSettings::default()
            },
        }
    }

    /// Trailing history for this preset, if any
    pub fn trail(&self) -> Option<TrailSettings> {
        match self {
            Preset::GrowingBall => None,
            Preset::RainbowTrail => Some(TrailSettings::default()),
        }
    }
}

/// Physics tuning; all distances in supersampled pixels, time in frames
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Downward acceleration added to velocity every frame
    pub gravity: f32,
    /// Multiplicative velocity loss on each boundary contact (0 < d <= 1)
    pub damping: f32,
    /// Launch speed (direction is random)
    pub initial_speed: f32,
    pub ball_radius: f32,
    pub boundary_radius: f32,
    pub ring_thickness: f32,
    /// Boundary radius lost per shrink
    pub shrink_step: f32,
    /// Ball radius gained on each contact (None = fixed size)
    pub ball_growth: Option<f32>,
    /// Minimum frames between two shrinks (None = shrink on every contact)
    pub shrink_cooldown: Option<u64>,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: 0.15,
            damping: DAMPING,
            initial_speed: 8.0,
            ball_radius: BALL_RADIUS,
            boundary_radius: BOUNDARY_RADIUS,
            ring_thickness: RING_THICKNESS,
            shrink_step: 5.0,
            ball_growth: None,
            shrink_cooldown: None,
        }
    }
}

/// Comet tail behind the ball (presentation only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailSettings {
    /// Number of trailing discs
    pub length: usize,
    /// Frames between trail samples
    pub sample_every: u64,
}

impl Default for TrailSettings {
    fn default() -> Self {
        Self {
            length: TRAIL_LENGTH,
            sample_every: TRAIL_SAMPLE_EVERY,
        }
    }
}

/// Canvas and background effect settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub supersample: u32,
    pub glyph_cell_width: u32,
    pub glyph_cell_height: u32,
    pub flicker_every: u64,
    pub flicker_probability: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: OUTPUT_WIDTH,
            height: OUTPUT_HEIGHT,
            supersample: SUPERSAMPLE,
            glyph_cell_width: GLYPH_CELL_WIDTH,
            glyph_cell_height: GLYPH_CELL_HEIGHT,
            flicker_every: FLICKER_EVERY,
            flicker_probability: FLICKER_PROBABILITY,
        }
    }
}

impl RenderSettings {
    /// Size of the supersampled drawing canvas
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.width * self.supersample, self.height * self.supersample)
    }

    /// Number of glyph rows and columns needed to cover the canvas
    pub fn glyph_grid_size(&self) -> (usize, usize) {
        let (w, h) = self.canvas_size();
        (
            h.div_ceil(self.glyph_cell_height) as usize,
            w.div_ceil(self.glyph_cell_width) as usize,
        )
    }
}

/// Where frames and the final video go
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub frames_dir: PathBuf,
    pub video_path: PathBuf,
    /// Save every Nth simulated frame
    pub export_every: u64,
    pub fps: u32,
    /// Encoder executable
    pub encoder: String,
    /// Keep the PNG frames after a successful encode
    pub keep_frames: bool,
    pub max_frames: u64,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            frames_dir: PathBuf::from("frames"),
            video_path: PathBuf::from("output.mp4"),
            export_every: EXPORT_EVERY,
            fps: VIDEO_FPS,
            encoder: "ffmpeg".to_string(),
            keep_frames: false,
            max_frames: DEFAULT_MAX_FRAMES,
        }
    }
}

/// Complete run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub preset: Preset,
    pub physics: PhysicsSettings,
    pub trail: Option<TrailSettings>,
    pub render: RenderSettings,
    pub output: OutputSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}

impl Settings {
    /// Create settings from a preset (other sections use defaults)
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            preset,
            physics: preset.physics(),
            trail: preset.trail(),
            render: RenderSettings::default(),
            output: OutputSettings::default(),
        }
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse settings JSON. Anything the document leaves out is taken from
    /// the preset it names, so a partial file keeps that preset's behavior.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let overrides: serde_json::Value = serde_json::from_str(json)?;
        let preset = match overrides.get("preset") {
            Some(name) => Preset::deserialize(name)?,
            None => Preset::default(),
        };

        let mut merged = serde_json::to_value(Self::from_preset(preset))?;
        merge_json(&mut merged, overrides);
        Ok(serde_json::from_value(merged)?)
    }

    /// Save settings as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Reject configurations the simulation cannot run
    pub fn validate(&self) -> Result<(), SettingsError> {
        let p = &self.physics;
        let invalid = |msg: String| Err(SettingsError::Invalid(msg));

        if !(p.damping > 0.0 && p.damping <= 1.0) {
            return invalid(format!("damping must be in (0, 1], got {}", p.damping));
        }
        if p.ball_radius <= 0.0 || p.ring_thickness <= 0.0 {
            return invalid("ball radius and ring thickness must be positive".into());
        }
        if p.shrink_step < 0.0 || p.ball_growth.is_some_and(|g| g < 0.0) {
            return invalid("shrink and growth steps must not be negative".into());
        }
        if p.boundary_radius < p.ball_radius + p.ring_thickness {
            return invalid(format!(
                "boundary radius {} is smaller than ball radius + ring thickness ({})",
                p.boundary_radius,
                p.ball_radius + p.ring_thickness
            ));
        }
        if let Some(trail) = &self.trail {
            if trail.length == 0 || trail.sample_every == 0 {
                return invalid("trail length and sample cadence must be non-zero".into());
            }
        }

        let r = &self.render;
        if r.width == 0 || r.height == 0 || r.supersample == 0 {
            return invalid("output size and supersample factor must be non-zero".into());
        }
        if r.glyph_cell_width == 0 || r.glyph_cell_height == 0 || r.flicker_every == 0 {
            return invalid("glyph cells and flicker cadence must be non-zero".into());
        }
        if !(0.0..=1.0).contains(&r.flicker_probability) {
            return invalid("flicker probability must be in [0, 1]".into());
        }
        let (w, h) = r.canvas_size();
        if p.boundary_radius * 2.0 > w.min(h) as f32 {
            log::warn!(
                "Boundary diameter {} exceeds the {}x{} canvas; the ring will be clipped",
                p.boundary_radius * 2.0,
                w,
                h
            );
        }

        let o = &self.output;
        if o.export_every == 0 || o.fps == 0 {
            return invalid("export cadence and fps must be non-zero".into());
        }
        Ok(())
    }
}

/// Recursively overlay `overrides` onto `base`; objects merge key by key,
/// everything else (including null) replaces
fn merge_json(base: &mut serde_json::Value, overrides: serde_json::Value) {
    use serde_json::Value;

    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overrides) => *base = overrides,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_names_round_trip() {
        for preset in Preset::ALL {
            assert_eq!(Preset::from_str(preset.as_str()), Some(preset));
        }
        assert_eq!(Preset::from_str("RAINBOW"), Some(Preset::RainbowTrail));
        assert_eq!(Preset::from_str("disco"), None);
    }

    #[test]
    fn test_presets_select_variant_toggles() {
        let growing = Settings::from_preset(Preset::GrowingBall);
        assert_eq!(growing.physics.ball_growth, Some(5.0));
        assert_eq!(growing.physics.shrink_cooldown, Some(10));
        assert!(growing.trail.is_none());

        let rainbow = Settings::from_preset(Preset::RainbowTrail);
        assert_eq!(rainbow.physics.ball_growth, None);
        assert_eq!(rainbow.physics.shrink_cooldown, None);
        assert_eq!(rainbow.physics.shrink_step, 10.0);
        assert_eq!(rainbow.trail, Some(TrailSettings::default()));

        assert!(growing.validate().is_ok());
        assert!(rainbow.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_damping() {
        let mut settings = Settings::default();
        settings.physics.damping = 0.0;
        assert!(matches!(settings.validate(), Err(SettingsError::Invalid(_))));
        settings.physics.damping = 1.5;
        assert!(matches!(settings.validate(), Err(SettingsError::Invalid(_))));
        settings.physics.damping = 1.0;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_boundary_below_floor() {
        let mut settings = Settings::default();
        settings.physics.boundary_radius = 60.0;
        assert!(matches!(settings.validate(), Err(SettingsError::Invalid(_))));
    }

    #[test]
    fn test_glyph_grid_covers_canvas() {
        let render = RenderSettings::default();
        assert_eq!(render.canvas_size(), (1080, 1920));
        // 1920 / 35 rounds up to 55 rows, 1080 / 25 rounds up to 44 columns
        assert_eq!(render.glyph_grid_size(), (55, 44));
    }

    #[test]
    fn test_partial_json_uses_preset_defaults() {
        let json = r#"{ "preset": "rainbow-trail", "physics": { "gravity": 0.3 } }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.preset, Preset::RainbowTrail);
        assert_eq!(settings.physics.gravity, 0.3);
        assert_eq!(settings.physics.shrink_step, 10.0);
        assert_eq!(settings.physics.ball_growth, None);
        assert_eq!(settings.physics.shrink_cooldown, None);
        assert_eq!(settings.physics.boundary_radius, BOUNDARY_RADIUS);
        assert_eq!(settings.trail, Some(TrailSettings::default()));
        assert_eq!(settings.output.export_every, EXPORT_EVERY);
    }

    #[test]
    fn test_preset_only_file_selects_preset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "preset": "rainbow-trail" }"#).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings, Settings::from_preset(Preset::RainbowTrail));
        assert_eq!(settings.physics, Preset::RainbowTrail.physics());
    }

    #[test]
    fn test_json_can_disable_or_add_trail() {
        let json = r#"{ "preset": "rainbow-trail", "trail": null }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.trail, None);

        let settings = Settings::from_json(r#"{ "trail": { "length": 4 } }"#).unwrap();
        assert_eq!(settings.preset, Preset::GrowingBall);
        assert_eq!(settings.physics, Preset::GrowingBall.physics());
        assert_eq!(
            settings.trail,
            Some(TrailSettings {
                length: 4,
                sample_every: TRAIL_SAMPLE_EVERY
            })
        );
    }

    #[test]
    fn test_unknown_preset_in_json() {
        let result = Settings::from_json(r#"{ "preset": "disco" }"#);
        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings::from_preset(Preset::RainbowTrail);
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Settings::load(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(SettingsError::Io { .. })));
    }
}
