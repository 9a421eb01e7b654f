//! Frame loop driver
//!
//! Owns the physics state, the presentation effects and the exporter, and
//! advances them together one frame at a time in strictly increasing order.

use serde::Serialize;

use crate::effects::{FlickerGrid, TrailHistory};
use crate::export::{ExportError, FrameExporter};
use crate::renderer::FrameRenderer;
use crate::settings::{Settings, SettingsError};
use crate::sim::{RngState, SimulationState, StepReport, step};

/// Totals reported at the end of a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub frames_simulated: u64,
    pub frames_exported: u32,
    pub collisions: u64,
    pub boundary_shrinks: u64,
    pub final_ball_radius: f32,
    pub final_boundary_radius: f32,
}

/// Simulation instance holding all loop state
pub struct App {
    settings: Settings,
    seed: u64,
    state: SimulationState,
    trail: Option<TrailHistory>,
    grid: FlickerGrid,
    renderer: FrameRenderer,
    exporter: Option<FrameExporter>,
    collisions: u64,
    shrinks: u64,
}

impl App {
    /// Spawn the ball from `seed`. Without an exporter nothing is rendered.
    ///
    /// Settings are validated first; the loop divides by the cadences and
    /// samples with the flicker probability.
    pub fn new(
        settings: Settings,
        seed: u64,
        exporter: Option<FrameExporter>,
    ) -> Result<Self, SettingsError> {
        settings.validate()?;

        let renderer = FrameRenderer::new(&settings.render);

        let mut rng = RngState::new(seed, RngState::PHYSICS_STREAM).to_rng();
        let state = SimulationState::spawn(&settings.physics, renderer.canvas_center(), &mut rng);

        let trail = settings
            .trail
            .as_ref()
            .map(|t| TrailHistory::new(t.length, state.ball.pos));

        let (rows, cols) = settings.render.glyph_grid_size();
        let grid = FlickerGrid::new(rows, cols, RngState::new(seed, RngState::EFFECTS_STREAM));

        log::info!(
            "Spawned ball at ({:.1}, {:.1}) with velocity ({:.2}, {:.2}), seed {}",
            state.ball.pos.x,
            state.ball.pos.y,
            state.ball.vel.x,
            state.ball.vel.y,
            seed
        );

        Ok(Self {
            settings,
            seed,
            state,
            trail,
            grid,
            renderer,
            exporter,
            collisions: 0,
            shrinks: 0,
        })
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn trail(&self) -> Option<&TrailHistory> {
        self.trail.as_ref()
    }

    pub fn grid(&self) -> &FlickerGrid {
        &self.grid
    }

    pub fn exporter(&self) -> Option<&FrameExporter> {
        self.exporter.as_ref()
    }

    /// Simulate one frame, then update trail, export and background
    pub fn advance(&mut self) -> Result<StepReport, ExportError> {
        let report = step(&mut self.state, &self.settings.physics);

        if let Some(hit) = report.hit {
            self.collisions += 1;
            if hit.shrink > 0.0 {
                self.shrinks += 1;
                log::debug!(
                    "Frame {}: boundary shrank to {:.1} (impact speed {:.2})",
                    report.frame,
                    self.state.boundary.radius,
                    hit.impact_speed
                );
            }
        }

        if let (Some(trail), Some(trail_settings)) = (&mut self.trail, &self.settings.trail) {
            if report.frame % trail_settings.sample_every == 0 {
                trail.push(report.integrated_pos);
            }
        }

        let completed = self.state.frame;
        if let Some(exporter) = &mut self.exporter {
            if completed % self.settings.output.export_every == 0 {
                let frame = self
                    .renderer
                    .render(&self.state, self.trail.as_ref(), &self.grid);
                exporter.write(&frame)?;
            }
        }

        if completed % self.settings.render.flicker_every == 0 {
            self.grid.flicker(self.settings.render.flicker_probability);
        }

        Ok(report)
    }

    /// Run until `max_frames` frames have been simulated
    pub fn run(&mut self, max_frames: u64) -> Result<RunSummary, ExportError> {
        log::info!("Simulating {} frames", max_frames);
        while self.state.frame < max_frames {
            self.advance()?;
            if self.state.frame % 1200 == 0 {
                log::info!(
                    "Frame {}: boundary radius {:.1}, ball radius {:.1}",
                    self.state.frame,
                    self.state.boundary.radius,
                    self.state.ball.radius
                );
            }
        }
        Ok(self.summary())
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            seed: self.seed,
            frames_simulated: self.state.frame,
            frames_exported: self.exporter.as_ref().map_or(0, FrameExporter::saved),
            collisions: self.collisions,
            boundary_shrinks: self.shrinks,
            final_ball_radius: self.state.ball.radius,
            final_boundary_radius: self.state.boundary.radius,
        }
    }
}
