//! Frame rasterizer
//!
//! Draw order: glyph background, ring (which masks the background inside
//! it), ball, trailing balls. The canvas is then downsampled to output size.

use glam::Vec2;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;

use super::glyphs::{draw_glyph, scale_for_cell};
use super::palette;
use crate::effects::{FlickerGrid, TrailHistory};
use crate::settings::RenderSettings;
use crate::sim::SimulationState;

/// Renders simulation frames into RGB images
pub struct FrameRenderer {
    settings: RenderSettings,
    /// Supersampled scratch canvas, reused between frames
    canvas: RgbImage,
    glyph_scale: u32,
}

impl FrameRenderer {
    pub fn new(settings: &RenderSettings) -> Self {
        let (w, h) = settings.canvas_size();
        Self {
            settings: settings.clone(),
            canvas: RgbImage::from_pixel(w, h, palette::BACKGROUND),
            glyph_scale: scale_for_cell(settings.glyph_cell_width, settings.glyph_cell_height),
        }
    }

    /// Center of the supersampled canvas, where the ring sits
    pub fn canvas_center(&self) -> Vec2 {
        let (w, h) = self.settings.canvas_size();
        Vec2::new((w / 2) as f32, (h / 2) as f32)
    }

    /// Render one frame at output resolution
    pub fn render(
        &mut self,
        state: &SimulationState,
        trail: Option<&TrailHistory>,
        grid: &FlickerGrid,
    ) -> RgbImage {
        for pixel in self.canvas.pixels_mut() {
            *pixel = palette::BACKGROUND;
        }
        self.draw_background(grid);

        let boundary = &state.boundary;
        let center = to_point(boundary.center);
        // Outer disc in ring color, interior punched back out to black
        draw_filled_circle_mut(&mut self.canvas, center, round(boundary.radius), palette::RING);
        draw_filled_circle_mut(
            &mut self.canvas,
            center,
            round(boundary.inner_radius()),
            palette::BACKGROUND,
        );

        let ball = &state.ball;
        self.draw_disc(ball.pos, ball.radius, palette::BALL);

        if let Some(trail) = trail {
            let len = trail.len();
            for (i, pos) in trail.iter().enumerate() {
                self.draw_disc(pos, ball.radius, palette::trail_color(i, len));
            }
        }

        self.downsample()
    }

    fn draw_background(&mut self, grid: &FlickerGrid) {
        let cell_w = self.settings.glyph_cell_width as i32;
        let cell_h = self.settings.glyph_cell_height as i32;
        for (row, col, glyph) in grid.iter() {
            let x = col as i32 * cell_w;
            let y = row as i32 * cell_h;
            draw_glyph(&mut self.canvas, glyph, x, y, self.glyph_scale, palette::GLYPH);
        }
    }

    fn draw_disc(&mut self, pos: Vec2, radius: f32, color: Rgb<u8>) {
        draw_filled_circle_mut(&mut self.canvas, to_point(pos), round(radius), color);
    }

    fn downsample(&self) -> RgbImage {
        if self.settings.supersample == 1 {
            return self.canvas.clone();
        }
        imageops::resize(
            &self.canvas,
            self.settings.width,
            self.settings.height,
            FilterType::Triangle,
        )
    }
}

/// Pixel position, truncated toward zero
#[inline]
fn to_point(pos: Vec2) -> (i32, i32) {
    (pos.x as i32, pos.y as i32)
}

#[inline]
fn round(radius: f32) -> i32 {
    radius.round() as i32
}
