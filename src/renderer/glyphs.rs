//! Built-in 5x7 bitmaps for the background digits

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use crate::effects::Glyph;

pub const GLYPH_COLS: u32 = 5;
pub const GLYPH_ROWS: u32 = 7;

// One row per byte, most significant of the low 5 bits is the leftmost pixel
const ZERO: [u8; 7] = [
    0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110,
];
const ONE: [u8; 7] = [
    0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110,
];

pub fn bitmap(glyph: Glyph) -> &'static [u8; 7] {
    match glyph {
        Glyph::Zero => &ZERO,
        Glyph::One => &ONE,
    }
}

/// Largest pixel scale that fits a glyph in 80% of a cell
pub fn scale_for_cell(cell_width: u32, cell_height: u32) -> u32 {
    let by_width = cell_width * 4 / 5 / GLYPH_COLS;
    let by_height = cell_height * 4 / 5 / GLYPH_ROWS;
    by_width.min(by_height).max(1)
}

/// Draw a glyph with its top-left corner at (x, y); clipped to the image
pub fn draw_glyph(img: &mut RgbImage, glyph: Glyph, x: i32, y: i32, scale: u32, color: Rgb<u8>) {
    let step = scale as i32;
    for (row, bits) in bitmap(glyph).iter().enumerate() {
        for col in 0..GLYPH_COLS {
            if (bits >> (GLYPH_COLS - 1 - col)) & 1 == 1 {
                let px = x + col as i32 * step;
                let py = y + row as i32 * step;
                draw_filled_rect_mut(img, Rect::at(px, py).of_size(scale, scale), color);
            }
        }
    }
}
