//! Frame colors

use image::Rgb;

pub const BACKGROUND: Rgb<u8> = Rgb([0, 0, 0]);
pub const GLYPH: Rgb<u8> = Rgb([0, 255, 0]);
pub const RING: Rgb<u8> = Rgb([0, 0, 255]);
pub const BALL: Rgb<u8> = Rgb([255, 255, 255]);

/// Trail colors from oldest to newest
pub const TRAIL: [Rgb<u8>; 10] = [
    Rgb([255, 0, 0]),
    Rgb([255, 165, 0]),
    Rgb([255, 255, 0]),
    Rgb([0, 255, 0]),
    Rgb([0, 255, 255]),
    Rgb([0, 0, 255]),
    Rgb([128, 0, 128]),
    Rgb([255, 105, 180]),
    Rgb([139, 69, 19]),
    Rgb([255, 255, 255]),
];

/// Color of trail slot `index` (0 = oldest) in a trail of `len` slots.
/// The newest slot always takes the last palette entry.
pub fn trail_color(index: usize, len: usize) -> Rgb<u8> {
    let from_newest = len.saturating_sub(index + 1) % TRAIL.len();
    TRAIL[TRAIL.len() - 1 - from_newest]
}
