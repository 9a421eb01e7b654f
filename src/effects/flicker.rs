//! Background grid of flickering binary digits

use rand::Rng;
use rand_pcg::Pcg32;

use crate::sim::RngState;

/// A single background symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Zero,
    One,
}

impl Glyph {
    pub fn toggled(self) -> Self {
        match self {
            Glyph::Zero => Glyph::One,
            Glyph::One => Glyph::Zero,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Glyph::Zero => '0',
            Glyph::One => '1',
        }
    }
}

/// Row-major grid of glyphs with its own random stream
#[derive(Debug, Clone)]
pub struct FlickerGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Glyph>,
    rng: Pcg32,
}

impl FlickerGrid {
    /// Fill a grid with random glyphs
    pub fn new(rows: usize, cols: usize, rng_state: RngState) -> Self {
        let mut rng = rng_state.to_rng();
        let cells = (0..rows * cols)
            .map(|_| if rng.random_bool(0.5) { Glyph::One } else { Glyph::Zero })
            .collect();
        Self {
            rows,
            cols,
            cells,
            rng,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Glyph> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col).copied()
    }

    /// Toggle each cell independently with the given probability.
    /// Returns how many cells changed.
    pub fn flicker(&mut self, probability: f64) -> usize {
        let mut toggled = 0;
        for cell in &mut self.cells {
            if self.rng.random_bool(probability) {
                *cell = cell.toggled();
                toggled += 1;
            }
        }
        toggled
    }

    /// Iterate `(row, col, glyph)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Glyph)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, glyph)| (i / self.cols, i % self.cols, *glyph))
    }
}
