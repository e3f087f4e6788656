//! Heat-diffusion fire rising from the bottom row.

use std::io;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;

use super::CellularEffect;
use crate::feedback::AnimationError;
use crate::terminal::{ColorKey, Renderer};

/// Glyph per heat level, coolest first.
pub const FIRE_GLYPHS: [char; 10] = [' ', '.', ':', '^', '*', 'x', 's', 'S', '#', '$'];

/// Heat of the bottom row, and the hottest any cell can get.
pub const MAX_HEAT: u8 = (FIRE_GLYPHS.len() - 1) as u8;

/// Settings for a [`FireEffect`] run.
#[derive(Debug, Clone, PartialEq)]
pub struct FireOptions {
    /// Rows of fire, including the bottom source row.
    pub height: usize,
    /// How long the fire burns at speed 1.0.
    pub duration: Duration,
    /// Upper bound of the random cooling applied per cell per tick.
    pub max_cooling: u8,
    /// Fixed seed for reproducible flames.
    pub seed: Option<u64>,
}

impl Default for FireOptions {
    fn default() -> Self {
        Self {
            height: 10,
            duration: Duration::from_secs(3),
            max_cooling: 2,
            seed: None,
        }
    }
}

/// Glyph for a heat value. Values above [`MAX_HEAT`] use the hottest glyph.
pub fn heat_glyph(heat: u8) -> char {
    FIRE_GLYPHS[usize::from(heat.min(MAX_HEAT))]
}

/// Colour for a heat value; `None` for cold cells.
pub fn heat_key(heat: u8) -> Option<ColorKey> {
    match heat {
        0 => None,
        1..=3 => Some(ColorKey::Ember),
        4..=5 => Some(ColorKey::Flame),
        6..=7 => Some(ColorKey::Blaze),
        _ => Some(ColorKey::Core),
    }
}

/// A grid of heat values. The bottom row stays at [`MAX_HEAT`]; every
/// other cell becomes the average of its neighbourhood minus some random
/// cooling, so heat spreads upward and fades.
#[derive(Debug, Clone)]
pub struct FireEffect {
    heat: Vec<Vec<u8>>,
    width: usize,
    height: usize,
    max_cooling: u8,
}

impl FireEffect {
    /// A cold grid with a burning bottom row.
    ///
    /// # Errors
    ///
    /// Returns [`AnimationError::InvalidHeight`] if `height` is zero.
    pub fn new(width: usize, height: usize) -> Result<Self, AnimationError> {
        if height == 0 {
            return Err(AnimationError::InvalidHeight(height));
        }
        let mut heat = vec![vec![0u8; width]; height];
        heat[height - 1].fill(MAX_HEAT);
        Ok(Self {
            heat,
            width,
            height,
            max_cooling: 2,
        })
    }

    /// Set the cooling bound.
    pub fn with_max_cooling(mut self, max_cooling: u8) -> Self {
        self.max_cooling = max_cooling;
        self
    }

    /// Heat rows, top first.
    pub fn heat(&self) -> &[Vec<u8>] {
        &self.heat
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    fn neighbourhood_mean(grid: &[Vec<u8>], x: usize, y: usize) -> u8 {
        let rows = y.saturating_sub(1)..=(y + 1).min(grid.len() - 1);
        let cols = x.saturating_sub(1)..=(x + 1).min(grid[y].len() - 1);
        let mut sum = 0u32;
        let mut count = 0u32;
        for ny in rows {
            for nx in cols.clone() {
                sum += u32::from(grid[ny][nx]);
                count += 1;
            }
        }
        (sum / count) as u8
    }

    /// The frame as text rows, each cell painted through `paint`.
    fn frame(&self, paint: impl Fn(char, ColorKey) -> String) -> String {
        let mut rows = Vec::with_capacity(self.height);
        for row in &self.heat {
            let mut line = String::with_capacity(self.width);
            for &heat in row {
                let glyph = heat_glyph(heat);
                match heat_key(heat) {
                    Some(key) => line.push_str(&paint(glyph, key)),
                    None => line.push(glyph),
                }
            }
            rows.push(line);
        }
        rows.join("\n")
    }
}

impl CellularEffect for FireEffect {
    fn name(&self) -> &'static str {
        "fire"
    }

    fn step(&mut self, rng: &mut StdRng) {
        if self.width == 0 {
            return;
        }
        let previous = self.heat.clone();
        for y in 0..self.height - 1 {
            for x in 0..self.width {
                let cooling = rng.random_range(0..=self.max_cooling);
                self.heat[y][x] = Self::neighbourhood_mean(&previous, x, y).saturating_sub(cooling);
            }
        }
    }

    fn draw(&self, renderer: &dyn Renderer) -> io::Result<()> {
        let frame = self.frame(|glyph, key| renderer.paint(&glyph.to_string(), key.into()));
        renderer.move_cursor_to(0, 0)?;
        renderer.write_raw(&frame)
    }
}
