//! Falling-glyph "digital rain".

use std::io;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;

use super::CellularEffect;
use crate::feedback::art::MATRIX_GLYPHS;
use crate::feedback::{AnimationError, SpeedFactor};
use crate::terminal::{ColorKey, Intensity, Paint, Renderer, TerminalSize};

/// Rows left free below the rain.
const BOTTOM_MARGIN: u16 = 2;

/// Settings for a [`MatrixRain`] run.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixRainOptions {
    /// Chance, per column, that a drop is falling there.
    pub density: f64,
    /// How long the rain runs at speed 1.0.
    pub duration: Duration,
    /// Colour of the glyphs.
    pub color: ColorKey,
    /// Fixed seed for reproducible rain.
    pub seed: Option<u64>,
}

impl Default for MatrixRainOptions {
    fn default() -> Self {
        Self {
            density: 0.1,
            duration: Duration::from_secs(5),
            color: ColorKey::Primary,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct RainDrop {
    glyphs: Vec<char>,
    y: f64,
    speed: f64,
}

/// One drawn cell: column, row, glyph and brightness.
pub type RainCell = (u16, u16, char, Intensity);

/// Columns of glyphs sliding down the screen.
///
/// Every column is either dark or carries one drop. A drop's lead glyph
/// is brightest and its trail fades; when the trail has left the screen
/// the column respawns above the top with probability `density`.
#[derive(Debug, Clone)]
pub struct MatrixRain {
    columns: Vec<Option<RainDrop>>,
    height: usize,
    density: f64,
    color: ColorKey,
    speed: SpeedFactor,
    alphabet: Vec<char>,
}

fn new_drop(alphabet: &[char], height: usize, y: f64, rng: &mut impl Rng) -> RainDrop {
    RainDrop {
        glyphs: (0..height)
            .map(|_| alphabet[rng.random_range(0..alphabet.len())])
            .collect(),
        y,
        speed: rng.random_range(0.5..2.0),
    }
}

impl MatrixRain {
    /// Seed the columns for a screen of `size`.
    ///
    /// # Errors
    ///
    /// Returns [`AnimationError::InvalidDensity`] unless `options.density`
    /// is within `[0, 1]`.
    pub fn new(
        size: TerminalSize,
        options: &MatrixRainOptions,
        speed: SpeedFactor,
        rng: &mut StdRng,
    ) -> Result<Self, AnimationError> {
        let density = options.density;
        if !(0.0..=1.0).contains(&density) {
            return Err(AnimationError::InvalidDensity(density));
        }

        let height = usize::from(size.height.saturating_sub(BOTTOM_MARGIN));
        let alphabet: Vec<char> = MATRIX_GLYPHS.chars().collect();
        let columns = (0..size.width)
            .map(|_| {
                rng.random_bool(density).then(|| {
                    let y = rng.random_range(0..=height) as f64;
                    new_drop(&alphabet, height, y, rng)
                })
            })
            .collect();

        Ok(Self {
            columns,
            height,
            density,
            color: options.color,
            speed,
            alphabet,
        })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows rain falls through.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Columns currently carrying a drop.
    pub fn active_columns(&self) -> usize {
        self.columns.iter().filter(|c| c.is_some()).count()
    }

    /// Every visible glyph of the current frame.
    pub fn cells(&self) -> Vec<RainCell> {
        let mut cells = Vec::new();
        for (x, column) in self.columns.iter().enumerate() {
            let Some(drop) = column else { continue };
            for row in 0..self.height {
                let index = (drop.y - row as f64).floor();
                if index < 0.0 || index >= drop.glyphs.len() as f64 {
                    continue;
                }
                let index = index as usize;
                let intensity = match index {
                    0 => Intensity::Bright,
                    1 | 2 => Intensity::Normal,
                    _ => Intensity::Dim,
                };
                cells.push((x as u16, row as u16, drop.glyphs[index], intensity));
            }
        }
        cells
    }
}

impl CellularEffect for MatrixRain {
    fn name(&self) -> &'static str {
        "matrix"
    }

    fn step(&mut self, rng: &mut StdRng) {
        let bottom = self.height as f64;
        for column in &mut self.columns {
            let Some(drop) = column.as_mut() else { continue };
            drop.y += drop.speed / self.speed.get();
            if drop.y > bottom + drop.glyphs.len() as f64 {
                *column = rng.random_bool(self.density).then(|| {
                    let y = -f64::from(rng.random_range(5..=15u8));
                    new_drop(&self.alphabet, self.height, y, rng)
                });
            }
        }
    }

    fn draw(&self, renderer: &dyn Renderer) -> io::Result<()> {
        renderer.clear_screen()?;
        let mut buf = [0u8; 4];
        for (x, y, glyph, intensity) in self.cells() {
            renderer.move_cursor_to(x, y)?;
            let text = glyph.encode_utf8(&mut buf);
            renderer.write_raw(&renderer.paint(text, Paint::new(self.color, intensity)))?;
        }
        Ok(())
    }
}
