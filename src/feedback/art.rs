//! Glyph tables and frame selection.
//!
//! Provides the built-in spinner and bar styles, the validated frame set a
//! spinner animates through, and the bar-fill renderer.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::AnimationError;

/// Characters used by the matrix spinner and the matrix rain effect.
pub const MATRIX_GLYPHS: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789@#$%^&*()_+-=[]{}|;:,./<>?";

const MATRIX_FRAMES: &[&str] = &[
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R",
    "S", "T", "U", "V", "W", "X", "Y", "Z", "0", "1", "2", "3", "4", "5", "6", "7", "8", "9",
    "@", "#", "$", "%", "^", "&", "*", "(", ")", "_", "+", "-", "=", "[", "]", "{", "}", "|",
    ";", ":", ",", ".", "/", "<", ">", "?",
];

/// Built-in spinner animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpinnerStyle {
    /// `| / - \`
    Classic,
    /// Braille dots.
    #[default]
    Dots,
    /// Dense braille dots.
    Dots2,
    /// Braille dots sweeping back and forth.
    Dots3,
    /// Rotating arrow.
    Arrow,
    /// Rotating triangle.
    Triangle,
    /// Quadrant blocks.
    Square,
    /// Half-filled circle.
    Circle,
    /// Quarter circles.
    Quarter,
    /// Moon phases.
    Moon,
    /// Clock faces.
    Clock,
    /// Coloured hearts.
    Hearts,
    /// Rising and falling blocks.
    Blocks,
    /// Bouncing braille dot.
    Bounce,
    /// Snake of braille dots.
    Snake,
    /// `0 1`
    Binary,
    /// Braille helix.
    Dna,
    /// Pulsing circle.
    Pulse,
    /// Random characters, re-drawn every tick.
    Matrix,
    /// Weather icons.
    Weather,
}

impl SpinnerStyle {
    /// Every built-in style, in declaration order.
    pub const ALL: [SpinnerStyle; 20] = [
        SpinnerStyle::Classic,
        SpinnerStyle::Dots,
        SpinnerStyle::Dots2,
        SpinnerStyle::Dots3,
        SpinnerStyle::Arrow,
        SpinnerStyle::Triangle,
        SpinnerStyle::Square,
        SpinnerStyle::Circle,
        SpinnerStyle::Quarter,
        SpinnerStyle::Moon,
        SpinnerStyle::Clock,
        SpinnerStyle::Hearts,
        SpinnerStyle::Blocks,
        SpinnerStyle::Bounce,
        SpinnerStyle::Snake,
        SpinnerStyle::Binary,
        SpinnerStyle::Dna,
        SpinnerStyle::Pulse,
        SpinnerStyle::Matrix,
        SpinnerStyle::Weather,
    ];

    /// The glyph sequence for this style.
    pub const fn glyphs(self) -> &'static [&'static str] {
        match self {
            SpinnerStyle::Classic => &["|", "/", "-", "\\"],
            SpinnerStyle::Dots => &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
            SpinnerStyle::Dots2 => &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"],
            SpinnerStyle::Dots3 => &[
                "⠄", "⠆", "⠇", "⠋", "⠙", "⠸", "⠰", "⠠", "⠰", "⠸", "⠙", "⠋", "⠇", "⠆",
            ],
            SpinnerStyle::Arrow => &["←", "↖", "↑", "↗", "→", "↘", "↓", "↙"],
            SpinnerStyle::Triangle => &["▲", "▶", "▼", "◀"],
            SpinnerStyle::Square => &["▖", "▘", "▝", "▗"],
            SpinnerStyle::Circle => &["◐", "◓", "◑", "◒"],
            SpinnerStyle::Quarter => &["◴", "◷", "◶", "◵"],
            SpinnerStyle::Moon => &["🌑", "🌒", "🌓", "🌔", "🌕", "🌖", "🌗", "🌘"],
            SpinnerStyle::Clock => &[
                "🕐", "🕑", "🕒", "🕓", "🕔", "🕕", "🕖", "🕗", "🕘", "🕙", "🕚", "🕛",
            ],
            SpinnerStyle::Hearts => &["🤍", "🤎", "❤️", "🧡", "💛", "💚", "💙", "💜"],
            SpinnerStyle::Blocks => &[
                "▁", "▂", "▃", "▄", "▅", "▆", "▇", "█", "▇", "▆", "▅", "▄", "▃", "▁",
            ],
            SpinnerStyle::Bounce => &["⠁", "⠂", "⠄", "⠂"],
            SpinnerStyle::Snake => &[
                "⣀", "⣄", "⣤", "⣦", "⣶", "⣷", "⣿", "⢿", "⡿", "⠿", "⢻", "⣛", "⣋", "⣍", "⡋", "⠋",
                "⠙", "⠹", "⢸", "⣸", "⣴", "⣤", "⣄", "⣀",
            ],
            SpinnerStyle::Binary => &["0", "1"],
            SpinnerStyle::Dna => &["⠋", "⠙", "⠸", "⠴", "⠦", "⠇", "⠏", "⠋"],
            SpinnerStyle::Pulse => &["●", "◐", "○", "◑"],
            SpinnerStyle::Matrix => MATRIX_FRAMES,
            SpinnerStyle::Weather => &["☀️", "⛅", "☁️", "🌧️", "⛈️", "🌦️", "🌈"],
        }
    }

    /// Whether frames are drawn at random instead of in sequence.
    pub const fn is_randomized(self) -> bool {
        matches!(self, SpinnerStyle::Matrix)
    }

    /// Lowercase name, as used in config files and on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            SpinnerStyle::Classic => "classic",
            SpinnerStyle::Dots => "dots",
            SpinnerStyle::Dots2 => "dots2",
            SpinnerStyle::Dots3 => "dots3",
            SpinnerStyle::Arrow => "arrow",
            SpinnerStyle::Triangle => "triangle",
            SpinnerStyle::Square => "square",
            SpinnerStyle::Circle => "circle",
            SpinnerStyle::Quarter => "quarter",
            SpinnerStyle::Moon => "moon",
            SpinnerStyle::Clock => "clock",
            SpinnerStyle::Hearts => "hearts",
            SpinnerStyle::Blocks => "blocks",
            SpinnerStyle::Bounce => "bounce",
            SpinnerStyle::Snake => "snake",
            SpinnerStyle::Binary => "binary",
            SpinnerStyle::Dna => "dna",
            SpinnerStyle::Pulse => "pulse",
            SpinnerStyle::Matrix => "matrix",
            SpinnerStyle::Weather => "weather",
        }
    }
}

impl fmt::Display for SpinnerStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SpinnerStyle {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        SpinnerStyle::ALL
            .into_iter()
            .find(|style| style.name() == wanted)
            .ok_or_else(|| AnimationError::UnknownStyle(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Glyphs {
    Builtin(&'static [&'static str]),
    Custom(Arc<[String]>),
}

/// A validated, non-empty glyph sequence a spinner animates through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSet {
    glyphs: Glyphs,
    randomized: bool,
}

impl FrameSet {
    /// Build a sequential frame set from caller-supplied glyphs.
    ///
    /// # Errors
    ///
    /// Returns [`AnimationError::EmptyGlyphs`] if `glyphs` is empty or every
    /// glyph is the empty string.
    pub fn custom<I, S>(glyphs: I) -> Result<Self, AnimationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let glyphs: Vec<String> = glyphs.into_iter().map(Into::into).collect();
        if glyphs.iter().all(String::is_empty) {
            return Err(AnimationError::EmptyGlyphs);
        }
        Ok(Self {
            glyphs: Glyphs::Custom(glyphs.into()),
            randomized: false,
        })
    }

    /// Draw frames uniformly at random instead of cycling.
    pub fn randomized(mut self) -> Self {
        self.randomized = true;
        self
    }

    /// Number of glyphs in the set.
    pub fn len(&self) -> usize {
        match &self.glyphs {
            Glyphs::Builtin(g) => g.len(),
            Glyphs::Custom(g) => g.len(),
        }
    }

    /// Always false: frame sets are validated non-empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether frames are drawn at random.
    pub fn is_randomized(&self) -> bool {
        self.randomized
    }

    fn get(&self, index: usize) -> &str {
        match &self.glyphs {
            Glyphs::Builtin(g) => g[index],
            Glyphs::Custom(g) => &g[index],
        }
    }
}

impl From<SpinnerStyle> for FrameSet {
    fn from(style: SpinnerStyle) -> Self {
        Self {
            glyphs: Glyphs::Builtin(style.glyphs()),
            randomized: style.is_randomized(),
        }
    }
}

impl Default for FrameSet {
    fn default() -> Self {
        SpinnerStyle::default().into()
    }
}

/// Glyph for the given tick.
///
/// Sequential sets wrap around, so `frame_index` and `frame_index + len`
/// give the same glyph. Randomized sets ignore the index and draw
/// uniformly, so repeated calls are not reproducible.
pub fn next_frame(frames: &FrameSet, frame_index: usize) -> &str {
    if frames.randomized {
        return frames.get(rand::rng().random_range(0..frames.len()));
    }
    frames.get(frame_index % frames.len())
}

/// Built-in progress bar glyph styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarStyle {
    /// `█░`
    #[default]
    Blocks,
    /// `▰▱`
    Blocks2,
    /// `>-`
    Arrows,
    /// `= `
    Equals,
    /// `●○`
    Dots,
    /// `| `
    Pipes,
    /// `■□`
    Squares,
    /// `●○`
    Circles,
    /// `♦♢`
    Diamonds,
    /// `█▓▒░`, drawn with the outermost pair.
    Gradient,
}

impl BarStyle {
    /// Every built-in style, in declaration order.
    pub const ALL: [BarStyle; 10] = [
        BarStyle::Blocks,
        BarStyle::Blocks2,
        BarStyle::Arrows,
        BarStyle::Equals,
        BarStyle::Dots,
        BarStyle::Pipes,
        BarStyle::Squares,
        BarStyle::Circles,
        BarStyle::Diamonds,
        BarStyle::Gradient,
    ];

    /// Full glyph ramp, densest first.
    pub const fn ramp(self) -> &'static [char] {
        match self {
            BarStyle::Blocks => &['█', '░'],
            BarStyle::Blocks2 => &['▰', '▱'],
            BarStyle::Arrows => &['>', '-'],
            BarStyle::Equals => &['=', ' '],
            BarStyle::Dots | BarStyle::Circles => &['●', '○'],
            BarStyle::Pipes => &['|', ' '],
            BarStyle::Squares => &['■', '□'],
            BarStyle::Diamonds => &['♦', '♢'],
            BarStyle::Gradient => &['█', '▓', '▒', '░'],
        }
    }

    /// Lowercase name, as used in config files and on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            BarStyle::Blocks => "blocks",
            BarStyle::Blocks2 => "blocks2",
            BarStyle::Arrows => "arrows",
            BarStyle::Equals => "equals",
            BarStyle::Dots => "dots",
            BarStyle::Pipes => "pipes",
            BarStyle::Squares => "squares",
            BarStyle::Circles => "circles",
            BarStyle::Diamonds => "diamonds",
            BarStyle::Gradient => "gradient",
        }
    }
}

impl fmt::Display for BarStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BarStyle {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        BarStyle::ALL
            .into_iter()
            .find(|style| style.name() == wanted)
            .ok_or_else(|| AnimationError::UnknownStyle(s.to_string()))
    }
}

/// The fill/empty pair a bar is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BarGlyphs {
    /// Glyph for completed cells.
    pub fill: char,
    /// Glyph for remaining cells.
    pub empty: char,
}

impl BarGlyphs {
    /// Custom fill/empty pair.
    pub const fn new(fill: char, empty: char) -> Self {
        Self { fill, empty }
    }
}

impl From<BarStyle> for BarGlyphs {
    fn from(style: BarStyle) -> Self {
        let ramp = style.ramp();
        Self {
            fill: ramp[0],
            empty: ramp[ramp.len() - 1],
        }
    }
}

impl Default for BarGlyphs {
    fn default() -> Self {
        BarStyle::default().into()
    }
}

/// Draw a bar of exactly `width` glyphs.
///
/// `fill_ratio` is clamped to `[0, 1]` (NaN counts as 0); the first
/// `floor(fill_ratio * width)` cells use the fill glyph, the rest the empty one.
pub fn render_bar(fill_ratio: f64, width: usize, glyphs: BarGlyphs) -> String {
    let ratio = if fill_ratio.is_nan() {
        0.0
    } else {
        fill_ratio.clamp(0.0, 1.0)
    };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((ratio * width as f64).floor() as usize).min(width);

    let mut bar = String::with_capacity(width * glyphs.fill.len_utf8().max(glyphs.empty.len_utf8()));
    bar.extend(std::iter::repeat(glyphs.fill).take(filled));
    bar.extend(std::iter::repeat(glyphs.empty).take(width - filled));
    bar
}
