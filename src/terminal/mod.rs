//! Terminal output collaborator.
//!
//! Every animation in this crate paints through a [`Renderer`]. The renderer
//! owns escape sequences, colour and cursor state; animations only ask it to
//! clear, write, move and style text by semantic [`ColorKey`].

mod crossterm_renderer;
mod recording;
pub mod theme;

use std::fmt;
use std::io;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use crossterm_renderer::CrosstermRenderer;
pub use recording::{RecordingRenderer, RenderOp};
pub use theme::Theme;

/// Width used when the terminal size cannot be queried.
pub const FALLBACK_WIDTH: u16 = 80;
/// Height used when the terminal size cannot be queried.
pub const FALLBACK_HEIGHT: u16 = 24;

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSize {
    /// Number of columns.
    pub width: u16,
    /// Number of rows.
    pub height: u16,
}

impl TerminalSize {
    /// Create a size from columns and rows.
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Query the real terminal, falling back to 80×24.
    pub fn detect() -> Self {
        match crossterm::terminal::size() {
            Ok((width, height)) if width > 0 && height > 0 => Self { width, height },
            Ok(_) => Self::default(),
            Err(e) => {
                tracing::debug!("terminal size unavailable, using fallback: {e}");
                Self::default()
            }
        }
    }
}

impl Default for TerminalSize {
    fn default() -> Self {
        Self::new(FALLBACK_WIDTH, FALLBACK_HEIGHT)
    }
}

/// Semantic colour keys resolved by a [`Theme`].
///
/// Animations never name concrete colours. The fire ramp keys
/// (`Ember` through `Core`) describe heat levels, coolest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorKey {
    /// Main text colour.
    #[default]
    Primary,
    /// Supporting text colour.
    Secondary,
    /// Completed work.
    Success,
    /// Something needs attention.
    Warning,
    /// Something failed.
    Error,
    /// Something failed badly.
    Critical,
    /// Informational text.
    Info,
    /// Animated elements in progress.
    Accent,
    /// De-emphasised text.
    Muted,
    /// Emphasised text.
    Highlight,
    /// Faint heat.
    Ember,
    /// Moderate heat.
    Flame,
    /// Strong heat.
    Blaze,
    /// Hottest heat.
    Core,
}

impl ColorKey {
    /// Every key, in declaration order.
    pub const ALL: [ColorKey; 14] = [
        ColorKey::Primary,
        ColorKey::Secondary,
        ColorKey::Success,
        ColorKey::Warning,
        ColorKey::Error,
        ColorKey::Critical,
        ColorKey::Info,
        ColorKey::Accent,
        ColorKey::Muted,
        ColorKey::Highlight,
        ColorKey::Ember,
        ColorKey::Flame,
        ColorKey::Blaze,
        ColorKey::Core,
    ];

    /// Lowercase name, as used in config files and on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            ColorKey::Primary => "primary",
            ColorKey::Secondary => "secondary",
            ColorKey::Success => "success",
            ColorKey::Warning => "warning",
            ColorKey::Error => "error",
            ColorKey::Critical => "critical",
            ColorKey::Info => "info",
            ColorKey::Accent => "accent",
            ColorKey::Muted => "muted",
            ColorKey::Highlight => "highlight",
            ColorKey::Ember => "ember",
            ColorKey::Flame => "flame",
            ColorKey::Blaze => "blaze",
            ColorKey::Core => "core",
        }
    }
}

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown colour key.
#[derive(Debug, thiserror::Error)]
#[error("Unknown color key: {0}")]
pub struct UnknownColorKey(pub String);

impl FromStr for ColorKey {
    type Err = UnknownColorKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ColorKey::ALL
            .into_iter()
            .find(|key| key.name() == wanted)
            .ok_or_else(|| UnknownColorKey(s.to_string()))
    }
}

/// Brightness applied on top of a colour key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Intensity {
    /// Bold / bright.
    Bright,
    /// Unmodified.
    #[default]
    Normal,
    /// Faint.
    Dim,
}

/// A styling request: semantic key plus intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Paint {
    /// Colour to resolve through the theme.
    pub key: ColorKey,
    /// Brightness modifier.
    pub intensity: Intensity,
}

impl Paint {
    /// Paint with the given key at the given intensity.
    pub const fn new(key: ColorKey, intensity: Intensity) -> Self {
        Self { key, intensity }
    }
}

impl From<ColorKey> for Paint {
    fn from(key: ColorKey) -> Self {
        Self {
            key,
            intensity: Intensity::Normal,
        }
    }
}

/// The terminal primitives animations are built from.
///
/// Implementations must be safe to call from the background loop of one
/// animation while the foreground thread holds another reference.
/// Sessions treat every `io::Error` as best-effort and keep going.
pub trait Renderer: Send + Sync {
    /// Return the cursor to column 0 and erase the current line.
    fn clear_current_line(&self) -> io::Result<()>;

    /// Write text verbatim at the cursor.
    fn write_raw(&self, text: &str) -> io::Result<()>;

    /// Move the cursor up `lines` rows.
    fn move_cursor_up(&self, lines: u16) -> io::Result<()>;

    /// Move the cursor to a zero-based cell.
    fn move_cursor_to(&self, column: u16, row: u16) -> io::Result<()>;

    /// Hide the cursor.
    fn hide_cursor(&self) -> io::Result<()>;

    /// Show the cursor.
    fn show_cursor(&self) -> io::Result<()>;

    /// Erase the whole screen and home the cursor.
    fn clear_screen(&self) -> io::Result<()>;

    /// Flush buffered output.
    fn flush(&self) -> io::Result<()>;

    /// Current terminal size.
    fn size(&self) -> TerminalSize;

    /// Return `text` styled for display.
    fn paint(&self, text: &str, paint: Paint) -> String;
}

/// Log-and-continue wrapper for renderer calls.
pub(crate) fn best_effort(op: &str, result: io::Result<()>) {
    if let Err(e) = result {
        tracing::debug!(op, "terminal write failed: {e}");
    }
}
