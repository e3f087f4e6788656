//! Colour themes.
//!
//! A theme resolves a [`ColorKey`] to a crossterm [`ContentStyle`].

use std::fmt;
use std::str::FromStr;

use crossterm::style::{Attribute, Color, ContentStyle};
use serde::{Deserialize, Serialize};

use super::{ColorKey, Intensity, Paint};

/// Built-in colour themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Plain white text with cyan/magenta accents.
    #[default]
    Default,
    /// Greens on black.
    Matrix,
    /// Bright cyan, magenta and red.
    Cyberpunk,
    /// Amber terminal.
    Retro,
    /// Almost colourless.
    Minimal,
    /// Cyans and blues.
    Ocean,
    /// Yellows and reds.
    Sunset,
    /// Bright magenta and cyan.
    Neon,
}

fn fg(color: Color) -> ContentStyle {
    ContentStyle {
        foreground_color: Some(color),
        ..ContentStyle::new()
    }
}

fn with_bg(mut style: ContentStyle, color: Color) -> ContentStyle {
    style.background_color = Some(color);
    style
}

fn with_attr(mut style: ContentStyle, attribute: Attribute) -> ContentStyle {
    style.attributes.set(attribute);
    style
}

fn bright(color: Color) -> ContentStyle {
    with_attr(fg(color), Attribute::Bold)
}

impl Theme {
    /// Every theme, in declaration order.
    pub const ALL: [Theme; 8] = [
        Theme::Default,
        Theme::Matrix,
        Theme::Cyberpunk,
        Theme::Retro,
        Theme::Minimal,
        Theme::Ocean,
        Theme::Sunset,
        Theme::Neon,
    ];

    /// Lowercase name, as used in config files and on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::Matrix => "matrix",
            Theme::Cyberpunk => "cyberpunk",
            Theme::Retro => "retro",
            Theme::Minimal => "minimal",
            Theme::Ocean => "ocean",
            Theme::Sunset => "sunset",
            Theme::Neon => "neon",
        }
    }

    /// Resolve a semantic key to a base style.
    pub fn style(self, key: ColorKey) -> ContentStyle {
        use Color::*;

        match key {
            ColorKey::Ember => return self.heat(DarkRed),
            ColorKey::Flame => return self.heat(DarkYellow),
            ColorKey::Blaze => return self.heat(Yellow),
            ColorKey::Core => return self.heat(White),
            _ => {}
        }

        match (self, key) {
            (Theme::Default, ColorKey::Primary) => fg(Grey),
            (Theme::Default, ColorKey::Secondary) => fg(DarkCyan),
            (Theme::Default, ColorKey::Success) => fg(DarkGreen),
            (Theme::Default, ColorKey::Warning) => fg(DarkYellow),
            (Theme::Default, ColorKey::Error) => fg(DarkRed),
            (Theme::Default, ColorKey::Critical) => bright(DarkRed),
            (Theme::Default, ColorKey::Info) => fg(DarkBlue),
            (Theme::Default, ColorKey::Accent) => fg(DarkMagenta),
            (Theme::Default, ColorKey::Highlight) => with_attr(ContentStyle::new(), Attribute::Bold),

            (Theme::Matrix, ColorKey::Primary) => fg(DarkGreen),
            (Theme::Matrix, ColorKey::Secondary) => fg(Green),
            (Theme::Matrix, ColorKey::Success) => bright(DarkGreen),
            (Theme::Matrix, ColorKey::Warning) => with_attr(fg(DarkYellow), Attribute::Dim),
            (Theme::Matrix, ColorKey::Error) => with_bg(fg(DarkRed), Black),
            (Theme::Matrix, ColorKey::Critical) => with_bg(bright(DarkRed), Black),
            (Theme::Matrix, ColorKey::Info) => with_attr(fg(DarkGreen), Attribute::Dim),
            (Theme::Matrix, ColorKey::Accent) => fg(Green),
            (Theme::Matrix, ColorKey::Highlight) => bright(DarkGreen),

            (Theme::Cyberpunk, ColorKey::Primary) => fg(Cyan),
            (Theme::Cyberpunk, ColorKey::Secondary) => fg(Magenta),
            (Theme::Cyberpunk, ColorKey::Success) => fg(Green),
            (Theme::Cyberpunk, ColorKey::Warning) => fg(Yellow),
            (Theme::Cyberpunk, ColorKey::Error) => with_bg(fg(DarkRed), DarkYellow),
            (Theme::Cyberpunk, ColorKey::Critical) => bright(Red),
            (Theme::Cyberpunk, ColorKey::Info) => fg(Blue),
            (Theme::Cyberpunk, ColorKey::Accent) => fg(Red),
            (Theme::Cyberpunk, ColorKey::Highlight) => bright(Cyan),

            (Theme::Retro, ColorKey::Primary) => fg(DarkYellow),
            (Theme::Retro, ColorKey::Secondary) => fg(DarkCyan),
            (Theme::Retro, ColorKey::Success) => fg(DarkGreen),
            (Theme::Retro, ColorKey::Warning) => fg(DarkYellow),
            (Theme::Retro, ColorKey::Error) => fg(DarkRed),
            (Theme::Retro, ColorKey::Critical) => bright(DarkRed),
            (Theme::Retro, ColorKey::Info) => fg(DarkBlue),
            (Theme::Retro, ColorKey::Accent) => fg(DarkMagenta),
            (Theme::Retro, ColorKey::Highlight) => bright(DarkYellow),

            (Theme::Minimal, ColorKey::Error | ColorKey::Critical) => fg(DarkRed),
            (Theme::Minimal, ColorKey::Info) => fg(DarkGrey),
            (Theme::Minimal, ColorKey::Highlight) => with_attr(ContentStyle::new(), Attribute::Bold),
            (Theme::Minimal, _) => fg(Grey),

            (Theme::Ocean, ColorKey::Primary) => fg(DarkCyan),
            (Theme::Ocean, ColorKey::Secondary) => fg(DarkBlue),
            (Theme::Ocean, ColorKey::Success) => fg(DarkGreen),
            (Theme::Ocean, ColorKey::Warning) => fg(DarkYellow),
            (Theme::Ocean, ColorKey::Error) => fg(DarkRed),
            (Theme::Ocean, ColorKey::Critical) => bright(DarkRed),
            (Theme::Ocean, ColorKey::Info) => fg(Blue),
            (Theme::Ocean, ColorKey::Accent) => fg(Cyan),
            (Theme::Ocean, ColorKey::Highlight) => bright(DarkCyan),

            (Theme::Sunset, ColorKey::Primary) => fg(Yellow),
            (Theme::Sunset, ColorKey::Secondary) => fg(Red),
            (Theme::Sunset, ColorKey::Success) => fg(DarkGreen),
            (Theme::Sunset, ColorKey::Warning) => fg(DarkYellow),
            (Theme::Sunset, ColorKey::Error) => fg(DarkRed),
            (Theme::Sunset, ColorKey::Critical) => bright(DarkRed),
            (Theme::Sunset, ColorKey::Info) => fg(Magenta),
            (Theme::Sunset, ColorKey::Accent) => fg(Yellow),
            (Theme::Sunset, ColorKey::Highlight) => bright(Yellow),

            (Theme::Neon, ColorKey::Primary) => fg(Magenta),
            (Theme::Neon, ColorKey::Secondary) => fg(Cyan),
            (Theme::Neon, ColorKey::Success) => fg(Green),
            (Theme::Neon, ColorKey::Warning) => fg(Yellow),
            (Theme::Neon, ColorKey::Error) => fg(Red),
            (Theme::Neon, ColorKey::Critical) => bright(Red),
            (Theme::Neon, ColorKey::Info) => fg(Blue),
            (Theme::Neon, ColorKey::Accent) => fg(Magenta),
            (Theme::Neon, ColorKey::Highlight) => bright(Magenta),

            // Muted is the same grey everywhere.
            (_, ColorKey::Muted) => fg(DarkGrey),
            (_, _) => ContentStyle::new(),
        }
    }

    /// Resolve a paint request, applying its intensity.
    pub fn resolve(self, paint: Paint) -> ContentStyle {
        let style = self.style(paint.key);
        match paint.intensity {
            Intensity::Normal => style,
            Intensity::Bright => with_attr(style, Attribute::Bold),
            Intensity::Dim => with_attr(style, Attribute::Dim),
        }
    }

    fn heat(self, color: Color) -> ContentStyle {
        match self {
            Theme::Minimal => ContentStyle::new(),
            _ => fg(color),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown theme name.
#[derive(Debug, thiserror::Error)]
#[error("Unknown theme: {0} (expected one of default, matrix, cyberpunk, retro, minimal, ocean, sunset, neon)")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Theme::ALL
            .into_iter()
            .find(|theme| theme.name() == wanted)
            .ok_or_else(|| UnknownTheme(s.to_string()))
    }
}
