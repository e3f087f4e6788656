//! Renderer that writes to stdout through crossterm.

use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, MoveTo, MoveToColumn, MoveUp, Show},
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};

use super::{Paint, Renderer, TerminalSize, Theme};

/// Writes animations to the process's stdout.
///
/// Each call takes the stdout lock for its own duration only, so two
/// uncoordinated animations may still interleave between calls.
#[derive(Debug, Clone)]
pub struct CrosstermRenderer {
    theme: Theme,
    /// When false, `hide_cursor` is a no-op (debug mode).
    hide_cursor: bool,
    /// When false, `paint` returns text unstyled.
    color: bool,
}

impl CrosstermRenderer {
    /// Create a renderer for the given theme.
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            hide_cursor: true,
            color: true,
        }
    }

    /// Keep the cursor visible at all times.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.hide_cursor = !debug;
        self
    }

    /// Enable or disable styling.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// The theme used by `paint`.
    pub fn theme(&self) -> Theme {
        self.theme
    }
}

impl Renderer for CrosstermRenderer {
    fn clear_current_line(&self) -> io::Result<()> {
        let mut out = io::stdout().lock();
        queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        out.flush()
    }

    fn write_raw(&self, text: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        queue!(out, Print(text))?;
        out.flush()
    }

    fn move_cursor_up(&self, lines: u16) -> io::Result<()> {
        if lines == 0 {
            return Ok(());
        }
        let mut out = io::stdout().lock();
        queue!(out, MoveUp(lines))?;
        out.flush()
    }

    fn move_cursor_to(&self, column: u16, row: u16) -> io::Result<()> {
        let mut out = io::stdout().lock();
        queue!(out, MoveTo(column, row))
    }

    fn hide_cursor(&self) -> io::Result<()> {
        if !self.hide_cursor {
            return Ok(());
        }
        let mut out = io::stdout().lock();
        queue!(out, Hide)?;
        out.flush()
    }

    fn show_cursor(&self) -> io::Result<()> {
        let mut out = io::stdout().lock();
        queue!(out, Show)?;
        out.flush()
    }

    fn clear_screen(&self) -> io::Result<()> {
        let mut out = io::stdout().lock();
        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        out.flush()
    }

    fn flush(&self) -> io::Result<()> {
        io::stdout().lock().flush()
    }

    fn size(&self) -> TerminalSize {
        TerminalSize::detect()
    }

    fn paint(&self, text: &str, paint: Paint) -> String {
        if !self.color {
            return text.to_string();
        }
        self.theme.resolve(paint).apply(text).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::{ColorKey, Intensity};

    #[test]
    fn test_paint_without_color_is_plain() {
        let renderer = CrosstermRenderer::new(Theme::Neon).with_color(false);
        assert_eq!(renderer.paint("hi", ColorKey::Accent.into()), "hi");
    }

    #[test]
    fn test_paint_with_color_wraps_text_in_escapes() {
        let renderer = CrosstermRenderer::new(Theme::Default);
        let painted = renderer.paint("hi", Paint::new(ColorKey::Success, Intensity::Bright));
        assert!(painted.contains("hi"));
        assert!(painted.contains('\x1b'));
    }

    #[test]
    fn test_debug_keeps_theme() {
        let renderer = CrosstermRenderer::new(Theme::Retro).with_debug(true);
        assert_eq!(renderer.theme(), Theme::Retro);
    }
}
