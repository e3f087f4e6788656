//! In-memory renderer that records every call.
//!
//! Used by the test suites (and handy for embedding animations in
//! non-terminal contexts) to assert on the exact sequence of terminal
//! operations a session performs.

use std::io;

use parking_lot::Mutex;

use super::{Paint, Renderer, TerminalSize};

/// One recorded renderer call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOp {
    /// `clear_current_line`
    ClearLine,
    /// `write_raw`
    Write(String),
    /// `move_cursor_up`
    MoveUp(u16),
    /// `move_cursor_to`
    MoveTo(u16, u16),
    /// `hide_cursor`
    HideCursor,
    /// `show_cursor`
    ShowCursor,
    /// `clear_screen`
    ClearScreen,
    /// `flush`
    Flush,
}

/// A [`Renderer`] that stores operations instead of writing them.
///
/// `paint` returns the text unchanged so recorded writes stay readable.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    ops: Mutex<Vec<RenderOp>>,
    size: TerminalSize,
    fail_writes: bool,
}

impl RecordingRenderer {
    /// Recorder reporting an 80×24 terminal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorder reporting the given terminal size.
    pub fn with_size(width: u16, height: u16) -> Self {
        Self {
            size: TerminalSize::new(width, height),
            ..Self::default()
        }
    }

    /// Record operations but report every write as failed.
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Snapshot of all recorded operations.
    pub fn ops(&self) -> Vec<RenderOp> {
        self.ops.lock().clone()
    }

    /// Remove and return all recorded operations.
    pub fn take(&self) -> Vec<RenderOp> {
        std::mem::take(&mut *self.ops.lock())
    }

    /// Number of recorded operations equal to `op`.
    pub fn count(&self, op: &RenderOp) -> usize {
        self.ops.lock().iter().filter(|o| *o == op).count()
    }

    /// All `Write` payloads, in order.
    pub fn writes(&self) -> Vec<String> {
        self.ops
            .lock()
            .iter()
            .filter_map(|op| match op {
                RenderOp::Write(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// The last `Write` payload, if any.
    pub fn last_write(&self) -> Option<String> {
        self.writes().pop()
    }

    fn record(&self, op: RenderOp) -> io::Result<()> {
        self.ops.lock().push(op);
        if self.fail_writes {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "recorder set to fail"));
        }
        Ok(())
    }
}

impl Renderer for RecordingRenderer {
    fn clear_current_line(&self) -> io::Result<()> {
        self.record(RenderOp::ClearLine)
    }

    fn write_raw(&self, text: &str) -> io::Result<()> {
        self.record(RenderOp::Write(text.to_string()))
    }

    fn move_cursor_up(&self, lines: u16) -> io::Result<()> {
        self.record(RenderOp::MoveUp(lines))
    }

    fn move_cursor_to(&self, column: u16, row: u16) -> io::Result<()> {
        self.record(RenderOp::MoveTo(column, row))
    }

    fn hide_cursor(&self) -> io::Result<()> {
        self.record(RenderOp::HideCursor)
    }

    fn show_cursor(&self) -> io::Result<()> {
        self.record(RenderOp::ShowCursor)
    }

    fn clear_screen(&self) -> io::Result<()> {
        self.record(RenderOp::ClearScreen)
    }

    fn flush(&self) -> io::Result<()> {
        self.record(RenderOp::Flush)
    }

    fn size(&self) -> TerminalSize {
        self.size
    }

    fn paint(&self, text: &str, _paint: Paint) -> String {
        text.to_string()
    }
}
