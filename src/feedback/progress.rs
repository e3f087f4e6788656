//! Single-line progress bar with throttled repaints and ETA.

use std::sync::Arc;
use std::time::{Duration, Instant};

use super::art::{render_bar, BarGlyphs};
use super::session::SessionId;
use super::throttle::{should_render, Clock};
use crate::terminal::{best_effort, ColorKey, Renderer};

/// Minimum gap between two repaints triggered by `update`.
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(50);

/// Widest bar drawn when no width is configured.
pub const MAX_AUTO_WIDTH: usize = 40;

/// Columns reserved for the message, percentage and counters.
const RESERVED_COLUMNS: usize = 30;

/// How a progress bar looks and how often it repaints.
#[derive(Debug, Clone)]
pub struct ProgressOptions {
    /// Fill and empty glyphs.
    pub glyphs: BarGlyphs,
    /// Bar width in cells. `None` sizes it from the terminal.
    pub width: Option<usize>,
    /// Draw the percentage column.
    pub show_percentage: bool,
    /// Draw the ETA (or elapsed time once complete).
    pub show_eta: bool,
    /// Colour of an incomplete bar.
    pub color: ColorKey,
    /// Minimum time between throttled repaints.
    pub throttle: Duration,
}

impl Default for ProgressOptions {
    fn default() -> Self {
        Self {
            glyphs: BarGlyphs::default(),
            width: None,
            show_percentage: true,
            show_eta: true,
            color: ColorKey::Accent,
            throttle: DEFAULT_THROTTLE,
        }
    }
}

/// Bar width for a terminal `columns` wide: `min(40, columns - 30)`, at least 1.
pub fn auto_width(columns: u16) -> usize {
    (usize::from(columns).saturating_sub(RESERVED_COLUMNS)).clamp(1, MAX_AUTO_WIDTH)
}

/// A counter from 0 to `total` drawn as a bar on the current line.
///
/// Updates repaint synchronously, at most once per throttle interval,
/// except that reaching `total` always repaints. The counter never
/// exceeds `total` but may move backwards through
/// [`ProgressBar::set_progress`].
///
/// A bar added to a [`super::MultiProgress`] is *managed*: it keeps
/// counting but never draws itself.
pub struct ProgressBar {
    id: SessionId,
    message: String,
    total: u64,
    current: u64,
    glyphs: BarGlyphs,
    width: usize,
    show_percentage: bool,
    show_eta: bool,
    color: ColorKey,
    throttle: Duration,
    started: Instant,
    last_render: Instant,
    finished: bool,
    managed: bool,
    renderer: Arc<dyn Renderer>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for ProgressBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressBar")
            .field("id", &self.id)
            .field("message", &self.message)
            .field("current", &self.current)
            .field("total", &self.total)
            .field("finished", &self.finished)
            .field("managed", &self.managed)
            .finish_non_exhaustive()
    }
}

impl ProgressBar {
    /// A bar at 0 of `total`. Nothing is drawn until the first update.
    pub fn new(
        message: impl Into<String>,
        total: u64,
        options: ProgressOptions,
        renderer: Arc<dyn Renderer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let width = options
            .width
            .map_or_else(|| auto_width(renderer.size().width), |w| w.max(1));
        let now = clock.now();
        Self {
            id: SessionId::next(),
            message: message.into(),
            total,
            current: 0,
            glyphs: options.glyphs,
            width,
            show_percentage: options.show_percentage,
            show_eta: options.show_eta,
            color: options.color,
            throttle: options.throttle,
            started: now,
            last_render: now,
            finished: false,
            managed: false,
            renderer,
            clock,
        }
    }

    pub(crate) fn into_managed(mut self) -> Self {
        self.managed = true;
        self
    }

    /// Advance by `amount`, clamped at `total`, and repaint if due.
    pub fn update(&mut self, amount: u64) {
        if self.finished {
            return;
        }
        self.current = self.current.saturating_add(amount).min(self.total);
        if self.managed {
            return;
        }
        let now = self.clock.now();
        if should_render(now, self.last_render, self.throttle, self.is_complete()) {
            self.last_render = now;
            self.render();
        }
    }

    /// Jump to `value`, clamped at `total`, and repaint immediately.
    ///
    /// Moving backwards is allowed and is drawn as-is.
    pub fn set_progress(&mut self, value: u64) {
        if self.finished {
            return;
        }
        self.current = value.min(self.total);
        if self.managed {
            return;
        }
        self.last_render = self.clock.now();
        self.render();
    }

    /// Jump to `total`, repaint and move to the next line. Idempotent.
    pub fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.current = self.total;
        self.finished = true;
        if self.managed {
            return;
        }
        self.render();
        best_effort("write_raw", self.renderer.write_raw("\n"));
        best_effort("flush", self.renderer.flush());
        tracing::debug!(id = %self.id, elapsed = ?self.elapsed(), "progress finished");
    }

    /// Replace the label drawn before the bar.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    /// Redraw the current line. Managed bars never draw.
    pub fn render(&self) {
        if self.managed {
            return;
        }
        let line = self.line();
        best_effort("clear_current_line", self.renderer.clear_current_line());
        best_effort("write_raw", self.renderer.write_raw(&line));
        best_effort("flush", self.renderer.flush());
    }

    /// The full text of the bar line, without cursor movement.
    pub fn line(&self) -> String {
        let ratio = if self.total == 0 {
            1.0
        } else {
            self.current as f64 / self.total as f64
        };
        let bar = render_bar(ratio, self.width, self.glyphs);
        let key = if self.is_complete() {
            ColorKey::Success
        } else {
            self.color
        };

        let mut parts = vec![
            format!("{}:", self.message),
            format!("[{}]", self.renderer.paint(&bar, key.into())),
        ];
        if self.show_percentage {
            parts.push(format!("{:>3}%", self.percentage()));
        }
        if self.show_eta && self.current > 0 {
            let elapsed = self.elapsed().as_secs_f64();
            match self.eta() {
                Some(eta) => parts.push(format!("ETA: {:.1}s", eta.as_secs_f64())),
                None => parts.push(format!("Done in {elapsed:.1}s")),
            }
        }
        parts.push(format!("({}/{})", self.current, self.total));
        parts.join(" ")
    }

    /// Whole percent complete. A zero total counts as 100%.
    pub fn percentage(&self) -> u64 {
        if self.total == 0 {
            return 100;
        }
        (u128::from(self.current) * 100 / u128::from(self.total)) as u64
    }

    /// Projected time to completion from the average rate so far.
    ///
    /// `None` before any progress and once complete.
    pub fn eta(&self) -> Option<Duration> {
        if self.current == 0 || self.is_complete() {
            return None;
        }
        let per_unit = self.elapsed().as_secs_f64() / self.current as f64;
        let remaining = (self.total - self.current) as f64;
        Some(Duration::from_secs_f64(per_unit * remaining))
    }

    /// Time since the bar was created.
    pub fn elapsed(&self) -> Duration {
        self.clock.now().saturating_duration_since(self.started)
    }

    /// Current count.
    pub fn current(&self) -> u64 {
        self.current
    }

    /// Target count.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Label drawn before the bar.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Bar width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Whether `current` has reached `total`.
    pub fn is_complete(&self) -> bool {
        self.current >= self.total
    }

    /// Whether [`ProgressBar::finish`] has run.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Session identity.
    pub fn id(&self) -> SessionId {
        self.id
    }
}

impl Drop for ProgressBar {
    fn drop(&mut self) {
        if !self.managed {
            self.finish();
        }
    }
}
