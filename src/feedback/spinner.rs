//! Inline spinner for showing activity during long-running operations.
//!
//! The spinner repaints one terminal line from a background thread. Its
//! message and suffix can be replaced at any time from the owning thread;
//! the loop always draws a consistent (message, suffix) pair.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};

use super::art::{next_frame, FrameSet};
use super::session::{SessionId, SessionState, SessionStatus, SpeedFactor};
use super::ticker::{TickFlow, Ticker};
use super::{AnimationError, STOP_JOIN_BOUND};
use crate::lifecycle::{ActiveSessions, Stoppable};
use crate::terminal::{best_effort, ColorKey, Renderer};

/// Default time between frames at speed 1.0.
pub const DEFAULT_SPINNER_INTERVAL: Duration = Duration::from_millis(100);

/// How a spinner looks and how fast it turns.
#[derive(Debug, Clone)]
pub struct SpinnerOptions {
    /// Glyphs to cycle through.
    pub frames: FrameSet,
    /// Colour of the glyph.
    pub color: ColorKey,
    /// Text drawn right after the message.
    pub suffix: String,
    /// Frame interval before speed scaling.
    pub interval: Duration,
    /// Speed multiplier applied to `interval`.
    pub speed: SpeedFactor,
}

impl Default for SpinnerOptions {
    fn default() -> Self {
        Self {
            frames: FrameSet::default(),
            color: ColorKey::Accent,
            suffix: String::new(),
            interval: DEFAULT_SPINNER_INTERVAL,
            speed: SpeedFactor::default(),
        }
    }
}

/// The text a spinner draws next to its glyph.
///
/// Always replaced as a whole, so a reader never sees a new message with
/// an old suffix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpinnerText {
    /// Main message.
    pub message: String,
    /// Trailing text.
    pub suffix: String,
}

struct SpinnerCore {
    id: SessionId,
    status: SessionStatus,
    text: RwLock<Arc<SpinnerText>>,
    frames: FrameSet,
    color: ColorKey,
    interval: Duration,
    renderer: Arc<dyn Renderer>,
    sessions: Arc<ActiveSessions>,
    ticker: Mutex<Option<Ticker>>,
}

impl SpinnerCore {
    fn snapshot(&self) -> Arc<SpinnerText> {
        Arc::clone(&self.text.read())
    }

    fn draw(&self, tick: usize) {
        let text = self.snapshot();
        let glyph = self.renderer.paint(next_frame(&self.frames, tick), self.color.into());
        let line = format!("{glyph} {}{}", text.message, text.suffix);
        best_effort("clear_current_line", self.renderer.clear_current_line());
        best_effort("write_raw", self.renderer.write_raw(&line));
        best_effort("flush", self.renderer.flush());
    }

    fn shutdown(&self) {
        if self.status.advance(SessionState::Created, SessionState::Stopped) {
            return;
        }
        if !self.status.advance(SessionState::Running, SessionState::Stopping) {
            return;
        }

        if let Some(ticker) = self.ticker.lock().take() {
            if !ticker.halt(STOP_JOIN_BOUND) {
                tracing::warn!(id = %self.id, "spinner thread did not stop in time, detaching");
            }
        }

        best_effort("clear_current_line", self.renderer.clear_current_line());
        best_effort("show_cursor", self.renderer.show_cursor());
        best_effort("flush", self.renderer.flush());
        self.sessions.deregister(self.id);
        self.status.advance(SessionState::Stopping, SessionState::Stopped);
        tracing::debug!(id = %self.id, "spinner stopped");
    }
}

impl Stoppable for SpinnerCore {
    fn session_id(&self) -> SessionId {
        self.id
    }

    fn stop(&self) {
        self.shutdown();
    }

    fn kind(&self) -> &'static str {
        "spinner"
    }
}

/// An animated glyph plus message on the current line.
///
/// Dropping a spinner stops it, so the line is cleared and the cursor
/// restored even when the owning code panics.
///
/// # Example
///
/// ```ignore
/// let spinner = ui.spinner("Loading", ui.spinner_options());
/// spinner.start()?;
/// spinner.update_message("Still loading");
/// spinner.stop_with_success("Loaded");
/// ```
pub struct Spinner {
    core: Arc<SpinnerCore>,
}

impl Spinner {
    /// Build a spinner. Nothing is drawn until [`Spinner::start`].
    pub fn new(
        message: impl Into<String>,
        options: SpinnerOptions,
        renderer: Arc<dyn Renderer>,
        sessions: Arc<ActiveSessions>,
    ) -> Self {
        let text = SpinnerText {
            message: message.into(),
            suffix: options.suffix,
        };
        Self {
            core: Arc::new(SpinnerCore {
                id: SessionId::next(),
                status: SessionStatus::new(),
                text: RwLock::new(Arc::new(text)),
                frames: options.frames,
                color: options.color,
                interval: options.speed.scale(options.interval),
                renderer,
                sessions,
                ticker: Mutex::new(None),
            }),
        }
    }

    /// Hide the cursor and start the background loop.
    ///
    /// Does nothing if the spinner is already running or stopped, or if
    /// the process is shutting down.
    ///
    /// # Errors
    ///
    /// Returns [`AnimationError::Spawn`] if the thread cannot be created;
    /// the terminal is restored before returning.
    pub fn start(&self) -> Result<(), AnimationError> {
        let core = &self.core;
        if !core.status.advance(SessionState::Created, SessionState::Running) {
            return Ok(());
        }
        if !core.sessions.register(Arc::clone(core) as Arc<dyn Stoppable>) {
            tracing::debug!(id = %core.id, "shutdown in progress, spinner not started");
            core.status.advance(SessionState::Running, SessionState::Stopped);
            return Ok(());
        }

        best_effort("hide_cursor", core.renderer.hide_cursor());

        // A drain between registering and taking the slot has already run
        // shutdown without a ticker to halt.
        let mut slot = core.ticker.lock();
        if !core.status.is_running() {
            drop(slot);
            tracing::debug!(id = %core.id, "spinner stopped while starting");
            best_effort("show_cursor", core.renderer.show_cursor());
            best_effort("flush", core.renderer.flush());
            return Ok(());
        }
        let looped = Arc::clone(core);
        let spawned = Ticker::spawn("termglow-spinner", core.interval, None, move |tick| {
            if !looped.status.is_running() {
                return TickFlow::Break;
            }
            looped.draw(tick);
            TickFlow::Continue
        });

        match spawned {
            Ok(ticker) => {
                *slot = Some(ticker);
                tracing::debug!(id = %core.id, interval = ?core.interval, "spinner started");
                Ok(())
            }
            Err(e) => {
                drop(slot);
                best_effort("show_cursor", core.renderer.show_cursor());
                core.sessions.deregister(core.id);
                core.status.advance(SessionState::Running, SessionState::Stopped);
                Err(e.into())
            }
        }
    }

    /// Stop the loop, clear the line and restore the cursor. Idempotent.
    pub fn stop(&self) {
        self.core.shutdown();
    }

    /// Stop and leave a green check with `message` on the line.
    pub fn stop_with_success(&self, message: &str) {
        self.stop_with_mark("✓", ColorKey::Success, message);
    }

    /// Stop and leave a red cross with `message` on the line.
    pub fn stop_with_error(&self, message: &str) {
        self.stop_with_mark("✗", ColorKey::Error, message);
    }

    fn stop_with_mark(&self, mark: &str, color: ColorKey, message: &str) {
        self.stop();
        let renderer = &self.core.renderer;
        let mark = renderer.paint(mark, color.into());
        best_effort("write_raw", renderer.write_raw(&format!("{mark} {message}\n")));
        best_effort("flush", renderer.flush());
    }

    /// Replace the message. The next frame shows it.
    pub fn update_message(&self, message: impl Into<String>) {
        let mut text = self.core.text.write();
        *text = Arc::new(SpinnerText {
            message: message.into(),
            suffix: text.suffix.clone(),
        });
    }

    /// Replace the suffix. The next frame shows it.
    pub fn update_suffix(&self, suffix: impl Into<String>) {
        let mut text = self.core.text.write();
        *text = Arc::new(SpinnerText {
            message: text.message.clone(),
            suffix: suffix.into(),
        });
    }

    /// The text the next frame will draw.
    pub fn text(&self) -> Arc<SpinnerText> {
        self.core.snapshot()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.core.status.get()
    }

    /// Whether the background loop is active.
    pub fn is_running(&self) -> bool {
        self.core.status.is_running()
    }

    /// Session identity.
    pub fn id(&self) -> SessionId {
        self.core.id
    }

    /// Effective frame interval after speed scaling.
    pub fn interval(&self) -> Duration {
        self.core.interval
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.core.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::SpinnerStyle;
    use crate::terminal::{RecordingRenderer, RenderOp};
    use std::thread;

    fn fixture() -> (Arc<RecordingRenderer>, Arc<ActiveSessions>) {
        (Arc::new(RecordingRenderer::new()), Arc::new(ActiveSessions::new()))
    }

    fn fast_options() -> SpinnerOptions {
        SpinnerOptions {
            interval: Duration::from_millis(5),
            ..SpinnerOptions::default()
        }
    }

    #[test]
    fn test_spinner_start_and_stop() {
        let (renderer, sessions) = fixture();
        let spinner = Spinner::new("Test message", fast_options(), renderer.clone(), sessions.clone());

        spinner.start().unwrap();
        assert!(spinner.is_running());
        assert!(sessions.contains(spinner.id()));
        thread::sleep(Duration::from_millis(40));
        spinner.stop();

        assert_eq!(spinner.state(), SessionState::Stopped);
        assert!(sessions.is_empty());
        let ops = renderer.ops();
        assert_eq!(ops.first(), Some(&RenderOp::HideCursor));
        assert!(ops.contains(&RenderOp::ShowCursor));
        assert!(renderer.writes().iter().any(|w| w.ends_with("Test message")));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let (renderer, sessions) = fixture();
        let spinner = Spinner::new("x", fast_options(), renderer.clone(), sessions);
        spinner.start().unwrap();
        spinner.stop();
        spinner.stop();
        drop(spinner);
        assert_eq!(renderer.count(&RenderOp::ShowCursor), 1);
    }

    #[test]
    fn test_stop_before_start_touches_nothing() {
        let (renderer, sessions) = fixture();
        let spinner = Spinner::new("x", fast_options(), renderer.clone(), sessions);
        spinner.stop();
        assert_eq!(spinner.state(), SessionState::Stopped);
        assert!(renderer.ops().is_empty());
        spinner.start().unwrap();
        assert_eq!(spinner.state(), SessionState::Stopped);
    }

    #[test]
    fn test_start_twice_is_noop() {
        let (renderer, sessions) = fixture();
        let spinner = Spinner::new("x", fast_options(), renderer.clone(), sessions);
        spinner.start().unwrap();
        spinner.start().unwrap();
        spinner.stop();
        assert_eq!(renderer.count(&RenderOp::HideCursor), 1);
    }

    #[test]
    fn test_start_refused_after_shutdown() {
        let (renderer, sessions) = fixture();
        sessions.drain();
        let spinner = Spinner::new("x", fast_options(), renderer.clone(), sessions);
        spinner.start().unwrap();
        assert_eq!(spinner.state(), SessionState::Stopped);
        assert!(renderer.ops().is_empty());
    }

    #[test]
    fn test_drop_stops_spinner() {
        let (renderer, sessions) = fixture();
        {
            let spinner = Spinner::new("x", fast_options(), renderer.clone(), sessions.clone());
            spinner.start().unwrap();
        }
        assert!(sessions.is_empty());
        assert_eq!(renderer.ops().last(), Some(&RenderOp::Flush));
        assert_eq!(renderer.count(&RenderOp::ShowCursor), 1);
    }

    #[test]
    fn test_stop_with_success_leaves_mark() {
        let (renderer, sessions) = fixture();
        let spinner = Spinner::new("x", fast_options(), renderer.clone(), sessions);
        spinner.start().unwrap();
        spinner.stop_with_success("Done!");
        assert_eq!(renderer.last_write().as_deref(), Some("✓ Done!\n"));
    }

    #[test]
    fn test_stop_with_error_leaves_mark() {
        let (renderer, sessions) = fixture();
        let spinner = Spinner::new("x", fast_options(), renderer.clone(), sessions);
        spinner.start().unwrap();
        spinner.stop_with_error("Failed!");
        assert_eq!(renderer.last_write().as_deref(), Some("✗ Failed!\n"));
    }

    #[test]
    fn test_update_message_keeps_suffix() {
        let (renderer, sessions) = fixture();
        let options = SpinnerOptions {
            suffix: " [1/3]".into(),
            ..fast_options()
        };
        let spinner = Spinner::new("first", options, renderer, sessions);
        spinner.update_message("second");
        assert_eq!(
            *spinner.text(),
            SpinnerText {
                message: "second".into(),
                suffix: " [1/3]".into()
            }
        );
        spinner.update_suffix(" [2/3]");
        assert_eq!(spinner.text().message, "second");
        assert_eq!(spinner.text().suffix, " [2/3]");
    }

    #[test]
    fn test_frames_follow_style() {
        let (renderer, sessions) = fixture();
        let options = SpinnerOptions {
            frames: SpinnerStyle::Classic.into(),
            ..fast_options()
        };
        let spinner = Spinner::new("go", options, renderer.clone(), sessions);
        spinner.start().unwrap();
        thread::sleep(Duration::from_millis(40));
        spinner.stop();
        let glyphs = SpinnerStyle::Classic.glyphs();
        let frames: Vec<String> = renderer
            .writes()
            .into_iter()
            .filter(|w| w.ends_with(" go"))
            .collect();
        assert!(!frames.is_empty());
        for (i, frame) in frames.iter().enumerate() {
            assert_eq!(frame, &format!("{} go", glyphs[i % glyphs.len()]));
        }
    }

    #[test]
    fn test_speed_scales_interval() {
        let (renderer, sessions) = fixture();
        let options = SpinnerOptions {
            speed: SpeedFactor::new(2.0).unwrap(),
            ..SpinnerOptions::default()
        };
        let spinner = Spinner::new("x", options, renderer, sessions);
        assert_eq!(spinner.interval(), Duration::from_millis(50));
    }

    #[test]
    fn test_failing_terminal_does_not_panic() {
        let renderer = Arc::new(RecordingRenderer::failing());
        let spinner = Spinner::new(
            "x",
            fast_options(),
            renderer,
            Arc::new(ActiveSessions::new()),
        );
        spinner.start().unwrap();
        thread::sleep(Duration::from_millis(20));
        spinner.stop_with_success("ok");
    }
}
