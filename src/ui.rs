//! The entry point for applications: one object that owns the renderer,
//! the session registry and the interrupt guard, and hands out animations
//! configured from [`GlowConfig`].
//!
//! The `with_*` helpers scope an animation to a closure. Cleanup runs when
//! the closure returns, returns an error, or panics; the closure's own
//! result is passed back unchanged.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::config::{duration_from_secs, ConfigError, GlowConfig};
use crate::feedback::effects::{effect_rng, EffectTiming};
use crate::feedback::{
    AnimationError, CellularEffect, Clock, EffectSession, FireEffect, FireOptions, FrameSet,
    MatrixRain, MatrixRainOptions, MultiProgress, ProgressBar, ProgressOptions, SpeedFactor,
    Spinner, SpinnerOptions, SystemClock,
};
use crate::lifecycle::{ActiveSessions, TerminationGuard};
use crate::terminal::{best_effort, CrosstermRenderer, Renderer, TerminalSize};

/// Shows the cursor again when dropped.
struct CursorRestore<'a>(&'a dyn Renderer);

impl Drop for CursorRestore<'_> {
    fn drop(&mut self) {
        best_effort("show_cursor", self.0.show_cursor());
        best_effort("flush", self.0.flush());
    }
}

/// Facade tying configuration, rendering and lifecycle together.
pub struct TerminalUi {
    config: GlowConfig,
    speed: SpeedFactor,
    renderer: Arc<dyn Renderer>,
    sessions: Arc<ActiveSessions>,
    clock: Arc<dyn Clock>,
    guard: Arc<TerminationGuard>,
}

impl TerminalUi {
    /// A UI drawing to stdout, registered with the process-wide session
    /// set, with the Ctrl+C handler installed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration does not validate.
    pub fn new(config: GlowConfig) -> Result<Self, ConfigError> {
        let renderer = CrosstermRenderer::new(config.display.theme)
            .with_debug(config.display.debug)
            .with_color(config.display.color);
        let ui = Self::with_parts(
            config,
            Arc::new(renderer),
            ActiveSessions::global(),
            Arc::new(SystemClock),
        )?;
        ui.guard.install();
        Ok(ui)
    }

    /// A UI over caller-supplied parts. No signal handler is installed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration does not validate.
    pub fn with_parts(
        config: GlowConfig,
        renderer: Arc<dyn Renderer>,
        sessions: Arc<ActiveSessions>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let speed = config.speed()?;
        let guard = TerminationGuard::new(Arc::clone(&sessions), Arc::clone(&renderer));
        Ok(Self {
            config,
            speed,
            renderer,
            sessions,
            clock,
            guard,
        })
    }

    /// The configuration this UI was built from.
    pub fn config(&self) -> &GlowConfig {
        &self.config
    }

    /// The global speed multiplier.
    pub fn speed(&self) -> SpeedFactor {
        self.speed
    }

    /// The renderer every animation draws through.
    pub fn renderer(&self) -> &Arc<dyn Renderer> {
        &self.renderer
    }

    /// The registry of running sessions.
    pub fn sessions(&self) -> &Arc<ActiveSessions> {
        &self.sessions
    }

    /// The interrupt guard over [`TerminalUi::sessions`].
    pub fn guard(&self) -> &Arc<TerminationGuard> {
        &self.guard
    }

    /// Terminal size, with the configured width override applied.
    pub fn size(&self) -> TerminalSize {
        let mut size = self.renderer.size();
        if let Some(width) = self.config.display.width {
            size.width = width;
        }
        size
    }

    /// Spinner options from the `[spinner]` section.
    pub fn spinner_options(&self) -> SpinnerOptions {
        SpinnerOptions {
            frames: FrameSet::from(self.config.spinner.style),
            color: self.config.spinner.color,
            suffix: String::new(),
            interval: Duration::from_millis(self.config.spinner.tick_interval_ms),
            speed: self.speed,
        }
    }

    /// Progress options from the `[progress]` section.
    ///
    /// Without a configured width the bar is sized from [`TerminalUi::size`].
    pub fn progress_options(&self) -> ProgressOptions {
        let progress = &self.config.progress;
        ProgressOptions {
            glyphs: progress.style.into(),
            width: Some(
                progress
                    .width
                    .unwrap_or_else(|| crate::feedback::progress::auto_width(self.size().width)),
            ),
            show_percentage: progress.show_percentage,
            show_eta: progress.show_eta,
            color: progress.color,
            throttle: self.speed.scale(Duration::from_millis(progress.throttle_ms)),
        }
    }

    /// Matrix rain options from the `[effects]` section.
    pub fn matrix_options(&self) -> Result<MatrixRainOptions, AnimationError> {
        let effects = &self.config.effects;
        Ok(MatrixRainOptions {
            density: effects.matrix_density,
            duration: duration_from_secs(effects.matrix_duration_secs)?,
            color: effects.matrix_color,
            seed: None,
        })
    }

    /// Fire options from the `[effects]` section.
    pub fn fire_options(&self) -> Result<FireOptions, AnimationError> {
        let effects = &self.config.effects;
        Ok(FireOptions {
            height: effects.fire_height,
            duration: duration_from_secs(effects.fire_duration_secs)?,
            max_cooling: effects.fire_max_cooling,
            seed: None,
        })
    }

    /// A spinner that is not yet started.
    pub fn spinner(&self, message: impl Into<String>, options: SpinnerOptions) -> Spinner {
        Spinner::new(
            message,
            options,
            Arc::clone(&self.renderer),
            Arc::clone(&self.sessions),
        )
    }

    /// Run `body` with a started spinner; the spinner is stopped afterwards.
    ///
    /// # Errors
    ///
    /// Returns the body's error unchanged, or the spinner's start error
    /// converted into `E`.
    pub fn with_spinner<T, E>(
        &self,
        message: impl Into<String>,
        options: SpinnerOptions,
        body: impl FnOnce(&Spinner) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<AnimationError>,
    {
        let spinner = self.spinner(message, options);
        spinner.start()?;
        let result = body(&spinner);
        spinner.stop();
        result
    }

    /// Show a spinner for a fixed time.
    pub fn simple_spinner(
        &self,
        message: impl Into<String>,
        duration: Duration,
    ) -> Result<(), AnimationError> {
        self.with_spinner(message, self.spinner_options(), |_| -> Result<(), AnimationError> {
            thread::sleep(duration);
            Ok(())
        })
    }

    /// A standalone progress bar at 0 of `total`.
    pub fn progress(
        &self,
        message: impl Into<String>,
        total: u64,
        options: ProgressOptions,
    ) -> ProgressBar {
        ProgressBar::new(
            message,
            total,
            options,
            Arc::clone(&self.renderer),
            Arc::clone(&self.clock),
        )
    }

    /// Run `body` with a progress bar; the bar is finished afterwards.
    ///
    /// # Errors
    ///
    /// Returns the body's error unchanged.
    pub fn with_progress<T, E>(
        &self,
        message: impl Into<String>,
        total: u64,
        options: ProgressOptions,
        body: impl FnOnce(&mut ProgressBar) -> Result<T, E>,
    ) -> Result<T, E> {
        let mut bar = self.progress(message, total, options);
        let result = body(&mut bar);
        bar.finish();
        result
    }

    /// Drive a progress bar evenly from 0 to `total` over `duration`.
    pub fn simple_progress(&self, message: impl Into<String>, total: u64, duration: Duration) {
        let step = if total == 0 {
            Duration::ZERO
        } else {
            duration.div_f64(total as f64)
        };
        let outcome: Result<(), AnimationError> =
            self.with_progress(message, total, self.progress_options(), |bar| {
                for _ in 0..total {
                    thread::sleep(step);
                    bar.update(1);
                }
                Ok(())
            });
        if let Err(e) = outcome {
            tracing::debug!("progress simulation ended early: {e}");
        }
    }

    /// An empty multi-bar block.
    pub fn multi_progress(&self) -> MultiProgress {
        MultiProgress::new(Arc::clone(&self.renderer), Arc::clone(&self.clock))
    }

    /// Run `body` with a multi-bar block; a final frame is drawn afterwards.
    ///
    /// The cursor is hidden for the duration.
    ///
    /// # Errors
    ///
    /// Returns the body's error unchanged.
    pub fn with_multi_progress<T, E>(
        &self,
        body: impl FnOnce(&MultiProgress) -> Result<T, E>,
    ) -> Result<T, E> {
        let multi = self.multi_progress();
        best_effort("hide_cursor", self.renderer.hide_cursor());
        let _restore = CursorRestore(self.renderer.as_ref());
        let result = body(&multi);
        multi.render_all();
        result
    }

    /// A matrix rain session over the current terminal.
    pub fn matrix_rain(&self, options: &MatrixRainOptions) -> Result<EffectSession, AnimationError> {
        let mut rng = effect_rng(options.seed);
        let rain = MatrixRain::new(self.size(), options, self.speed, &mut rng)?;
        Ok(self.effect_session(rain, rng, options.duration))
    }

    /// A fire session as wide as the terminal.
    pub fn fire(&self, options: &FireOptions) -> Result<EffectSession, AnimationError> {
        let fire = FireEffect::new(usize::from(self.size().width), options.height)?
            .with_max_cooling(options.max_cooling);
        Ok(self.effect_session(fire, effect_rng(options.seed), options.duration))
    }

    /// Run any effect for `duration` at the configured speed, blocking.
    pub fn run_effect(
        &self,
        effect: impl CellularEffect,
        seed: Option<u64>,
        duration: Duration,
    ) -> Result<(), AnimationError> {
        self.effect_session(effect, effect_rng(seed), duration).run()
    }

    fn effect_session(
        &self,
        effect: impl CellularEffect,
        rng: rand::rngs::StdRng,
        duration: Duration,
    ) -> EffectSession {
        EffectSession::new(
            effect,
            rng,
            EffectTiming::new(duration).with_speed(self.speed),
            Arc::clone(&self.renderer),
            Arc::clone(&self.sessions),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::{ManualClock, SessionState};
    use crate::terminal::{RecordingRenderer, RenderOp};

    fn ui_with(config: GlowConfig) -> (TerminalUi, Arc<RecordingRenderer>) {
        let renderer = Arc::new(RecordingRenderer::new());
        let ui = TerminalUi::with_parts(
            config,
            renderer.clone(),
            Arc::new(ActiveSessions::new()),
            Arc::new(ManualClock::new()),
        )
        .unwrap();
        (ui, renderer)
    }

    fn ui() -> (TerminalUi, Arc<RecordingRenderer>) {
        ui_with(GlowConfig::default())
    }

    #[derive(Debug, thiserror::Error)]
    enum JobError {
        #[error("job failed")]
        Failed,
        #[error(transparent)]
        Animation(#[from] AnimationError),
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = GlowConfig::default();
        config.display.speed_factor = -1.0;
        let result = TerminalUi::with_parts(
            config,
            Arc::new(RecordingRenderer::new()),
            Arc::new(ActiveSessions::new()),
            Arc::new(ManualClock::new()),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_width_override() {
        let mut config = GlowConfig::default();
        config.display.width = Some(120);
        let (ui, _) = ui_with(config);
        assert_eq!(ui.size(), TerminalSize::new(120, 24));
        assert_eq!(ui.progress_options().width, Some(40));
    }

    #[test]
    fn test_options_follow_speed() {
        let mut config = GlowConfig::default();
        config.display.speed_factor = 2.0;
        let (ui, _) = ui_with(config);
        assert_eq!(ui.spinner(" ", ui.spinner_options()).interval(), Duration::from_millis(50));
        assert_eq!(ui.progress_options().throttle, Duration::from_millis(25));
    }

    #[test]
    fn test_with_spinner_returns_body_error_unchanged() {
        let (ui, renderer) = ui();
        let result: Result<(), JobError> =
            ui.with_spinner("Working", ui.spinner_options(), |_| Err(JobError::Failed));
        assert!(matches!(result, Err(JobError::Failed)));
        assert!(ui.sessions().is_empty());
        assert_eq!(renderer.count(&RenderOp::ShowCursor), 1);
    }

    #[test]
    fn test_with_spinner_cleans_up_on_panic() {
        let (ui, renderer) = ui();
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _: Result<(), AnimationError> =
                ui.with_spinner("Working", ui.spinner_options(), |_| panic!("boom"));
        }));
        assert!(outcome.is_err());
        assert!(ui.sessions().is_empty());
        assert_eq!(renderer.count(&RenderOp::ShowCursor), 1);
    }

    #[test]
    fn test_with_progress_finishes_bar() {
        let (ui, renderer) = ui();
        let value = ui
            .with_progress("Copy", 10, ui.progress_options(), |bar| {
                bar.set_progress(3);
                Ok::<_, AnimationError>(7)
            })
            .unwrap();
        assert_eq!(value, 7);
        let writes = renderer.writes();
        assert!(writes[writes.len() - 2].contains("(10/10)"));
        assert_eq!(writes.last().map(String::as_str), Some("\n"));
    }

    #[test]
    fn test_with_multi_progress_draws_final_frame() {
        let (ui, renderer) = ui();
        ui.with_multi_progress(|multi| {
            let a = multi.add_progress("a", "A", 2, ui.progress_options())?;
            a.update(2);
            Ok::<_, AnimationError>(())
        })
        .unwrap();
        let ops = renderer.ops();
        assert_eq!(ops.first(), Some(&RenderOp::HideCursor));
        assert!(renderer.writes().iter().any(|w| w.contains("(2/2)")));
        assert_eq!(ops.last(), Some(&RenderOp::Flush));
        assert_eq!(renderer.count(&RenderOp::ShowCursor), 1);
    }

    #[test]
    fn test_fire_rejects_zero_height() {
        let (ui, _) = ui();
        let options = FireOptions {
            height: 0,
            ..FireOptions::default()
        };
        assert!(matches!(ui.fire(&options), Err(AnimationError::InvalidHeight(0))));
    }

    #[test]
    fn test_matrix_rain_runs_to_completion() {
        let (ui, renderer) = ui();
        let options = MatrixRainOptions {
            duration: Duration::from_millis(30),
            seed: Some(11),
            ..ui.matrix_options().unwrap()
        };
        let session = ui.matrix_rain(&options).unwrap();
        session.run().unwrap();
        assert_eq!(session.state(), SessionState::Stopped);
        assert!(renderer.count(&RenderOp::ClearScreen) >= 2);
        assert_eq!(renderer.ops().last(), Some(&RenderOp::Flush));
    }

    #[test]
    fn test_run_effect_blocks_until_deadline() {
        let (ui, renderer) = ui();
        let fire = FireEffect::new(8, 3).unwrap();
        ui.run_effect(fire, Some(2), Duration::from_millis(30)).unwrap();
        assert!(ui.sessions().is_empty());
        assert!(renderer.writes().iter().any(|w| w.contains('$')));
    }

    #[test]
    fn test_simple_helpers_clean_up() {
        let (ui, renderer) = ui();
        ui.simple_spinner("Waiting", Duration::from_millis(20)).unwrap();
        ui.simple_progress("Counting", 3, Duration::from_millis(3));
        assert!(ui.sessions().is_empty());
        assert_eq!(renderer.count(&RenderOp::ShowCursor), 1);
        assert!(renderer.writes().iter().any(|w| w.ends_with("(3/3)")));
    }

    #[test]
    fn test_guard_stops_running_spinner() {
        let (ui, renderer) = ui();
        let spinner = ui.spinner("Busy", ui.spinner_options());
        spinner.start().unwrap();
        assert!(ui.guard().fire());
        assert_eq!(spinner.state(), SessionState::Stopped);
        assert!(!ui.sessions().is_open());
        assert!(renderer.count(&RenderOp::ShowCursor) >= 1);
    }
}
