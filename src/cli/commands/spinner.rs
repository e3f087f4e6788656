//! Spinner command implementation.

use std::thread;
use std::time::{Duration, Instant};

use super::AnimateCommandResult;
use crate::config::duration_from_secs;
use crate::feedback::{FrameSet, SpinnerStyle};
use crate::ui::TerminalUi;

/// How often the elapsed-time suffix is refreshed.
const SUFFIX_REFRESH: Duration = Duration::from_millis(100);

/// Spin for `seconds`, then leave a success line.
///
/// Without an explicit suffix the spinner shows the elapsed time.
pub fn run(
    ui: &TerminalUi,
    message: &str,
    style: Option<SpinnerStyle>,
    suffix: Option<&str>,
    seconds: f64,
) -> AnimateCommandResult {
    let total = duration_from_secs(seconds)?;
    let mut options = ui.spinner_options();
    if let Some(style) = style {
        options.frames = FrameSet::from(style);
    }
    if let Some(suffix) = suffix {
        options.suffix = suffix.to_string();
    }

    let spinner = ui.spinner(message, options);
    spinner.start()?;
    let started = Instant::now();
    while started.elapsed() < total {
        thread::sleep(SUFFIX_REFRESH.min(total.saturating_sub(started.elapsed())));
        if suffix.is_none() {
            spinner.update_suffix(format!(" ({:.1}s)", started.elapsed().as_secs_f64()));
        }
    }
    spinner.stop_with_success(message);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::GlowConfig;
    use crate::feedback::ManualClock;
    use crate::lifecycle::ActiveSessions;
    use crate::terminal::RecordingRenderer;

    #[test]
    fn test_spinner_command_ends_with_success_line() {
        let renderer = Arc::new(RecordingRenderer::new());
        let ui = TerminalUi::with_parts(
            GlowConfig::default(),
            renderer.clone(),
            Arc::new(ActiveSessions::new()),
            Arc::new(ManualClock::new()),
        )
        .unwrap();
        run(&ui, "Indexing", Some(SpinnerStyle::Classic), Some(" [x]"), 0.05).unwrap();
        assert_eq!(renderer.last_write().as_deref(), Some("✓ Indexing\n"));
        assert!(ui.sessions().is_empty());
    }

    #[test]
    fn test_spinner_command_rejects_negative_time() {
        let ui = TerminalUi::with_parts(
            GlowConfig::default(),
            Arc::new(RecordingRenderer::new()),
            Arc::new(ActiveSessions::new()),
            Arc::new(ManualClock::new()),
        )
        .unwrap();
        assert!(run(&ui, "x", None, None, -1.0).is_err());
    }
}
