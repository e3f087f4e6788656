//! Progress command implementation.

use std::thread;

use super::AnimateCommandResult;
use crate::config::duration_from_secs;
use crate::feedback::BarStyle;
use crate::ui::TerminalUi;

/// Fill a bar of `total` steps evenly over `seconds`.
pub fn run(
    ui: &TerminalUi,
    message: &str,
    total: u64,
    style: Option<BarStyle>,
    seconds: f64,
) -> AnimateCommandResult {
    let duration = duration_from_secs(seconds)?;
    let mut options = ui.progress_options();
    if let Some(style) = style {
        options.glyphs = style.into();
    }
    let step = if total == 0 {
        duration
    } else {
        duration.div_f64(total as f64)
    };

    ui.with_progress(message, total, options, |bar| -> AnimateCommandResult {
        for _ in 0..total {
            thread::sleep(step);
            bar.update(1);
        }
        Ok(())
    })
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
    fn test_progress_command_completes_bar() {
        let renderer = Arc::new(RecordingRenderer::new());
        let ui = TerminalUi::with_parts(
            GlowConfig::default(),
            renderer.clone(),
            Arc::new(ActiveSessions::new()),
            Arc::new(ManualClock::new()),
        )
        .unwrap();
        run(&ui, "Copy", 4, Some(BarStyle::Equals), 0.0).unwrap();
        let writes = renderer.writes();
        let last_line = &writes[writes.len() - 2];
        assert!(last_line.starts_with("Copy: [===="), "{last_line}");
        assert!(last_line.ends_with("(4/4)"), "{last_line}");
        assert_eq!(writes.last().map(String::as_str), Some("\n"));
    }
}
