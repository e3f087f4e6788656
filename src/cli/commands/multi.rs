//! Multi command implementation.
//!
//! Bar `i` (0-based) advances `i + 1` steps per frame, so the first bar
//! sets the pace and the others finish early.

use std::thread;

use super::AnimateCommandResult;
use crate::config::duration_from_secs;
use crate::ui::TerminalUi;

/// Run `bars` managed bars of `total` steps, repainting the block each frame.
pub fn run(ui: &TerminalUi, bars: usize, total: u64, seconds: f64) -> AnimateCommandResult {
    let duration = duration_from_secs(seconds)?;
    let frame = if total == 0 {
        duration
    } else {
        duration.div_f64(total as f64)
    };

    ui.with_multi_progress(|multi| -> AnimateCommandResult {
        let handles = (0..bars)
            .map(|i| {
                multi.add_progress(
                    format!("task-{}", i + 1),
                    format!("Task {}", i + 1),
                    total,
                    ui.progress_options(),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        multi.render_all();
        while !multi.is_complete() {
            thread::sleep(frame);
            for (i, handle) in (1u64..).zip(&handles) {
                handle.update(i);
            }
            multi.render_all();
        }
        tracing::debug!(bars, total, "all bars complete");
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
    use crate::terminal::{RecordingRenderer, RenderOp};

    #[test]
    fn test_multi_command_repaints_block() {
        let renderer = Arc::new(RecordingRenderer::new());
        let ui = TerminalUi::with_parts(
            GlowConfig::default(),
            renderer.clone(),
            Arc::new(ActiveSessions::new()),
            Arc::new(ManualClock::new()),
        )
        .unwrap();
        run(&ui, 2, 2, 0.0).unwrap();

        // Initial paint, two update frames, then the closing frame.
        let frames = 4;
        assert_eq!(renderer.count(&RenderOp::MoveUp(1)), 2 * (frames - 1));
        let writes = renderer.writes();
        assert_eq!(writes.len(), 2 * frames);
        assert!(writes.iter().rev().take(2).all(|w| w.contains("(2/2)")));
    }
}
