//! A block of progress bars repainted together.

use std::sync::Arc;

use parking_lot::Mutex;

use super::progress::{ProgressBar, ProgressOptions};
use super::throttle::Clock;
use super::AnimationError;
use crate::terminal::{best_effort, Renderer};

struct Registry {
    bars: Vec<(String, Arc<Mutex<ProgressBar>>)>,
    painted_lines: usize,
}

/// Several named bars drawn as consecutive lines.
///
/// Bars keep insertion order. Each `render_all` moves the cursor back
/// over the lines drawn last time, clears them and prints every bar
/// again, so the block stays in place while bars are added or removed.
/// Registration, removal and repainting share one lock and never
/// interleave.
pub struct MultiProgress {
    registry: Mutex<Registry>,
    renderer: Arc<dyn Renderer>,
    clock: Arc<dyn Clock>,
}

/// Handle to a bar owned by a [`MultiProgress`].
///
/// Updates only change the count; nothing is drawn until the owner's
/// next `render_all`.
#[derive(Clone, Debug)]
pub struct ManagedProgress {
    key: Arc<str>,
    bar: Arc<Mutex<ProgressBar>>,
}

impl ManagedProgress {
    /// The key the bar was registered under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Advance by `amount`, clamped at the total.
    pub fn update(&self, amount: u64) {
        self.bar.lock().update(amount);
    }

    /// Jump to `value`, clamped at the total.
    pub fn set_progress(&self, value: u64) {
        self.bar.lock().set_progress(value);
    }

    /// Jump to the total.
    pub fn finish(&self) {
        self.bar.lock().finish();
    }

    /// Current count.
    pub fn current(&self) -> u64 {
        self.bar.lock().current()
    }

    /// Target count.
    pub fn total(&self) -> u64 {
        self.bar.lock().total()
    }

    /// Whole percent complete.
    pub fn percentage(&self) -> u64 {
        self.bar.lock().percentage()
    }
}

impl MultiProgress {
    /// An empty block.
    pub fn new(renderer: Arc<dyn Renderer>, clock: Arc<dyn Clock>) -> Self {
        Self {
            registry: Mutex::new(Registry {
                bars: Vec::new(),
                painted_lines: 0,
            }),
            renderer,
            clock,
        }
    }

    /// Register a new bar under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`AnimationError::DuplicateProgress`] if `key` is taken.
    pub fn add_progress(
        &self,
        key: impl Into<String>,
        message: impl Into<String>,
        total: u64,
        options: ProgressOptions,
    ) -> Result<ManagedProgress, AnimationError> {
        let key = key.into();
        let mut registry = self.registry.lock();
        if registry.bars.iter().any(|(k, _)| *k == key) {
            return Err(AnimationError::DuplicateProgress(key));
        }

        let bar = ProgressBar::new(
            message,
            total,
            options,
            Arc::clone(&self.renderer),
            Arc::clone(&self.clock),
        )
        .into_managed();
        let bar = Arc::new(Mutex::new(bar));
        registry.bars.push((key.clone(), Arc::clone(&bar)));
        tracing::debug!(key = %key, total, "progress bar added");

        Ok(ManagedProgress {
            key: key.into(),
            bar,
        })
    }

    /// Drop the bar under `key`. Returns whether it existed.
    ///
    /// Its line disappears at the next `render_all`; handles already
    /// given out keep working but are no longer drawn.
    pub fn remove_progress(&self, key: &str) -> bool {
        let mut registry = self.registry.lock();
        let before = registry.bars.len();
        registry.bars.retain(|(k, _)| k != key);
        registry.bars.len() != before
    }

    /// Handle for an already-registered bar.
    pub fn get(&self, key: &str) -> Option<ManagedProgress> {
        self.registry
            .lock()
            .bars
            .iter()
            .find(|(k, _)| k == key)
            .map(|(k, bar)| ManagedProgress {
                key: k.as_str().into(),
                bar: Arc::clone(bar),
            })
    }

    /// Repaint every bar in insertion order.
    pub fn render_all(&self) {
        let mut registry = self.registry.lock();
        self.erase(registry.painted_lines);
        for (_, bar) in &registry.bars {
            let line = bar.lock().line();
            best_effort("write_raw", self.renderer.write_raw(&format!("{line}\n")));
        }
        best_effort("flush", self.renderer.flush());
        registry.painted_lines = registry.bars.len();
    }

    /// Erase the block drawn by the last `render_all`.
    pub fn clear(&self) {
        let mut registry = self.registry.lock();
        self.erase(registry.painted_lines);
        best_effort("flush", self.renderer.flush());
        registry.painted_lines = 0;
    }

    fn erase(&self, lines: usize) {
        for _ in 0..lines {
            best_effort("move_cursor_up", self.renderer.move_cursor_up(1));
            best_effort("clear_current_line", self.renderer.clear_current_line());
        }
    }

    /// Keys in draw order.
    pub fn keys(&self) -> Vec<String> {
        self.registry
            .lock()
            .bars
            .iter()
            .map(|(k, _)| k.clone())
            .collect()
    }

    /// Number of registered bars.
    pub fn len(&self) -> usize {
        self.registry.lock().bars.len()
    }

    /// Whether no bars are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether every registered bar has reached its total.
    pub fn is_complete(&self) -> bool {
        self.registry
            .lock()
            .bars
            .iter()
            .all(|(_, bar)| bar.lock().is_complete())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::ManualClock;
    use crate::terminal::{RecordingRenderer, RenderOp};

    fn multi() -> (MultiProgress, Arc<RecordingRenderer>) {
        let renderer = Arc::new(RecordingRenderer::new());
        let multi = MultiProgress::new(renderer.clone(), Arc::new(ManualClock::new()));
        (multi, renderer)
    }

    fn narrow() -> ProgressOptions {
        ProgressOptions {
            width: Some(4),
            show_eta: false,
            ..ProgressOptions::default()
        }
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let (multi, _) = multi();
        multi.add_progress("a", "A", 10, narrow()).unwrap();
        let err = multi.add_progress("a", "again", 5, narrow()).unwrap_err();
        assert!(matches!(err, AnimationError::DuplicateProgress(k) if k == "a"));
        assert_eq!(multi.len(), 1);
    }

    #[test]
    fn test_managed_updates_do_not_draw() {
        let (multi, renderer) = multi();
        let a = multi.add_progress("a", "A", 10, narrow()).unwrap();
        a.update(3);
        a.set_progress(5);
        a.finish();
        assert_eq!(a.current(), 10);
        assert!(renderer.ops().is_empty());
    }

    #[test]
    fn test_render_all_draws_in_insertion_order() {
        let (multi, renderer) = multi();
        multi.add_progress("b", "Second", 4, narrow()).unwrap();
        multi.add_progress("a", "First", 4, narrow()).unwrap();
        multi.render_all();
        let writes = renderer.writes();
        assert_eq!(writes.len(), 2);
        assert!(writes[0].starts_with("Second:"));
        assert!(writes[1].starts_with("First:"));
        assert_eq!(multi.keys(), vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_second_render_erases_previous_block() {
        let (multi, renderer) = multi();
        for key in ["a", "b", "c"] {
            multi.add_progress(key, key, 10, narrow()).unwrap();
        }
        multi.render_all();
        assert_eq!(renderer.count(&RenderOp::MoveUp(1)), 0);
        renderer.take();

        multi.render_all();
        assert_eq!(renderer.count(&RenderOp::MoveUp(1)), 3);
        assert_eq!(renderer.count(&RenderOp::ClearLine), 3);
        assert_eq!(renderer.writes().len(), 3);
    }

    #[test]
    fn test_remove_erases_old_line_count() {
        let (multi, renderer) = multi();
        multi.add_progress("a", "A", 10, narrow()).unwrap();
        multi.add_progress("b", "B", 10, narrow()).unwrap();
        multi.render_all();
        assert!(multi.remove_progress("a"));
        assert!(!multi.remove_progress("a"));
        renderer.take();

        multi.render_all();
        assert_eq!(renderer.count(&RenderOp::MoveUp(1)), 2);
        assert_eq!(renderer.writes().len(), 1);
    }

    #[test]
    fn test_clear_erases_block() {
        let (multi, renderer) = multi();
        multi.add_progress("a", "A", 10, narrow()).unwrap();
        multi.render_all();
        renderer.take();
        multi.clear();
        assert_eq!(renderer.count(&RenderOp::MoveUp(1)), 1);
        renderer.take();
        multi.render_all();
        assert_eq!(renderer.count(&RenderOp::MoveUp(1)), 0);
    }

    #[test]
    fn test_get_shares_state() {
        let (multi, _) = multi();
        let a = multi.add_progress("a", "A", 10, narrow()).unwrap();
        a.update(4);
        let again = multi.get("a").unwrap();
        assert_eq!(again.current(), 4);
        assert_eq!(again.key(), "a");
        assert!(multi.get("missing").is_none());
    }

    #[test]
    fn test_concurrent_updates_are_not_lost() {
        let (multi, _) = multi();
        let bar = multi.add_progress("a", "A", 10_000, narrow()).unwrap();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let bar = bar.clone();
                std::thread::spawn(move || {
                    for _ in 0..500 {
                        bar.update(1);
                    }
                })
            })
            .collect();
        for _ in 0..20 {
            multi.render_all();
        }
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(bar.current(), 2000);
        assert!(!multi.is_complete());
    }
}
