//! Ctrl+C handling that leaves the terminal usable.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use super::ActiveSessions;
use crate::terminal::{best_effort, Renderer};

/// Exit status after an interrupt (128 + SIGINT).
///
/// ctrlc does not say which signal arrived, so SIGTERM and SIGHUP exit
/// with this status too.
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

static INSTALLED: OnceLock<Arc<TerminationGuard>> = OnceLock::new();

/// Stops every active session when the process is interrupted.
///
/// `fire` does the cleanup and is safe to call directly (tests, or an
/// embedding application with its own signal handling). `install` hooks
/// it to SIGINT/SIGTERM and exits with [`INTERRUPTED_EXIT_CODE`]
/// afterwards.
pub struct TerminationGuard {
    sessions: Arc<ActiveSessions>,
    renderer: Arc<dyn Renderer>,
    fired: AtomicBool,
}

impl TerminationGuard {
    /// A guard over the given registry.
    pub fn new(sessions: Arc<ActiveSessions>, renderer: Arc<dyn Renderer>) -> Arc<Self> {
        Arc::new(Self {
            sessions,
            renderer,
            fired: AtomicBool::new(false),
        })
    }

    /// Install the process signal handler.
    ///
    /// Only the first guard installed in a process is hooked up. Failure
    /// to install is logged and otherwise ignored; animations still run,
    /// they just won't clean up on Ctrl+C. Returns whether this call
    /// installed the handler.
    ///
    /// The handler exits with [`INTERRUPTED_EXIT_CODE`] for every signal
    /// it covers (SIGINT, SIGTERM and SIGHUP).
    pub fn install(self: &Arc<Self>) -> bool {
        if INSTALLED.set(Arc::clone(self)).is_err() {
            tracing::debug!("termination handler already installed");
            return false;
        }

        let result = ctrlc::set_handler(|| {
            if let Some(guard) = INSTALLED.get() {
                guard.fire();
            }
            std::process::exit(INTERRUPTED_EXIT_CODE);
        });

        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Could not set up Ctrl+C handler: {e}");
                false
            }
        }
    }

    /// Stop all sessions and restore the cursor. Runs at most once.
    ///
    /// Returns true on the call that performed the cleanup.
    pub fn fire(&self) -> bool {
        if self.fired.swap(true, Ordering::SeqCst) {
            return false;
        }
        let stopped = self.sessions.drain();
        best_effort("show_cursor", self.renderer.show_cursor());
        best_effort("flush", self.renderer.flush());
        tracing::debug!(stopped, "termination cleanup complete");
        true
    }

    /// Whether cleanup has already run.
    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }
}
