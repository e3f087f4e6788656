//! Process-level lifecycle for running animations.
//!
//! Every started session registers itself in an [`ActiveSessions`] set and
//! removes itself when it stops. On Ctrl+C the [`TerminationGuard`] drains
//! that set, stops each session, restores the cursor and exits.

mod guard;
mod registry;

pub use guard::{TerminationGuard, INTERRUPTED_EXIT_CODE};
pub use registry::ActiveSessions;

use crate::feedback::SessionId;

/// A session the termination guard can stop.
///
/// `stop` must be idempotent and must not panic; it may be called from
/// the signal-handling thread while the owner is mid-update.
pub trait Stoppable: Send + Sync {
    /// Identity used for deregistration.
    fn session_id(&self) -> SessionId;

    /// Stop the session and restore the terminal.
    fn stop(&self);

    /// Short label for log messages.
    fn kind(&self) -> &'static str {
        "session"
    }
}
