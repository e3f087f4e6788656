//! The set of sessions currently running.

use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

use super::Stoppable;
use crate::feedback::SessionId;

#[derive(Default)]
struct Entries {
    closed: bool,
    sessions: Vec<Arc<dyn Stoppable>>,
}

/// Thread-safe registry of running sessions.
///
/// Once drained the registry is closed: later registrations are refused,
/// so nothing can start after a termination has begun.
#[derive(Default)]
pub struct ActiveSessions {
    inner: Mutex<Entries>,
}

impl std::fmt::Debug for ActiveSessions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("ActiveSessions")
            .field("closed", &inner.closed)
            .field("len", &inner.sessions.len())
            .finish()
    }
}

impl ActiveSessions {
    /// An empty, open registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> Arc<ActiveSessions> {
        static GLOBAL: OnceLock<Arc<ActiveSessions>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(ActiveSessions::new())))
    }

    /// Add a running session. Returns false if the registry is closed.
    pub fn register(&self, session: Arc<dyn Stoppable>) -> bool {
        let mut inner = self.inner.lock();
        if inner.closed {
            return false;
        }
        let id = session.session_id();
        if !inner.sessions.iter().any(|s| s.session_id() == id) {
            inner.sessions.push(session);
        }
        true
    }

    /// Remove a session. Returns whether it was present.
    pub fn deregister(&self, id: SessionId) -> bool {
        let mut inner = self.inner.lock();
        let before = inner.sessions.len();
        inner.sessions.retain(|s| s.session_id() != id);
        inner.sessions.len() != before
    }

    /// Whether a session is registered.
    pub fn contains(&self, id: SessionId) -> bool {
        self.inner.lock().sessions.iter().any(|s| s.session_id() == id)
    }

    /// Number of registered sessions.
    pub fn len(&self) -> usize {
        self.inner.lock().sessions.len()
    }

    /// Whether no sessions are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether new sessions may still register.
    pub fn is_open(&self) -> bool {
        !self.inner.lock().closed
    }

    /// Close the registry and stop every registered session.
    ///
    /// Sessions are stopped outside the lock because their `stop`
    /// deregisters them. Returns how many were stopped.
    pub fn drain(&self) -> usize {
        let sessions = {
            let mut inner = self.inner.lock();
            inner.closed = true;
            std::mem::take(&mut inner.sessions)
        };
        for session in &sessions {
            tracing::debug!(id = %session.session_id(), kind = session.kind(), "stopping session");
            session.stop();
        }
        sessions.len()
    }
}
