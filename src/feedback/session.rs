//! Session identity, lifecycle state and speed scaling.

use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::time::Duration;

use super::AnimationError;

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of an animation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    /// Allocate a fresh id.
    pub fn next() -> Self {
        Self(NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a session is in its life.
///
/// States only move forward: `Created → Running → Stopping → Stopped`,
/// with `Created → Stopped` for sessions that never started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SessionState {
    /// Built, nothing drawn yet.
    Created = 0,
    /// Background loop active or bar accepting updates.
    Running = 1,
    /// Stop requested, cleanup in progress.
    Stopping = 2,
    /// Terminal restored. Final.
    Stopped = 3,
}

impl SessionState {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Created,
            1 => Self::Running,
            2 => Self::Stopping,
            _ => Self::Stopped,
        }
    }
}

/// Atomic holder for a [`SessionState`].
///
/// Transitions are compare-and-swap, so when two threads race to stop a
/// session exactly one of them wins and performs cleanup.
#[derive(Debug)]
pub struct SessionStatus(AtomicU8);

impl SessionStatus {
    /// A status in [`SessionState::Created`].
    pub fn new() -> Self {
        Self(AtomicU8::new(SessionState::Created as u8))
    }

    /// Current state.
    pub fn get(&self) -> SessionState {
        SessionState::from_u8(self.0.load(Ordering::Acquire))
    }

    /// Move from `from` to `to`. Returns false if the state was not `from`.
    ///
    /// Backward moves are refused regardless of the current state.
    pub fn advance(&self, from: SessionState, to: SessionState) -> bool {
        if (to as u8) <= (from as u8) {
            return false;
        }
        self.0
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Whether the session is in [`SessionState::Running`].
    pub fn is_running(&self) -> bool {
        self.get() == SessionState::Running
    }
}

impl Default for SessionStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Slowest supported speed; smaller positive factors are raised to it.
pub const MIN_SPEED_FACTOR: f64 = 0.1;

/// Global animation speed multiplier.
///
/// Tick intervals and effect durations are divided by it: `2.0` runs
/// twice as fast, `0.5` half as fast.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SpeedFactor(f64);

impl SpeedFactor {
    /// Validate a speed factor.
    ///
    /// # Errors
    ///
    /// Returns [`AnimationError::InvalidSpeedFactor`] unless `factor` is
    /// finite and greater than zero. Factors below [`MIN_SPEED_FACTOR`]
    /// are clamped up to it.
    pub fn new(factor: f64) -> Result<Self, AnimationError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(AnimationError::InvalidSpeedFactor(factor));
        }
        Ok(Self(factor.max(MIN_SPEED_FACTOR)))
    }

    /// The raw multiplier.
    pub fn get(self) -> f64 {
        self.0
    }

    /// Scale a base duration by this factor.
    pub fn scale(self, base: Duration) -> Duration {
        base.div_f64(self.0)
    }
}

impl Default for SpeedFactor {
    fn default() -> Self {
        Self(1.0)
    }
}

impl fmt::Display for SpeedFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_ids_are_unique() {
        let a = SessionId::next();
        let b = SessionId::next();
        assert_ne!(a, b);
        assert!(b.get() > a.get());
    }

    #[test]
    fn test_status_starts_created() {
        let status = SessionStatus::new();
        assert_eq!(status.get(), SessionState::Created);
        assert!(!status.is_running());
    }

    #[test]
    fn test_status_moves_forward() {
        let status = SessionStatus::new();
        assert!(status.advance(SessionState::Created, SessionState::Running));
        assert!(status.is_running());
        assert!(status.advance(SessionState::Running, SessionState::Stopping));
        assert!(status.advance(SessionState::Stopping, SessionState::Stopped));
        assert_eq!(status.get(), SessionState::Stopped);
    }

    #[test]
    fn test_status_refuses_backward_moves() {
        let status = SessionStatus::new();
        assert!(status.advance(SessionState::Created, SessionState::Stopped));
        assert!(!status.advance(SessionState::Stopped, SessionState::Running));
        assert!(!status.advance(SessionState::Stopped, SessionState::Created));
        assert_eq!(status.get(), SessionState::Stopped);
    }

    #[test]
    fn test_status_only_one_winner() {
        let status = SessionStatus::new();
        status.advance(SessionState::Created, SessionState::Running);
        assert!(status.advance(SessionState::Running, SessionState::Stopping));
        assert!(!status.advance(SessionState::Running, SessionState::Stopping));
    }

    #[test]
    fn test_status_concurrent_stop_has_single_winner() {
        use std::sync::Arc;

        let status = Arc::new(SessionStatus::new());
        status.advance(SessionState::Created, SessionState::Running);
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let status = Arc::clone(&status);
                std::thread::spawn(move || {
                    status.advance(SessionState::Running, SessionState::Stopping)
                })
            })
            .collect();
        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
    }

    #[test]
    fn test_speed_factor_rejects_non_positive() {
        assert!(SpeedFactor::new(0.0).is_err());
        assert!(SpeedFactor::new(-1.0).is_err());
        assert!(SpeedFactor::new(f64::NAN).is_err());
        assert!(SpeedFactor::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_speed_factor_clamps_tiny_values() {
        assert_eq!(SpeedFactor::new(0.01).unwrap().get(), MIN_SPEED_FACTOR);
        assert_eq!(SpeedFactor::new(0.25).unwrap().get(), 0.25);
    }

    #[test]
    fn test_speed_factor_scales_duration() {
        let fast = SpeedFactor::new(2.0).unwrap();
        assert_eq!(fast.scale(Duration::from_millis(100)), Duration::from_millis(50));
        let slow = SpeedFactor::new(0.5).unwrap();
        assert_eq!(slow.scale(Duration::from_millis(100)), Duration::from_millis(200));
        assert_eq!(
            SpeedFactor::default().scale(Duration::from_millis(100)),
            Duration::from_millis(100)
        );
    }
}
