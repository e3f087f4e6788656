//! Live terminal feedback.
//!
//! Spinners and cellular effects repaint from a background loop; progress
//! bars and multi-bar blocks repaint synchronously inside the caller's
//! update calls. Every repaint goes through a [`crate::terminal::Renderer`].

pub mod art;
pub mod effects;
pub mod multi;
pub mod progress;
pub mod session;
pub mod spinner;
pub mod throttle;
mod ticker;

pub use art::{next_frame, render_bar, BarGlyphs, BarStyle, FrameSet, SpinnerStyle, MATRIX_GLYPHS};
pub use effects::{
    CellularEffect, EffectSession, FireEffect, FireOptions, MatrixRain, MatrixRainOptions,
};
pub use multi::{ManagedProgress, MultiProgress};
pub use progress::{ProgressBar, ProgressOptions};
pub use session::{SessionId, SessionState, SessionStatus, SpeedFactor};
pub use spinner::{Spinner, SpinnerOptions, SpinnerText};
pub use throttle::{should_render, Clock, ManualClock, SystemClock};

/// How long `stop()` waits for a background loop before giving up on it.
pub const STOP_JOIN_BOUND: std::time::Duration = std::time::Duration::from_millis(100);

/// Error type for building and starting animations.
#[derive(Debug, thiserror::Error)]
pub enum AnimationError {
    /// A glyph sequence had nothing to draw.
    #[error("Glyph sequence must contain at least one non-empty glyph")]
    EmptyGlyphs,

    /// A style name did not match any built-in style.
    #[error("Unknown style: {0}")]
    UnknownStyle(String),

    /// Speed factor was zero, negative or not finite.
    #[error("Invalid speed factor {0}: expected a positive number")]
    InvalidSpeedFactor(f64),

    /// Rain density was outside `[0, 1]`.
    #[error("Invalid density {0}: expected a value between 0 and 1")]
    InvalidDensity(f64),

    /// Fire height was zero.
    #[error("Invalid effect height {0}: expected at least 1 row")]
    InvalidHeight(usize),

    /// Effect duration was negative or not finite.
    #[error("Invalid duration {0}s: expected a non-negative number of seconds")]
    InvalidDuration(f64),

    /// A multi-progress key was registered twice.
    #[error("Progress bar '{0}' is already registered")]
    DuplicateProgress(String),

    /// The background repaint thread could not be created.
    #[error("Failed to spawn animation thread: {0}")]
    Spawn(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animation_error_display() {
        assert!(AnimationError::EmptyGlyphs.to_string().contains("glyph"));
        assert!(AnimationError::InvalidDensity(1.5).to_string().contains("1.5"));
        assert!(AnimationError::DuplicateProgress("dl".into())
            .to_string()
            .contains("'dl'"));
    }

    #[test]
    fn test_spawn_error_from_io() {
        let err: AnimationError = std::io::Error::other("no threads").into();
        assert!(err.to_string().contains("no threads"));
    }
}
