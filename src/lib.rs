//! termglow - spinners, progress bars and terminal effects that clean up
//! after themselves.
//!
//! Animations run on background threads and paint through a [`terminal::Renderer`].
//! Every running animation is registered with a [`lifecycle::ActiveSessions`]
//! registry so that Ctrl+C (or SIGTERM) stops them all and restores the
//! cursor before the process exits.
//!
//! Most programs only need [`ui::TerminalUi`]:
//!
//! ```no_run
//! use termglow::config::GlowConfig;
//! use termglow::ui::TerminalUi;
//!
//! let ui = TerminalUi::new(GlowConfig::default())?;
//! ui.with_spinner("Fetching", ui.spinner_options(), |spinner| {
//!     spinner.update_suffix(" (1/3)");
//!     Ok::<_, termglow::feedback::AnimationError>(())
//! })?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(missing_docs)]

include!(concat!(env!("OUT_DIR"), "/version.rs"));

pub mod cli;
pub mod config;
pub mod feedback;
pub mod lifecycle;
pub mod terminal;
pub mod ui;

pub use feedback::AnimationError;
pub use ui::TerminalUi;
