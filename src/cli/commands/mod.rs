//! Command implementations for the termglow CLI.
//!
//! This module contains the actual implementations of CLI commands,
//! separated from the argument parsing definitions in cli/mod.rs.

pub mod completions;
pub mod config;
pub mod effects;
pub mod multi;
pub mod progress;
pub mod spinner;
pub mod styles;

use crate::cli::GlobalArgs;
use crate::config::ConfigError;
use crate::feedback::AnimationError;
use crate::ui::TerminalUi;

/// Error type shared by the animation commands.
#[derive(Debug, thiserror::Error)]
pub enum AnimateCommandError {
    /// The configuration could not be loaded or is invalid.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// An animation could not be built or started.
    #[error("{0}")]
    Animation(#[from] AnimationError),
}

/// Result type for the animation commands.
pub type AnimateCommandResult = Result<(), AnimateCommandError>;

/// Build a stdout UI from the config file and the global flags.
pub fn terminal_ui(global: &GlobalArgs) -> Result<TerminalUi, ConfigError> {
    TerminalUi::new(global.load_config()?)
}
