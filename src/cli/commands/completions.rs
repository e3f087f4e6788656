//! Completions command implementation.
//!
//! Generates shell completions for `termglow` from the clap definitions.

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io;

use crate::cli::Cli;

/// Result type for completions command operations.
pub type CompletionsCommandResult = Result<(), CompletionsCommandError>;

/// Error type for completions command operations.
#[derive(Debug, thiserror::Error)]
pub enum CompletionsCommandError {
    /// The specified shell is not supported for completions.
    #[error("Unsupported shell: {0}")]
    UnsupportedShell(String),
}

/// Execute the completions command.
pub fn completions(shell: &str) -> CompletionsCommandResult {
    let shell_enum = match shell {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        _ => return Err(CompletionsCommandError::UnsupportedShell(shell.to_string())),
    };

    let mut cmd = Cli::command();
    generate(shell_enum, &mut cmd, "termglow", &mut io::stdout());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completions_rejects_unknown_shell() {
        let err = completions("tcsh").unwrap_err();
        assert!(matches!(err, CompletionsCommandError::UnsupportedShell(ref s) if s == "tcsh"));
    }

    #[test]
    fn test_completions_command_error_display() {
        let err = CompletionsCommandError::UnsupportedShell("powershell".to_string());
        assert!(err.to_string().contains("Unsupported shell"));
        assert!(err.to_string().contains("powershell"));
    }
}
