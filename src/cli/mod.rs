//! CLI commands and argument handling.
//!
//! This module contains the clap CLI definitions; the command bodies live
//! in [`commands`].

pub mod commands;

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::config::{ConfigError, GlowConfig};
use crate::feedback::{BarStyle, SpinnerStyle};
use crate::terminal::Theme;

/// Result type shared by every command's `execute`.
pub type CliResult = anyhow::Result<()>;

/// Spinners, progress bars and terminal effects that clean up after themselves.
///
/// Every animation restores the cursor and clears its line on exit,
/// including when interrupted with Ctrl+C.
#[derive(Parser, Debug)]
#[command(name = "termglow")]
#[command(author, version = crate::VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Flags shared by every command.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// The command to run; prints a short usage note when absent.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Flags accepted before or after any subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Config file to read (default: ./termglow.toml).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Colour theme, overriding the config file.
    #[arg(long, global = true, env = "TERMGLOW_THEME", value_name = "NAME")]
    pub theme: Option<Theme>,

    /// Speed multiplier, overriding the config file (2 = twice as fast).
    #[arg(long, global = true, env = "TERMGLOW_SPEED", value_name = "FACTOR")]
    pub speed: Option<f64>,

    /// Keep the cursor visible while animating.
    #[arg(long, global = true)]
    pub debug: bool,

    /// Disable colour output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log more to stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

impl GlobalArgs {
    /// Load the config file and apply the command-line overrides.
    pub fn load_config(&self) -> Result<GlowConfig, ConfigError> {
        let mut config = GlowConfig::load(self.config.as_deref())?;
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Apply flag and environment overrides on top of `config`.
    pub fn apply_overrides(&self, config: &mut GlowConfig) {
        if let Some(theme) = self.theme {
            config.display.theme = theme;
        }
        if let Some(speed) = self.speed {
            config.display.speed_factor = speed;
        }
        if self.debug {
            config.display.debug = true;
        }
        if self.no_color {
            config.display.color = false;
        }
    }

    /// Default tracing directive for the verbosity level.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Top-level commands for termglow.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a spinner for a while, then a success line.
    ///
    /// Examples:
    ///   termglow spinner "Fetching index" --seconds 2
    ///   termglow spinner --style moon
    Spinner(SpinnerCommand),

    /// Drive a progress bar evenly from 0 to total.
    Progress(ProgressCommand),

    /// Run several progress bars at different rates in one block.
    Multi(MultiCommand),

    /// Matrix-style digital rain.
    Matrix(MatrixCommand),

    /// A burning fire along the top of the terminal.
    Fire(FireCommand),

    /// List spinner styles, bar styles and themes.
    Styles(StylesCommand),

    /// Manage configuration.
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions.
    ///
    /// Outputs completion script to stdout for bash, zsh, or fish.
    Completions(CompletionsCommand),
}

/// Arguments for the spinner command.
#[derive(Args, Debug)]
pub struct SpinnerCommand {
    /// Text drawn after the spinner glyph.
    #[arg(default_value = "Working...")]
    pub message: String,

    /// Spinner style (see `termglow styles`).
    #[arg(short, long)]
    pub style: Option<SpinnerStyle>,

    /// How long to spin.
    #[arg(long, default_value_t = 3.0)]
    pub seconds: f64,

    /// Text drawn after the message.
    #[arg(long)]
    pub suffix: Option<String>,
}

/// Arguments for the progress command.
#[derive(Args, Debug)]
pub struct ProgressCommand {
    /// Label drawn before the bar.
    #[arg(default_value = "Progress")]
    pub message: String,

    /// Number of steps.
    #[arg(short, long, default_value_t = 100)]
    pub total: u64,

    /// Bar style (see `termglow styles`).
    #[arg(short, long)]
    pub style: Option<BarStyle>,

    /// How long the bar takes to fill.
    #[arg(long, default_value_t = 3.0)]
    pub seconds: f64,
}

/// Arguments for the multi command.
#[derive(Args, Debug)]
pub struct MultiCommand {
    /// Number of bars.
    #[arg(short, long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=16))]
    pub bars: u8,

    /// Steps per bar.
    #[arg(short, long, default_value_t = 100)]
    pub total: u64,

    /// Roughly how long the slowest bar takes.
    #[arg(long, default_value_t = 3.0)]
    pub seconds: f64,
}

/// Arguments for the matrix command.
#[derive(Args, Debug)]
pub struct MatrixCommand {
    /// Chance that a column carries a drop (0 to 1).
    #[arg(long)]
    pub density: Option<f64>,

    /// Run time in seconds at speed 1.
    #[arg(long)]
    pub duration: Option<f64>,

    /// Seed for a repeatable run.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for the fire command.
#[derive(Args, Debug)]
pub struct FireCommand {
    /// Rows of fire.
    #[arg(long)]
    pub height: Option<usize>,

    /// Run time in seconds at speed 1.
    #[arg(long)]
    pub duration: Option<f64>,

    /// Maximum heat lost per cell per frame.
    #[arg(long)]
    pub cooling: Option<u8>,

    /// Seed for a repeatable run.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for the styles command.
#[derive(Args, Debug)]
pub struct StylesCommand {}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show all configuration values.
    ///
    /// Displays all config sections and their current values.
    Show(ConfigShowCommand),

    /// Get a specific config value.
    ///
    /// Use dot notation (e.g., progress.throttle_ms).
    Get(ConfigGetCommand),

    /// Set a config value and write the config file.
    Set(ConfigSetCommand),

    /// Reset a key, or a whole section, to its default.
    Unset(ConfigUnsetCommand),

    /// Explain what config keys do.
    Explain(ConfigExplainCommand),

    /// List all valid config keys.
    Keys(ConfigKeysCommand),
}

/// Arguments for 'config show' command.
#[derive(Args, Debug)]
pub struct ConfigShowCommand {
    /// Filter to a specific section (e.g., 'spinner', 'effects').
    #[arg(short = 's', long)]
    pub section: Option<String>,
}

/// Arguments for 'config get' command.
#[derive(Args, Debug)]
pub struct ConfigGetCommand {
    /// Config key in dot notation (e.g., progress.throttle_ms).
    pub key: String,
}

/// Arguments for 'config set' command.
#[derive(Args, Debug)]
pub struct ConfigSetCommand {
    /// Config key in dot notation.
    pub key: String,
    /// New value.
    pub value: String,
}

/// Arguments for 'config unset' command.
#[derive(Args, Debug)]
pub struct ConfigUnsetCommand {
    /// Config key in dot notation, or a section name.
    pub key: String,
}

/// Arguments for 'config explain' command.
#[derive(Args, Debug)]
pub struct ConfigExplainCommand {
    /// Key, section or search term. Omit to list everything.
    pub key: Option<String>,
}

/// Arguments for 'config keys' command.
#[derive(Args, Debug)]
pub struct ConfigKeysCommand {}

/// Arguments for the completions command.
#[derive(Args, Debug)]
pub struct CompletionsCommand {
    /// Shell to generate completions for.
    #[arg(value_parser = ["bash", "zsh", "fish"])]
    pub shell: String,
}

// ============================================================================
// Command implementations
// ============================================================================

impl SpinnerCommand {
    /// Execute the spinner command.
    pub fn execute(&self, global: &GlobalArgs) -> CliResult {
        let ui = commands::terminal_ui(global)?;
        commands::spinner::run(
            &ui,
            &self.message,
            self.style,
            self.suffix.as_deref(),
            self.seconds,
        )?;
        Ok(())
    }
}

impl ProgressCommand {
    /// Execute the progress command.
    pub fn execute(&self, global: &GlobalArgs) -> CliResult {
        let ui = commands::terminal_ui(global)?;
        commands::progress::run(&ui, &self.message, self.total, self.style, self.seconds)?;
        Ok(())
    }
}

impl MultiCommand {
    /// Execute the multi command.
    pub fn execute(&self, global: &GlobalArgs) -> CliResult {
        let ui = commands::terminal_ui(global)?;
        commands::multi::run(&ui, usize::from(self.bars), self.total, self.seconds)?;
        Ok(())
    }
}

impl MatrixCommand {
    /// Execute the matrix command.
    pub fn execute(&self, global: &GlobalArgs) -> CliResult {
        let ui = commands::terminal_ui(global)?;
        let options = commands::effects::MatrixOverrides {
            density: self.density,
            duration: self.duration,
            seed: self.seed,
        };
        commands::effects::matrix(&ui, &options)?;
        Ok(())
    }
}

impl FireCommand {
    /// Execute the fire command.
    pub fn execute(&self, global: &GlobalArgs) -> CliResult {
        let ui = commands::terminal_ui(global)?;
        let options = commands::effects::FireOverrides {
            height: self.height,
            duration: self.duration,
            cooling: self.cooling,
            seed: self.seed,
        };
        commands::effects::fire(&ui, &options)?;
        Ok(())
    }
}

impl StylesCommand {
    /// Execute the styles command.
    pub fn execute(&self) -> CliResult {
        commands::styles::list_styles();
        Ok(())
    }
}

impl ConfigCommands {
    /// Execute whichever config subcommand was chosen.
    pub fn execute(&self, global: &GlobalArgs) -> CliResult {
        let path = global.config.as_deref();
        match self {
            ConfigCommands::Show(c) => commands::config::config_show(path, c.section.as_deref())?,
            ConfigCommands::Get(c) => commands::config::config_get(path, &c.key)?,
            ConfigCommands::Set(c) => commands::config::config_set(path, &c.key, &c.value)?,
            ConfigCommands::Unset(c) => commands::config::config_unset(path, &c.key)?,
            ConfigCommands::Explain(c) => {
                commands::config::config_explain(path, c.key.as_deref())?
            }
            ConfigCommands::Keys(_) => commands::config::config_keys()?,
        }
        Ok(())
    }
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(&self) -> CliResult {
        commands::completions::completions(&self.shell)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_spinner_defaults() {
        let cli = Cli::try_parse_from(["termglow", "spinner"]).unwrap();
        match cli.command {
            Some(Commands::Spinner(c)) => {
                assert_eq!(c.message, "Working...");
                assert_eq!(c.seconds, 3.0);
                assert!(c.style.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_styles_by_name() {
        let cli =
            Cli::try_parse_from(["termglow", "progress", "Copy", "--style", "arrows"]).unwrap();
        match cli.command {
            Some(Commands::Progress(c)) => assert_eq!(c.style, Some(BarStyle::Arrows)),
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(Cli::try_parse_from(["termglow", "spinner", "--style", "wobble"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "termglow", "fire", "--theme", "ocean", "--speed", "2", "--debug", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.global.theme, Some(Theme::Ocean));
        assert_eq!(cli.global.speed, Some(2.0));
        assert!(cli.global.debug);
        assert_eq!(cli.global.log_level(), "debug");
    }

    #[test]
    fn test_multi_rejects_zero_bars() {
        assert!(Cli::try_parse_from(["termglow", "multi", "--bars", "0"]).is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let global = GlobalArgs {
            theme: Some(Theme::Neon),
            speed: Some(0.5),
            no_color: true,
            ..GlobalArgs::default()
        };
        let mut config = GlowConfig::default();
        global.apply_overrides(&mut config);
        assert_eq!(config.display.theme, Theme::Neon);
        assert_eq!(config.display.speed_factor, 0.5);
        assert!(!config.display.color);
        assert!(!config.display.debug);
    }

    #[test]
    fn test_log_level_defaults_to_warn() {
        assert_eq!(GlobalArgs::default().log_level(), "warn");
    }
}
