//! termglow - spinners, progress bars and terminal effects.
//!
//! This is the main entry point for the termglow CLI tool.

use clap::Parser;
use termglow::cli::{Cli, CliResult, Commands, GlobalArgs};
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive.
const LOG_ENV: &str = "TERMGLOW_LOG";

fn init_logging(global: &GlobalArgs) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("termglow={}", global.log_level())));
    // Logs go to stderr so they never land on the animation line.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}

fn run(cli: Cli) -> CliResult {
    let global = &cli.global;
    match cli.command {
        None => {
            println!("termglow - spinners, progress bars and terminal effects.");
            println!();
            println!("Run 'termglow --help' for available commands.");
            println!();
            println!("Quick start:");
            println!("  termglow spinner \"Loading\"   # Spin for three seconds");
            println!("  termglow progress --total 50  # Fill a progress bar");
            println!("  termglow matrix               # Digital rain");
            Ok(())
        }
        Some(cmd) => match cmd {
            Commands::Spinner(c) => c.execute(global),
            Commands::Progress(c) => c.execute(global),
            Commands::Multi(c) => c.execute(global),
            Commands::Matrix(c) => c.execute(global),
            Commands::Fire(c) => c.execute(global),
            Commands::Styles(c) => c.execute(),
            Commands::Config(c) => c.execute(global),
            Commands::Completions(c) => c.execute(),
        },
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.global);

    match run(cli) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("command failed: {e:?}");
            eprintln!("\x1b[31mError:\x1b[0m {e}");
            std::process::ExitCode::FAILURE
        }
    }
}
