//! Marquee CLI - Command-line interface
//!
//! Looks up a movie from the terminal or serves the search page.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use marquee_core::MarqueeError;
use marquee_core::tracing_setup::{CliLogLevel, init_tracing};

/// Exit status for configuration mistakes the user can fix.
const USAGE_EXIT_CODE: u8 = 2;

#[derive(Parser)]
#[command(name = "marquee")]
#[command(about = "Look up a movie by title")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: commands::Commands,

    /// Console log level
    #[arg(long, global = true, value_enum, default_value = "warn")]
    log_level: CliLogLevel,

    /// TMDB API key (overrides the environment)
    #[arg(long, global = true, env = "TMDB_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Directory for the per-run debug log
    #[arg(long, global = true)]
    logs_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.log_level, cli.logs_dir.as_deref()) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match commands::handle_command(cli.command, cli.api_key).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            match e.downcast_ref::<MarqueeError>() {
                Some(marquee_error) => {
                    eprintln!("Error: {}", marquee_error.user_message());
                    if marquee_error.is_user_error() {
                        return ExitCode::from(USAGE_EXIT_CODE);
                    }
                }
                None => eprintln!("Error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}
