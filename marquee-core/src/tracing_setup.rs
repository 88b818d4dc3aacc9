//! Tracing setup for Marquee
//!
//! The console shows what the user asked for, on stderr so `--json` output
//! stays parseable. Everything our crates emit also lands in a per-run log
//! file so failed lookups can be diagnosed after the fact.

use std::fs::{File, create_dir_all};
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// File name of the per-run debug log.
pub const LOG_FILE_NAME: &str = "marquee-last-run.log";

/// Directory used when no logs directory is given.
pub const DEFAULT_LOGS_DIR: &str = "logs";

/// Crates traced at full detail in the log file.
const TRACED_CRATES: &[&str] = &["marquee_core", "marquee_search", "marquee_web", "marquee"];

/// Failures while installing the global subscriber.
#[derive(Debug, Error)]
pub enum TracingSetupError {
    /// The logs directory or log file could not be created.
    #[error("cannot write log file {path}: {source}")]
    LogFile {
        /// Path that could not be created
        path: PathBuf,
        /// Underlying I/O failure
        source: io::Error,
    },

    /// Another global subscriber is already installed.
    #[error("tracing already initialized: {0}")]
    AlreadyInitialized(#[from] TryInitError),
}

/// Console verbosity chosen on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum CliLogLevel {
    /// Failures only
    Error,
    /// Failures and recoverable problems
    #[default]
    Warn,
    /// Lookup progress
    Info,
    /// Request-level detail
    Debug,
    /// Everything
    Trace,
}

impl CliLogLevel {
    /// `EnvFilter` directive for the console layer.
    pub fn filter_directive(self) -> &'static str {
        match self {
            CliLogLevel::Error => "error",
            CliLogLevel::Warn => "warn",
            CliLogLevel::Info => "info",
            CliLogLevel::Debug => "debug",
            CliLogLevel::Trace => "trace",
        }
    }
}

/// Dependencies at INFO, our own crates at TRACE.
fn file_filter_directives() -> String {
    TRACED_CRATES
        .iter()
        .fold(String::from("info"), |mut directives, name| {
            directives.push_str(&format!(",{name}=trace"));
            directives
        })
}

fn create_log_file(logs_dir: &Path) -> Result<(PathBuf, File), TracingSetupError> {
    let path = logs_dir.join(LOG_FILE_NAME);
    create_dir_all(logs_dir)
        .and_then(|()| File::create(&path))
        .map(|file| (path.clone(), file))
        .map_err(|source| TracingSetupError::LogFile { path, source })
}

/// Installs the console and file layers as the global subscriber.
///
/// `RUST_LOG`, when set, overrides `console_level` for the console only.
/// The log file is truncated on every run. Returns its path.
///
/// # Errors
///
/// - `TracingSetupError::LogFile` - Logs directory or file cannot be created
/// - `TracingSetupError::AlreadyInitialized` - A subscriber is already set
pub fn init_tracing(
    console_level: CliLogLevel,
    logs_dir: Option<&Path>,
) -> Result<PathBuf, TracingSetupError> {
    let logs_dir = logs_dir.unwrap_or_else(|| Path::new(DEFAULT_LOGS_DIR));
    let (log_path, log_file) = create_log_file(logs_dir)?;

    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(console_level.filter_directive()));
    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(io::stderr)
        .with_filter(console_filter);

    let file_layer = fmt::layer()
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(log_file)
        .with_filter(EnvFilter::new(file_filter_directives()));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    tracing::info!(
        console = console_level.filter_directive(),
        log_file = %log_path.display(),
        "Tracing initialized"
    );

    Ok(log_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_filter_traces_every_workspace_crate() {
        let directives = file_filter_directives();

        assert!(directives.starts_with("info,"));
        for name in TRACED_CRATES {
            assert!(directives.contains(&format!("{name}=trace")));
        }
        assert!(EnvFilter::try_new(&directives).is_ok());
    }

    #[test]
    fn test_default_console_level_is_warn() {
        assert_eq!(CliLogLevel::default().filter_directive(), "warn");
    }

    #[test]
    fn test_unwritable_logs_dir_is_reported() {
        let dir = tempfile::TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"").unwrap();

        let err = create_log_file(&blocker).unwrap_err();

        assert!(matches!(err, TracingSetupError::LogFile { .. }));
    }

    #[test]
    fn test_init_tracing_creates_log_file() {
        let logs = tempfile::TempDir::new().unwrap();

        let path = init_tracing(CliLogLevel::Warn, Some(logs.path())).unwrap();
        tracing::info!(target: "marquee_core", "written to file only");

        assert_eq!(path, logs.path().join(LOG_FILE_NAME));
        assert!(path.exists());
        assert!(matches!(
            init_tracing(CliLogLevel::Warn, Some(logs.path())),
            Err(TracingSetupError::AlreadyInitialized(_))
        ));
    }
}
