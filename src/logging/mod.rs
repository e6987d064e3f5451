//! Tracing subscriber initialization.
//!
//! The engine itself only emits `tracing` events; hosts decide where they go.
//! The demo binary sends them to a file so they never interleave with its
//! JSON report on stdout.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_appender::rolling::RollingFileAppender;

/// Default filter directive when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Error type for logging initialization failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to create log directory
    #[error("Failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        /// The directory path that failed to be created
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid log file path (no filename component)
    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    /// Tracing subscriber already initialized
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Initialize the tracing subscriber with file-based logging.
///
/// Respects `RUST_LOG`, defaulting to [`DEFAULT_FILTER`]. Creates the log
/// directory if it doesn't exist.
///
/// # Errors
/// Fails if the directory cannot be created, the path has no file name, or a
/// global subscriber is already installed.
pub fn init(log_path: &Path) -> Result<(), LoggingError> {
    init_with_default_filter(log_path, DEFAULT_FILTER)
}

/// Like [`init`] but with a caller-chosen fallback filter (e.g. `"flashlight=debug"`).
pub fn init_with_default_filter(log_path: &Path, default_filter: &str) -> Result<(), LoggingError> {
    use tracing_subscriber::EnvFilter;

    let writer = file_writer(log_path)?;
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}

/// Build a non-rotating file appender, creating parent directories.
fn file_writer(log_path: &Path) -> Result<RollingFileAppender, LoggingError> {
    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;

    let directory = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    std::fs::create_dir_all(directory).map_err(|source| LoggingError::DirectoryCreation {
        path: directory.to_path_buf(),
        source,
    })?;

    Ok(tracing_appender::rolling::never(directory, file_name))
}
