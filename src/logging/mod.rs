//! Tracing subscriber setup for the replay binary.
//!
//! Stdout carries the recorded host calls, so diagnostics go to a log file.
//! `RUST_LOG` overrides the default `info` filter.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why the log file could not be set up.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The log directory could not be created.
    #[error("Failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        /// Directory that failed to be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The path has no usable file name component.
    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    /// The path has no parent directory.
    #[error("Log path has no parent directory: {0:?}")]
    NoParentDirectory(PathBuf),

    /// A global subscriber is already installed.
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Split a log file path into the directory to create and the file name.
pub fn split_log_path(log_path: &Path) -> Result<(&Path, &str), LoggingError> {
    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;
    let directory = log_path
        .parent()
        .ok_or_else(|| LoggingError::NoParentDirectory(log_path.to_path_buf()))?;
    Ok((directory, file_name))
}

/// Install a global subscriber writing to `log_path`.
///
/// The parent directory is created first, so it exists even when another
/// subscriber was already installed and this call returns
/// [`LoggingError::SubscriberAlreadySet`].
pub fn init(log_path: &Path) -> Result<(), LoggingError> {
    use tracing_subscriber::EnvFilter;

    let (directory, file_name) = split_log_path(log_path)?;
    std::fs::create_dir_all(directory).map_err(|source| LoggingError::DirectoryCreation {
        path: directory.to_path_buf(),
        source,
    })?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}
