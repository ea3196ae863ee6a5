//! Error types for dualswipe.
//!
//! Two very different kinds of failure live here:
//!
//! - [`AppError`] and [`TraceError`] are ordinary `Result` errors for the outer
//!   shell (config, logging, reading a pointer trace). They compose with `?`.
//! - [`SessionRefusal`] is not a failure of the program. It explains why a
//!   two-finger press did not open a migration session. The controller logs it
//!   and the session stays idle; nothing propagates further.
//!
//! # Recovery Strategy
//!
//! Malformed trace lines are non-fatal: they are reported with their line number
//! and skipped, the rest of the trace still replays. Config and logging errors are
//! fatal and abort startup.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::model::{DisplayId, TaskId};
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error for the `dualswipe` binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Pointer trace could not be read.
    #[error("Trace error: {0}")]
    Trace(#[from] TraceError),

    /// Writing the replay report failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    /// A recorded host call could not be encoded.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors encountered while reading or parsing a recorded pointer trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace file does not exist.
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use dualswipe::model::TraceError;
    ///
    /// let err = TraceError::FileNotFound { path: PathBuf::from("/tmp/missing.jsonl") };
    /// assert!(err.to_string().contains("/tmp/missing.jsonl"));
    /// ```
    #[error("Trace file not found: {path}")]
    FileNotFound {
        /// The path that was attempted.
        path: PathBuf,
    },

    /// No path was given and stdin is an interactive terminal.
    #[error("No input source: provide a trace file or pipe data to stdin")]
    NoInput,

    /// Generic I/O failure reading the trace (permissions, broken stdin pipe).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A trace line is not valid JSON for a pointer event.
    #[error("Invalid JSON at line {line}: {message}")]
    InvalidJson {
        /// 1-based line number.
        line: usize,
        /// Parser message from `serde_json`.
        message: String,
    },

    /// A trace line parsed but describes an impossible event.
    #[error("Invalid pointer event at line {line}: {reason}")]
    InvalidEvent {
        /// 1-based line number.
        line: usize,
        /// What is wrong with it.
        reason: String,
    },
}

/// Why a two-finger press did not open a migration session.
///
/// Every variant leaves the session idle with no mirror allocated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionRefusal {
    /// The origin display has no focused task.
    #[error("no focused task on {0}")]
    NoFocusedTask(DisplayId),

    /// The focused task is the home/launcher task, which never migrates.
    #[error("{0} is the home task")]
    HomeTask(TaskId),

    /// The focused task has no visible surface to drag.
    #[error("{0} has no live top surface")]
    NoOriginSurface(TaskId),

    /// The registry lists no display other than the origin.
    #[error("no display other than {0}")]
    NoTargetDisplay(DisplayId),

    /// The target display exists but its windowing layer is unavailable.
    #[error("windowing layer of {0} is unavailable")]
    TargetLayerMissing(DisplayId),

    /// The compositor could not mirror the origin surface.
    #[error("could not mirror the surface of {0}")]
    MirrorFailed(TaskId),

    /// A settle animation from the previous gesture is still running.
    #[error("previous gesture is still settling")]
    Busy,
}
