//! Trace input sources.
//!
//! A pointer trace is read either from a file path or from piped stdin,
//! always to completion: replay is offline, there is nothing to follow.

use crate::model::TraceError;
use std::io::{BufRead, BufReader, IsTerminal, Read};
use std::path::PathBuf;

/// Read every line of a trace from `reader`.
pub fn read_lines<R: Read>(reader: R) -> Result<Vec<String>, TraceError> {
    BufReader::new(reader)
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .map_err(TraceError::from)
}

/// Read the trace from `file`, or from stdin when no path is given.
///
/// # Errors
///
/// Returns `TraceError::FileNotFound` if the path does not exist,
/// `TraceError::NoInput` if no path is given and stdin is a terminal,
/// and `TraceError::Io` for any other read failure.
pub fn read_trace(file: Option<PathBuf>) -> Result<Vec<String>, TraceError> {
    match file {
        Some(path) => {
            if !path.exists() {
                return Err(TraceError::FileNotFound { path });
            }
            read_lines(std::fs::File::open(&path)?)
        }
        None => {
            let stdin = std::io::stdin();
            if stdin.is_terminal() {
                return Err(TraceError::NoInput);
            }
            read_lines(stdin.lock())
        }
    }
}
