//! Error types for monodoc.

use std::path::PathBuf;

use crate::walker::WalkError;

/// Top-level error type for monodoc operations.
///
/// Per-file anomalies (binary content, undecodable bytes, failed heuristic
/// parses) never surface here; they degrade inside the record that hit them.
/// Only root-level configuration problems and output I/O are fatal.
#[derive(Debug, thiserror::Error)]
pub enum MonodocError {
    #[error("root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("walk error: {0}")]
    Walk(#[from] WalkError),
}

/// Map an error to its exit code.
pub fn exit_code(error: &MonodocError) -> i32 {
    match error {
        MonodocError::RootNotFound(_) => 2,
        MonodocError::NotADirectory(_) => 2,
        MonodocError::Io(_) => 1,
        MonodocError::Walk(_) => 1,
    }
}
