//! Error types for the tags module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing tags.
#[derive(Debug, Error)]
pub enum TagError {
    /// The source file could not be parsed as FLAC.
    #[error("Failed to read tags from {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    /// Tags could not be written to the destination file.
    #[error("Failed to write tags to {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TagError {
    /// Creates a read failed error.
    pub fn read_failed(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::ReadFailed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates a write failed error.
    pub fn write_failed(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::WriteFailed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
