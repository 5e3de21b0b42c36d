//! Error types for the planner module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while planning output locations.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Input directory does not exist or cannot be resolved.
    #[error("Cannot resolve input directory {path}")]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input directory lacks the path components required by the layout.
    #[error("Input directory {path} does not have the expected shape: {reason}")]
    InvalidInputDir { path: PathBuf, reason: String },

    /// Input file has no file name.
    #[error("Input file has no file name: {path}")]
    InvalidInputFile { path: PathBuf },

    /// Failed to create the output directory.
    #[error("Failed to create directory: {path}")]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Home directory could not be determined for `~` expansion.
    #[error("Cannot determine home directory to expand {path}")]
    NoHomeDirectory { path: PathBuf },
}

impl PlannerError {
    /// Creates an invalid input directory error.
    pub fn invalid_input_dir(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidInputDir {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
