//! Error types for the pipeline module.

use std::path::PathBuf;
use thiserror::Error;

use crate::converter::ConverterError;
use crate::planner::PlannerError;
use crate::tags::TagError;

/// Errors that abort the conversion of one input directory.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// Output location could not be planned or created.
    #[error(transparent)]
    Planner(#[from] PlannerError),

    /// An external tool failed or could not be run.
    #[error(transparent)]
    Converter(#[from] ConverterError),

    /// Source tags could not be read.
    #[error(transparent)]
    Tag(#[from] TagError),

    /// Listing the input directory failed.
    #[error("Failed to list input directory {path}")]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The scratch directory could not be created.
    #[error("Failed to create scratch directory under {path}")]
    ScratchCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The scratch directory could not be removed.
    #[error("Failed to remove scratch directory {path}")]
    ScratchCleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConversionError {
    /// Whether this error came from a failed or missing external tool.
    pub fn is_external_tool_error(&self) -> bool {
        matches!(self, Self::Converter(e) if e.is_external_tool_error())
    }
}
