//! Error types for the converter module.

use std::path::PathBuf;
use thiserror::Error;

use crate::tags::TagError;

/// Errors that can occur while running the external conversion tools.
#[derive(Debug, Error)]
pub enum ConverterError {
    /// Tool binary not found.
    #[error("{tool} not found at path: {path}")]
    ToolNotFound { tool: String, path: PathBuf },

    /// Tool exited with a non-zero status.
    #[error("{tool} failed with exit code {}: {command}", format_code(.code))]
    ToolFailed {
        tool: String,
        command: String,
        code: Option<i32>,
        stderr: Option<String>,
    },

    /// Reading or writing tags failed.
    #[error(transparent)]
    Tag(#[from] TagError),

    /// I/O error while running a tool.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_code(code: &Option<i32>) -> String {
    code.map(|c| c.to_string())
        .unwrap_or_else(|| "none (terminated by signal)".to_string())
}

impl ConverterError {
    /// Creates a tool failed error.
    pub fn tool_failed(
        tool: impl Into<String>,
        command: impl Into<String>,
        code: Option<i32>,
        stderr: Option<String>,
    ) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            command: command.into(),
            code,
            stderr,
        }
    }

    /// Whether this error came from an external tool (missing or failing).
    pub fn is_external_tool_error(&self) -> bool {
        matches!(self, Self::ToolNotFound { .. } | Self::ToolFailed { .. })
    }
}
