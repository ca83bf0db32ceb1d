//! Application error type.

use sgpa_core::SgpaError;
use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Error from the core engine or its input types.
    #[error(transparent)]
    Core(#[from] SgpaError),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON input was malformed or output could not be encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A course line in text format could not be parsed.
    #[error("line {line}: {message}")]
    Input { line: usize, message: String },
}

impl CliError {
    pub(crate) fn input(line: usize, message: impl Into<String>) -> Self {
        Self::Input {
            line,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
