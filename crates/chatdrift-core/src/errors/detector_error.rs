//! Detector errors: missing inputs, malformed files, bad arguments.

use std::path::Path;

use super::error_code::{self, ChatDriftErrorCode};

/// Errors surfaced by the detector facade.
///
/// A failed or ambiguous detection is not an error; it is `None`.
#[derive(Debug, thiserror::Error)]
pub enum DetectorError {
    #[error("Input not found: {path}")]
    InputNotFound { path: String },

    #[error("Invalid format in {source_name}: {message}")]
    InvalidFormat { source_name: String, message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("Config error: {message}")]
    Config { message: String },
}

impl DetectorError {
    /// Map an I/O error on `path` to `InputNotFound` or `Io`.
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::InputNotFound {
                path: path.display().to_string(),
            },
            _ => Self::Io {
                path: path.display().to_string(),
                message: err.to_string(),
            },
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

impl ChatDriftErrorCode for DetectorError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InputNotFound { .. } => error_code::INPUT_NOT_FOUND,
            Self::InvalidFormat { .. } => error_code::INVALID_FORMAT,
            Self::InvalidInput { .. } => error_code::INVALID_INPUT,
            Self::Io { .. } => error_code::IO_ERROR,
            Self::Config { .. } => error_code::CONFIG_ERROR,
        }
    }
}
