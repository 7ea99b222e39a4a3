//! Error types for the shared data model.

use thiserror::Error;

/// Errors produced while decoding files or assembling grid data.
#[derive(Error, Debug)]
pub enum GridFrameError {
    /// A file could not be decoded into a frame.
    #[error("failed to decode {path}: {message}")]
    Decode { path: String, message: String },

    /// A decoded frame lacks a required coordinate axis.
    #[error("missing coordinate axis '{0}'")]
    MissingCoordinate(String),

    /// A variable's shape does not match the frame's coordinate axes.
    #[error("variable '{name}' has shape {actual:?}, axes require {expected:?}")]
    ShapeMismatch {
        name: String,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
}

impl GridFrameError {
    /// Create a Decode error.
    pub fn decode(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a MissingCoordinate error.
    pub fn missing_coordinate(name: impl Into<String>) -> Self {
        Self::MissingCoordinate(name.into())
    }
}

/// Result type for data-model operations.
pub type Result<T> = std::result::Result<T, GridFrameError>;
