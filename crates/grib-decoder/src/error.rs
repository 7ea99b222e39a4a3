//! Error types for GRIB2 decoding.

use thiserror::Error;

/// Errors that can occur while decoding a GRIB2 file.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse GRIB2 data: {0}")]
    Grib(String),

    #[error("grid geometry error: {0}")]
    Geometry(String),

    #[error("no decodable fields in {0}")]
    NoFields(String),

    #[error("invalid cycle identifier '{cycle}': {message}")]
    InvalidCycle { cycle: String, message: String },

    #[error(transparent)]
    Frame(#[from] grid_frame::GridFrameError),
}

/// Result type for decoding operations.
pub type Result<T> = std::result::Result<T, DecodeError>;
