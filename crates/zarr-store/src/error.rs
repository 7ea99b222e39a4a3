//! Error types for store writing.

use thiserror::Error;

/// Errors that can occur while planning chunks or writing the store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Invalid writer configuration.
    #[error("invalid store configuration: {0}")]
    Config(String),

    /// Invalid chunk partition request.
    #[error("invalid chunk plan: {0}")]
    InvalidChunkPlan(String),

    /// A dataset dimension is empty and cannot be written.
    #[error("empty dimension '{0}' cannot be written")]
    EmptyDimension(String),

    /// Zarr format error.
    #[error("Zarr format error: {0}")]
    Zarr(String),

    /// Storage/IO error from the store backend.
    #[error("storage error: {0}")]
    Storage(String),

    /// Metadata serialization error.
    #[error("metadata error: {0}")]
    Metadata(String),

    /// The dataset violates its own shape invariants.
    #[error(transparent)]
    Shape(#[from] grid_frame::GridFrameError),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Create a Zarr error.
    pub fn zarr(msg: impl Into<String>) -> Self {
        Self::Zarr(msg.into())
    }

    /// Create a Storage error.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
