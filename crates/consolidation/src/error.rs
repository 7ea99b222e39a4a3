//! Error types for the consolidation pipeline.

use thiserror::Error;

/// Errors that can occur while consolidating a forecast cycle.
///
/// Every variant is fatal for the cycle: the pipeline performs no
/// retries and no partial recovery.
#[derive(Error, Debug)]
pub enum ConsolidationError {
    /// No files matched for the requested cycle.
    #[error("no input files for cycle={cycle} with pattern={pattern}")]
    NoInputFiles { cycle: String, pattern: String },

    /// Decode or shape error from the data model, propagated unchanged.
    #[error(transparent)]
    Frame(#[from] grid_frame::GridFrameError),

    /// A file disagrees with the first file's schema (strict mode, or a
    /// mismatch stacking itself cannot absorb).
    #[error("schema mismatch in {path}: {message}")]
    SchemaMismatch { path: String, message: String },

    /// Invalid cycle configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// File discovery failed below the input root.
    #[error("file discovery failed: {0}")]
    Discovery(String),

    /// Store write error, propagated unchanged.
    #[error(transparent)]
    Store(#[from] zarr_store::StoreError),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for consolidation operations.
pub type Result<T> = std::result::Result<T, ConsolidationError>;
