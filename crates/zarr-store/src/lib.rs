//! Chunk planning and Zarr V3 persistence for consolidated forecast
//! cycles.
//!
//! The pipeline hands a fully consolidated [`grid_frame::Dataset`] to
//! [`CycleWriter`], which:
//!
//! - partitions the `step` dimension into fixed-size chunks
//!   ([`ChunkPlan`]),
//! - writes one Zarr V3 array per coordinate and data variable under a
//!   single group, chunked only along `step`,
//! - aggregates every node's metadata into one consolidated document so
//!   readers can enumerate variables and dimensions without walking the
//!   store.
//!
//! Writes are destructive-overwrite: an existing store at the target
//! location is replaced wholesale. There is no atomic-commit guarantee —
//! a failed write can leave a partially-overwritten store, and recovery
//! is re-running the cycle.

pub mod chunk;
pub mod config;
pub mod error;
pub mod writer;

// Re-export commonly used types at crate root
pub use chunk::ChunkPlan;
pub use config::{StoreConfig, StoreFormat, ZarrCompression};
pub use error::{Result, StoreError};
pub use writer::{CycleWriter, WriteSummary, CONSOLIDATED_KEY};
