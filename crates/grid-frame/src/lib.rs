//! Shared data model for the forecast-archive workspace.
//!
//! This crate defines the value types the consolidation pipeline moves
//! between its stages:
//!
//! - [`GridFrame`]: the decoded content of one input file (one forecast
//!   lead time)
//! - [`Dataset`]: the consolidated dataset spanning all lead times of a
//!   forecast cycle
//! - [`BoundingBox`]: the geographic crop window
//! - [`FrameDecoder`]: the seam trait a file-format decoder implements
//!
//! Frames are transient: a decoder produces one per file and the combiner
//! consumes it immediately. The dataset is built once per cycle, mutated
//! in place by the pruning and flattening stages, and finally handed to
//! the store writer.

pub mod bbox;
pub mod dataset;
pub mod decoder;
pub mod error;
pub mod frame;

// Re-export commonly used types at crate root
pub use bbox::BoundingBox;
pub use dataset::{AuxField, Dataset, Variable};
pub use decoder::FrameDecoder;
pub use error::{GridFrameError, Result};
pub use frame::{FrameVariable, GridFrame};
