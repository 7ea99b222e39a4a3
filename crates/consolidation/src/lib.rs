//! Forecast-grid consolidation pipeline.
//!
//! Converts one forecast cycle's per-lead-time files into a single
//! consolidated, chunked store. The flow is strictly linear:
//!
//! ```text
//! discover files
//!      │
//!      ▼  (per file, sequential)
//! decode ──► normalize (ascending latitude, window crop)
//!      │
//!      ▼
//! combine along `step`
//!      │
//!      ▼
//! prune redundant fields
//!      │
//!      ▼
//! flatten sequence variables
//!      │
//!      ▼
//! chunk plan + store write
//! ```
//!
//! Everything runs synchronously on the calling thread; an invocation
//! either completes or fails outright, and reliability comes from
//! re-invoking the whole cycle.
//!
//! # Example
//!
//! ```ignore
//! use consolidation::{process_cycle, CycleConfig};
//! use grib_decoder::GribFrameDecoder;
//!
//! let config = CycleConfig::new("20210414", "/data/grib", "/data/zarr");
//! let decoder = GribFrameDecoder::for_cycle(&config.cycle_id)?;
//! let summary = process_cycle(&config, &decoder)?;
//! println!("wrote {}", summary.store_path.display());
//! ```

pub mod combine;
pub mod config;
pub mod discover;
pub mod error;
pub mod flatten;
pub mod normalize;
pub mod pipeline;
pub mod prune;

// Re-export commonly used types at crate root
pub use combine::combine_frames;
pub use config::{CompatMode, CycleConfig, DEFAULT_FILE_PATTERN};
pub use discover::discover_files;
pub use error::{ConsolidationError, Result};
pub use flatten::flatten_sequences;
pub use normalize::normalize_frame;
pub use pipeline::{process_cycle, CycleSummary};
pub use prune::prune_fields;
