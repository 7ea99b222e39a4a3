//! GRIB2 decoding of wave-forecast files into [`grid_frame::GridFrame`]s.
//!
//! This crate is the pipeline's file-format collaborator. It wraps the
//! `grib` crate: each submessage of a file is decoded, its parameter
//! identity mapped to a short name through the static tables in
//! [`tables`], and its values reshaped onto the (lat, lon) grid derived
//! from the submessage geometry. Repeated occurrences of the same
//! parameter within one file (the per-swell-train wave fields) are
//! stacked, in encounter order, into the sequence axis.
//!
//! Unknown parameters are skipped with a log line rather than failing the
//! file; a file with no decodable field at all is an error.

pub mod decoder;
pub mod error;
pub mod tables;

pub use decoder::GribFrameDecoder;
pub use error::{DecodeError, Result};
