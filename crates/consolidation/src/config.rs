//! Cycle configuration.
//!
//! Every constant the pipeline relies on — the crop window, the sequence
//! variable candidates, the drop list, the chunk length — is an explicit,
//! overridable field here rather than an embedded literal, so tests can
//! run on small synthetic grids.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use grid_frame::BoundingBox;
use zarr_store::{StoreConfig, StoreFormat};

/// Default glob template locating one cycle's files under the input root.
pub const DEFAULT_FILE_PATTERN: &str = "gfs.{date}/00/wave/gridded/*.grib2";

/// Default chunk length along `step`: splits a 0-240 h cycle (241 steps)
/// into two full chunks plus a tail.
pub const DEFAULT_CHUNK_STEP: usize = 81;

/// Default crop window: latitude -70..0, longitude -60..135.
pub fn default_window() -> BoundingBox {
    BoundingBox::new(-60.0, -70.0, 135.0, 0.0)
}

/// Variables that arrive with the per-swell-train sequence axis.
pub fn default_sequence_vars() -> Vec<String> {
    ["shts", "mpts", "swdir"].map(String::from).to_vec()
}

/// Redundant fields dropped after combining.
pub fn default_drop_vars() -> Vec<String> {
    ["surface", "valid_time"].map(String::from).to_vec()
}

/// Per-file compatibility policy applied while combining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CompatMode {
    /// Trust the first file's schema and skip per-file re-validation.
    /// All files of one cycle come from the same upstream run with a
    /// fixed schema, so this is the fast path.
    #[default]
    Override,
    /// Validate every file's axes and variable set against the first
    /// file before stacking.
    Strict,
}

impl CompatMode {
    /// Parse from string (case-insensitive).
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "strict" => Self::Strict,
            _ => Self::Override,
        }
    }

    /// Get the mode name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Override => "override",
            Self::Strict => "strict",
        }
    }
}

impl std::fmt::Display for CompatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration for processing one forecast cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleConfig {
    /// Forecast date key, e.g. `"20210414"` (00Z run implied).
    pub cycle_id: String,

    /// Root directory containing the cycle's input files.
    pub input_root: PathBuf,

    /// Directory the store is written under.
    pub output_root: PathBuf,

    /// Glob template relative to `input_root`, parameterized by `{date}`.
    pub file_pattern: String,

    /// Spatial crop window applied per file.
    pub window: BoundingBox,

    /// Sequence-variable candidates to flatten.
    pub sequence_vars: Vec<String>,

    /// Fields removed by the pruner.
    pub drop_vars: Vec<String>,

    /// Chunk length along `step`.
    pub chunk_step: usize,

    /// Store format version.
    pub format: StoreFormat,

    /// Per-file compatibility policy.
    pub compat: CompatMode,
}

impl CycleConfig {
    /// Create a configuration with the standard defaults for a cycle.
    pub fn new(
        cycle_id: impl Into<String>,
        input_root: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            cycle_id: cycle_id.into(),
            input_root: input_root.into(),
            output_root: output_root.into(),
            file_pattern: DEFAULT_FILE_PATTERN.to_string(),
            window: default_window(),
            sequence_vars: default_sequence_vars(),
            drop_vars: default_drop_vars(),
            chunk_step: DEFAULT_CHUNK_STEP,
            format: StoreFormat::V3,
            compat: CompatMode::Override,
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.cycle_id.is_empty() {
            return Err("cycle_id must not be empty".to_string());
        }

        if self.chunk_step == 0 {
            return Err("chunk_step must be > 0".to_string());
        }

        if !self.file_pattern.contains("{date}") {
            return Err("file_pattern must contain a {date} placeholder".to_string());
        }

        self.window.validate()?;

        Ok(())
    }

    /// The glob pattern with the cycle identifier substituted.
    pub fn expanded_pattern(&self) -> String {
        self.file_pattern.replace("{date}", &self.cycle_id)
    }

    /// Deterministic output location for this cycle.
    pub fn store_path(&self) -> PathBuf {
        self.output_root
            .join(format!("{}.{}", self.cycle_id, self.format.extension()))
    }

    /// Writer configuration for this cycle.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            chunk_step: self.chunk_step,
            format: self.format,
            ..Default::default()
        }
    }
}
