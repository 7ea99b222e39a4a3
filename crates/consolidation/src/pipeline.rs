//! Linear orchestration of one forecast cycle.

use std::path::PathBuf;

use tracing::info;

use grid_frame::FrameDecoder;
use zarr_store::{ChunkPlan, CycleWriter};

use crate::combine;
use crate::config::CycleConfig;
use crate::discover;
use crate::error::{ConsolidationError, Result};
use crate::flatten;
use crate::prune;

/// Result of processing one forecast cycle.
#[derive(Debug)]
pub struct CycleSummary {
    /// Number of input files combined.
    pub files: usize,
    /// Data variables present in the written store.
    pub variables: Vec<String>,
    /// Location of the written store.
    pub store_path: PathBuf,
    /// The step chunk partition applied at write time.
    pub chunk_plan: ChunkPlan,
    /// Uncompressed bytes handed to the store.
    pub bytes_written: u64,
}

/// Process one forecast cycle end-to-end.
///
/// Strictly linear: discover → (decode → normalize) per file → combine →
/// prune → flatten → write. Any failure aborts the whole cycle; there are
/// no retries — reliability comes from re-invoking the pipeline.
pub fn process_cycle(config: &CycleConfig, decoder: &dyn FrameDecoder) -> Result<CycleSummary> {
    config
        .validate()
        .map_err(ConsolidationError::InvalidConfig)?;

    let pattern = config.expanded_pattern();
    let files = discover::discover_files(&config.input_root, &pattern)?;
    if files.is_empty() {
        return Err(ConsolidationError::NoInputFiles {
            cycle: config.cycle_id.clone(),
            pattern: config.input_root.join(&pattern).display().to_string(),
        });
    }
    info!(
        cycle = %config.cycle_id,
        files = files.len(),
        "processing forecast cycle"
    );

    let mut dataset = combine::combine_frames(&files, decoder, &config.window, config.compat)?;
    prune::prune_fields(&mut dataset, &config.drop_vars);
    flatten::flatten_sequences(&mut dataset, &config.sequence_vars);

    let writer = CycleWriter::new(config.store_config());
    let store_path = config.store_path();
    let summary = writer.write(&dataset, &store_path)?;

    Ok(CycleSummary {
        files: files.len(),
        variables: dataset
            .var_names()
            .iter()
            .map(|s| s.to_string())
            .collect(),
        store_path: summary.path,
        chunk_plan: summary.chunk_plan,
        bytes_written: summary.bytes_written,
    })
}
