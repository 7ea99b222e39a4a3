//! Forecast-cycle converter.
//!
//! Consolidates one forecast cycle's GRIB2 files into a single chunked
//! Zarr store: spatial normalization, step-axis concatenation, redundant
//! field pruning, sequence flattening, and a consolidated-metadata write.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use consolidation::{process_cycle, CompatMode, CycleConfig};
use grib_decoder::GribFrameDecoder;
use zarr_store::StoreFormat;

#[derive(Parser, Debug)]
#[command(name = "converter")]
#[command(about = "Consolidate one forecast cycle of GRIB2 files into a chunked Zarr store")]
struct Args {
    /// Forecast date key, e.g. 20240115 (00Z cycle)
    #[arg(short, long)]
    date: String,

    /// Directory containing the GRIB2 files
    #[arg(long)]
    input_root: PathBuf,

    /// Directory to write the Zarr store under
    #[arg(long)]
    output_root: PathBuf,

    /// Glob pattern locating the cycle's files, relative to input root
    #[arg(long, default_value = consolidation::DEFAULT_FILE_PATTERN)]
    file_pattern: String,

    /// Chunk length along the step dimension
    #[arg(long, default_value_t = 81)]
    chunk_step: usize,

    /// Store format version (only "3" is supported)
    #[arg(long, default_value = "3")]
    zarr_format: String,

    /// Validate every file against the first instead of trusting the
    /// cycle's schema
    #[arg(long)]
    strict: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let Some(format) = StoreFormat::from_str(&args.zarr_format) else {
        bail!(
            "unsupported store format '{}': only Zarr v3 is supported",
            args.zarr_format
        );
    };

    let mut config = CycleConfig::new(args.date.clone(), &args.input_root, &args.output_root);
    config.file_pattern = args.file_pattern;
    config.chunk_step = args.chunk_step;
    config.format = format;
    if args.strict {
        config.compat = CompatMode::Strict;
    }

    let decoder = GribFrameDecoder::for_cycle(&args.date)
        .with_context(|| format!("invalid cycle date '{}'", args.date))?;

    let summary = process_cycle(&config, &decoder)
        .with_context(|| format!("failed to process cycle {}", args.date))?;

    info!(
        cycle = %args.date,
        files = summary.files,
        variables = summary.variables.len(),
        store = %summary.store_path.display(),
        "cycle conversion finished"
    );

    Ok(())
}
