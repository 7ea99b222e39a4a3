//! Zarr V3 writer for consolidated cycle datasets.
//!
//! Writes one group per cycle with an array per coordinate and data
//! variable, chunked along `step` only, plus a consolidated metadata
//! document aggregating every node.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, info};
use zarrs::array::codec::bytes_to_bytes::blosc::{
    BloscCodec, BloscCompressionLevel, BloscCompressor, BloscShuffleMode,
};
use zarrs::array::{ArrayBuilder, DataType, DimensionName, FillValue};
use zarrs::array_subset::ArraySubset;
use zarrs::group::GroupBuilder;
use zarrs::storage::{StoreKey, WritableStorageTraits};
use zarrs_filesystem::FilesystemStore;

use grid_frame::dataset::SEQUENCE_DIM;
use grid_frame::{AuxField, Dataset, Variable};

use crate::chunk::ChunkPlan;
use crate::config::{StoreConfig, ZarrCompression};
use crate::error::{Result, StoreError};

/// Store key of the aggregated metadata document.
pub const CONSOLIDATED_KEY: &str = "consolidated_metadata.json";

/// Result of writing a cycle store.
#[derive(Debug)]
pub struct WriteSummary {
    /// Location of the written store.
    pub path: PathBuf,
    /// The step partition that was applied.
    pub chunk_plan: ChunkPlan,
    /// Number of arrays written (coordinates + variables).
    pub arrays: usize,
    /// Uncompressed bytes handed to the store.
    pub bytes_written: u64,
}

/// Writer for persisting a consolidated dataset as a Zarr V3 group.
pub struct CycleWriter {
    config: StoreConfig,
}

impl CycleWriter {
    /// Create a new CycleWriter with the given configuration.
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Write the dataset to a store at `path` in overwrite mode.
    ///
    /// Any pre-existing store at the target location is replaced, not
    /// merged. On success a single confirmation log names the output
    /// location.
    pub fn write(&self, dataset: &Dataset, path: &Path) -> Result<WriteSummary> {
        self.config.validate().map_err(StoreError::Config)?;
        dataset.check_invariants()?;

        if dataset.steps.is_empty() {
            return Err(StoreError::EmptyDimension("step".to_string()));
        }
        if dataset.lats.is_empty() {
            return Err(StoreError::EmptyDimension("latitude".to_string()));
        }
        if dataset.lons.is_empty() {
            return Err(StoreError::EmptyDimension("longitude".to_string()));
        }

        let plan = ChunkPlan::along_step(self.config.chunk_step, dataset.steps.len())?;

        // Overwrite mode: replace any existing store wholesale.
        if path.exists() {
            std::fs::remove_dir_all(path)?;
        }
        std::fs::create_dir_all(path)?;

        let store = Arc::new(
            FilesystemStore::new(path).map_err(|e| StoreError::Storage(e.to_string()))?,
        );

        // Collected (node path, metadata) pairs for the consolidated doc.
        let mut nodes: Vec<(String, serde_json::Value)> = Vec::new();
        let mut bytes_written = 0u64;
        let mut arrays = 0usize;

        // Root group: dimension summary plus scalar auxiliary fields.
        let mut attrs = serde_json::Map::new();
        attrs.insert(
            "dimensions".to_string(),
            serde_json::json!(dataset.dim_names()),
        );
        for (name, field) in &dataset.aux {
            if let AuxField::Scalar(value) = field {
                attrs.insert(name.clone(), serde_json::json!(value));
            }
        }
        let group = GroupBuilder::new()
            .attributes(attrs)
            .build(store.clone(), "/")
            .map_err(|e| StoreError::Zarr(e.to_string()))?;
        group
            .store_metadata()
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        nodes.push((
            "/".to_string(),
            serde_json::to_value(group.metadata())
                .map_err(|e| StoreError::Metadata(e.to_string()))?,
        ));

        // Coordinate arrays, one chunk each.
        let steps: Vec<f64> = dataset.steps.iter().map(|&s| f64::from(s)).collect();
        bytes_written += self.write_axis(&store, "/step", &steps, "step", &mut nodes)?;
        bytes_written +=
            self.write_axis(&store, "/latitude", &dataset.lats, "latitude", &mut nodes)?;
        bytes_written +=
            self.write_axis(&store, "/longitude", &dataset.lons, "longitude", &mut nodes)?;
        arrays += 3;

        if let Some(seq) = &dataset.seq_values {
            if !seq.is_empty() {
                let values: Vec<f64> = seq.iter().map(|&v| f64::from(v)).collect();
                bytes_written += self.write_axis(
                    &store,
                    &format!("/{SEQUENCE_DIM}"),
                    &values,
                    SEQUENCE_DIM,
                    &mut nodes,
                )?;
                arrays += 1;
            }
        }

        // Per-step auxiliary fields become 1-D arrays along step.
        for (name, field) in &dataset.aux {
            if let AuxField::PerStep(values) = field {
                bytes_written +=
                    self.write_axis(&store, &format!("/{name}"), values, "step", &mut nodes)?;
                arrays += 1;
            }
        }

        // Data variables, chunked along step only.
        for (name, var) in &dataset.vars {
            bytes_written += self.write_variable(&store, name, var, &mut nodes)?;
            arrays += 1;
        }

        // Consolidated metadata: one aggregated document so readers can
        // enumerate all nodes without walking the store.
        let mut metadata = serde_json::Map::new();
        for (node_path, value) in nodes {
            metadata.insert(node_path, value);
        }
        let doc = serde_json::json!({
            "zarr_consolidated_format": 1,
            "metadata": metadata,
        });
        let payload =
            serde_json::to_vec_pretty(&doc).map_err(|e| StoreError::Metadata(e.to_string()))?;
        bytes_written += payload.len() as u64;
        let key = StoreKey::new(CONSOLIDATED_KEY)
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        store
            .set(&key, Bytes::from(payload))
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        info!(
            path = %path.display(),
            arrays = arrays,
            chunks = plan.num_chunks(),
            "wrote consolidated store"
        );

        Ok(WriteSummary {
            path: path.to_path_buf(),
            chunk_plan: plan,
            arrays,
            bytes_written,
        })
    }

    /// Write a 1-D float64 coordinate/auxiliary array as a single chunk.
    fn write_axis(
        &self,
        store: &Arc<FilesystemStore>,
        array_path: &str,
        values: &[f64],
        dim: &str,
        nodes: &mut Vec<(String, serde_json::Value)>,
    ) -> Result<u64> {
        let n = values.len() as u64;
        if n == 0 {
            return Err(StoreError::EmptyDimension(dim.to_string()));
        }

        let chunk_grid: zarrs::array::ChunkGrid = vec![n]
            .try_into()
            .map_err(|e| StoreError::Config(format!("{:?}", e)))?;

        let array = ArrayBuilder::new(
            vec![n],
            DataType::Float64,
            chunk_grid,
            FillValue::from(f64::NAN),
        )
        .dimension_names(Some(vec![DimensionName::from(dim)]))
        .build(store.clone(), array_path)
        .map_err(|e| StoreError::Zarr(e.to_string()))?;

        array
            .store_metadata()
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        let subset = ArraySubset::new_with_start_shape(vec![0], vec![n])
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        array
            .store_array_subset_elements(&subset, values)
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        debug!(array = %array_path, len = values.len(), "wrote axis array");
        nodes.push((
            array_path.to_string(),
            serde_json::to_value(array.metadata())
                .map_err(|e| StoreError::Metadata(e.to_string()))?,
        ));

        Ok(values.len() as u64 * std::mem::size_of::<f64>() as u64)
    }

    /// Write one data variable, chunked along `step` only.
    fn write_variable(
        &self,
        store: &Arc<FilesystemStore>,
        name: &str,
        var: &Variable,
        nodes: &mut Vec<(String, serde_json::Value)>,
    ) -> Result<u64> {
        let chunk_step = self.config.chunk_step as u64;

        let (shape, chunk_shape, dims, data): (Vec<u64>, Vec<u64>, Vec<&str>, Vec<f32>) =
            match var {
                Variable::Grid3(a) => {
                    let s = a.shape();
                    (
                        vec![s[0] as u64, s[1] as u64, s[2] as u64],
                        vec![chunk_step, s[1] as u64, s[2] as u64],
                        vec!["step", "latitude", "longitude"],
                        a.iter().copied().collect(),
                    )
                }
                Variable::Grid4(a) => {
                    let s = a.shape();
                    (
                        vec![s[0] as u64, s[1] as u64, s[2] as u64, s[3] as u64],
                        vec![chunk_step, s[1] as u64, s[2] as u64, s[3] as u64],
                        vec!["step", SEQUENCE_DIM, "latitude", "longitude"],
                        a.iter().copied().collect(),
                    )
                }
            };

        let chunk_grid: zarrs::array::ChunkGrid = chunk_shape
            .try_into()
            .map_err(|e| StoreError::Config(format!("{:?}", e)))?;

        let array_path = format!("/{name}");
        let mut binding = ArrayBuilder::new(
            shape.clone(),
            DataType::Float32,
            chunk_grid,
            FillValue::from(f32::NAN),
        );
        let dimension_names: Vec<DimensionName> =
            dims.into_iter().map(DimensionName::from).collect();
        let mut builder = binding.dimension_names(Some(dimension_names));

        // Add compression if configured
        if self.config.compression != ZarrCompression::None {
            let codec = self.create_compression_codec()?;
            builder = builder.bytes_to_bytes_codecs(vec![codec]);
        }

        let array = builder
            .build(store.clone(), &array_path)
            .map_err(|e| StoreError::Zarr(e.to_string()))?;

        array
            .store_metadata()
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        let subset =
            ArraySubset::new_with_start_shape(vec![0; shape.len()], shape.clone())
                .map_err(|e| StoreError::Storage(e.to_string()))?;
        array
            .store_array_subset_elements(&subset, &data)
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        debug!(array = %array_path, shape = ?shape, "wrote variable array");
        nodes.push((
            array_path,
            serde_json::to_value(array.metadata())
                .map_err(|e| StoreError::Metadata(e.to_string()))?,
        ));

        Ok(data.len() as u64 * std::mem::size_of::<f32>() as u64)
    }

    /// Create the compression codec based on configuration.
    fn create_compression_codec(
        &self,
    ) -> Result<Arc<dyn zarrs::array::codec::BytesToBytesCodecTraits>> {
        let level = BloscCompressionLevel::try_from(self.config.compression_level)
            .map_err(|_| StoreError::Config("Invalid compression level".to_string()))?;

        let shuffle = if self.config.shuffle {
            BloscShuffleMode::Shuffle
        } else {
            BloscShuffleMode::NoShuffle
        };

        // typesize is required when shuffle is enabled
        let typesize = if self.config.shuffle {
            Some(4) // f32 = 4 bytes
        } else {
            None
        };

        let compressor = match self.config.compression {
            ZarrCompression::None => {
                return Err(StoreError::Config(
                    "No compression configured".to_string(),
                ))
            }
            ZarrCompression::BloscLz4 => BloscCompressor::LZ4,
            ZarrCompression::BloscZstd => BloscCompressor::Zstd,
        };

        // BloscCodec::new(cname, clevel, blocksize, shuffle_mode, typesize)
        let codec = BloscCodec::new(compressor, level, None, shuffle, typesize)
            .map_err(|e| StoreError::Config(e.to_string()))?;

        Ok(Arc::new(codec))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn tiny_dataset() -> Dataset {
        let mut ds = Dataset {
            steps: vec![0, 3, 6],
            lats: vec![-2.0, -1.0, 0.0],
            lons: vec![10.0, 11.0],
            ..Default::default()
        };
        ds.vars.insert(
            "swh".to_string(),
            Variable::Grid3(Array3::from_shape_fn((3, 3, 2), |(s, y, x)| {
                (s * 100 + y * 10 + x) as f32
            })),
        );
        ds
    }

    #[test]
    fn test_write_rejects_empty_steps() {
        let mut ds = tiny_dataset();
        ds.steps.clear();
        ds.vars.clear();

        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let writer = CycleWriter::new(StoreConfig::default());
        let result = writer.write(&ds, &temp_dir.path().join("empty.zarr"));
        assert!(matches!(result, Err(StoreError::EmptyDimension(_))));
    }

    #[test]
    fn test_write_reports_chunk_plan() {
        let ds = tiny_dataset();
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");

        let config = StoreConfig {
            chunk_step: 2,
            compression: ZarrCompression::None,
            ..Default::default()
        };
        let writer = CycleWriter::new(config);
        let summary = writer
            .write(&ds, &temp_dir.path().join("plan.zarr"))
            .expect("Failed to write");

        assert_eq!(summary.chunk_plan.lengths(), &[2, 1]);
        // step + latitude + longitude + swh
        assert_eq!(summary.arrays, 4);
    }
}
