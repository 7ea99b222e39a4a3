//! Integration test: write a consolidated dataset and read it back with
//! plain `zarrs` arrays.
//!
//! 1. Build a small dataset with known values
//! 2. Write it with `CycleWriter`
//! 3. Open the arrays directly and verify values, chunking, and the
//!    consolidated metadata document

use std::sync::Arc;

use ndarray::Array3;
use zarrs::array::Array;
use zarrs::array_subset::ArraySubset;
use zarrs_filesystem::FilesystemStore;

use grid_frame::{Dataset, Variable};
use zarr_store::{CycleWriter, StoreConfig, ZarrCompression, CONSOLIDATED_KEY};

/// Value at (step, row, col) = step * 1000 + row * 10 + col.
fn test_dataset(n_step: usize, n_lat: usize, n_lon: usize) -> Dataset {
    let mut ds = Dataset {
        steps: (0..n_step as u32).map(|s| s * 3).collect(),
        lats: (0..n_lat).map(|i| -70.0 + i as f64).collect(),
        lons: (0..n_lon).map(|i| -60.0 + i as f64).collect(),
        ..Default::default()
    };
    ds.vars.insert(
        "swh".to_string(),
        Variable::Grid3(Array3::from_shape_fn((n_step, n_lat, n_lon), |(s, y, x)| {
            (s * 1000 + y * 10 + x) as f32
        })),
    );
    ds
}

#[test]
fn test_store_roundtrip_values() {
    let (n_step, n_lat, n_lon) = (5, 8, 6);
    let ds = test_dataset(n_step, n_lat, n_lon);

    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store_path = temp_dir.path().join("cycle.zarr");

    let config = StoreConfig {
        chunk_step: 2,
        compression: ZarrCompression::None,
        ..Default::default()
    };
    let writer = CycleWriter::new(config);
    let summary = writer.write(&ds, &store_path).expect("Failed to write");

    assert_eq!(summary.chunk_plan.lengths(), &[2, 2, 1]);
    assert_eq!(summary.arrays, 4);

    // Read the data variable back.
    let store = Arc::new(FilesystemStore::new(&store_path).expect("Failed to open store"));
    let array = Array::open(store.clone(), "/swh").expect("Failed to open array");
    assert_eq!(array.shape(), &[n_step as u64, n_lat as u64, n_lon as u64]);

    let subset = ArraySubset::new_with_start_shape(
        vec![0, 0, 0],
        vec![n_step as u64, n_lat as u64, n_lon as u64],
    )
    .expect("Failed to build subset");
    let values: Vec<f32> = array
        .retrieve_array_subset_elements(&subset)
        .expect("Failed to read values");

    for s in 0..n_step {
        for y in 0..n_lat {
            for x in 0..n_lon {
                let expected = (s * 1000 + y * 10 + x) as f32;
                let actual = values[(s * n_lat + y) * n_lon + x];
                assert!(
                    (actual - expected).abs() < 0.001,
                    "Mismatch at ({}, {}, {}): expected {}, got {}",
                    s,
                    y,
                    x,
                    expected,
                    actual
                );
            }
        }
    }

    // Coordinate arrays hold the axes.
    let lat_array = Array::open(store.clone(), "/latitude").expect("Failed to open latitude");
    let lat_subset = ArraySubset::new_with_start_shape(vec![0], vec![n_lat as u64])
        .expect("Failed to build subset");
    let lats: Vec<f64> = lat_array
        .retrieve_array_subset_elements(&lat_subset)
        .expect("Failed to read latitudes");
    assert_eq!(lats, ds.lats);
}

#[test]
fn test_consolidated_metadata_lists_all_nodes() {
    let ds = test_dataset(3, 4, 4);

    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store_path = temp_dir.path().join("meta.zarr");

    let config = StoreConfig {
        compression: ZarrCompression::None,
        ..Default::default()
    };
    CycleWriter::new(config)
        .write(&ds, &store_path)
        .expect("Failed to write");

    let doc_path = store_path.join(CONSOLIDATED_KEY);
    let raw = std::fs::read(&doc_path).expect("consolidated document missing");
    let doc: serde_json::Value = serde_json::from_slice(&raw).expect("invalid JSON");

    let metadata = doc["metadata"].as_object().expect("metadata object");
    for node in ["/", "/step", "/latitude", "/longitude", "/swh"] {
        assert!(metadata.contains_key(node), "missing node {}", node);
    }
}

#[test]
fn test_overwrite_replaces_existing_store() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store_path = temp_dir.path().join("overwrite.zarr");

    let config = StoreConfig {
        compression: ZarrCompression::None,
        ..Default::default()
    };
    let writer = CycleWriter::new(config);

    let first = test_dataset(4, 4, 4);
    writer.write(&first, &store_path).expect("first write");

    // Second write has a different variable set; the old array must be gone.
    let mut second = test_dataset(2, 4, 4);
    let values = second.vars.remove("swh").expect("var present");
    second.vars.insert("ws".to_string(), values);
    writer.write(&second, &store_path).expect("second write");

    let store = Arc::new(FilesystemStore::new(&store_path).expect("Failed to open store"));
    assert!(Array::open(store.clone(), "/ws").is_ok());
    assert!(Array::open(store.clone(), "/swh").is_err());
}

#[test]
fn test_write_with_compression() {
    let ds = test_dataset(4, 16, 16);

    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store_path = temp_dir.path().join("compressed.zarr");

    let config = StoreConfig {
        compression: ZarrCompression::BloscZstd,
        compression_level: 1,
        shuffle: true,
        ..Default::default()
    };
    CycleWriter::new(config)
        .write(&ds, &store_path)
        .expect("Failed to write");

    let store = Arc::new(FilesystemStore::new(&store_path).expect("Failed to open store"));
    let array = Array::open(store, "/swh").expect("Failed to open array");
    let subset = ArraySubset::new_with_start_shape(vec![0, 0, 0], vec![4, 16, 16])
        .expect("Failed to build subset");
    let values: Vec<f32> = array
        .retrieve_array_subset_elements(&subset)
        .expect("Failed to read values");
    assert_eq!(values.len(), 4 * 16 * 16);
    assert!((values[0] - 0.0).abs() < 0.001);
}
