//! Per-file decoded grid content.

use std::collections::BTreeMap;

use ndarray::{Array2, Array3};

use crate::error::{GridFrameError, Result};

/// A single decoded data field within one file.
#[derive(Debug, Clone)]
pub enum FrameVariable {
    /// A plain `(lat, lon)` plane.
    Plane(Array2<f32>),
    /// A `(seq, lat, lon)` block of co-located component fields, e.g. the
    /// per-swell-train breakdowns in wave output.
    Sequence(Array3<f32>),
}

impl FrameVariable {
    /// Length of the latitude dimension.
    pub fn lat_len(&self) -> usize {
        match self {
            Self::Plane(a) => a.shape()[0],
            Self::Sequence(a) => a.shape()[1],
        }
    }

    /// Length of the longitude dimension.
    pub fn lon_len(&self) -> usize {
        match self {
            Self::Plane(a) => a.shape()[1],
            Self::Sequence(a) => a.shape()[2],
        }
    }

    /// Sequence-axis length, if this variable carries one.
    pub fn seq_len(&self) -> Option<usize> {
        match self {
            Self::Plane(_) => None,
            Self::Sequence(a) => Some(a.shape()[0]),
        }
    }
}

/// The decoded content of one input file: all fields of a single forecast
/// lead time on one grid.
#[derive(Debug, Clone)]
pub struct GridFrame {
    /// Forecast lead time in hours.
    pub step: u32,
    /// Latitude axis in decoder order (ascending or descending).
    pub lats: Vec<f64>,
    /// Longitude axis.
    pub lons: Vec<f64>,
    /// Data variables keyed by short parameter name.
    pub vars: BTreeMap<String, FrameVariable>,
    /// Scalar auxiliary fields (e.g. `surface`, `valid_time`).
    pub aux: BTreeMap<String, f64>,
}

impl GridFrame {
    /// Create an empty frame over the given axes.
    pub fn new(step: u32, lats: Vec<f64>, lons: Vec<f64>) -> Self {
        Self {
            step,
            lats,
            lons,
            vars: BTreeMap::new(),
            aux: BTreeMap::new(),
        }
    }

    /// Verify that every variable matches the frame's coordinate axes.
    pub fn check_shapes(&self) -> Result<()> {
        for (name, var) in &self.vars {
            if var.lat_len() != self.lats.len() || var.lon_len() != self.lons.len() {
                return Err(GridFrameError::ShapeMismatch {
                    name: name.clone(),
                    expected: vec![self.lats.len(), self.lons.len()],
                    actual: vec![var.lat_len(), var.lon_len()],
                });
            }
        }
        Ok(())
    }
}
