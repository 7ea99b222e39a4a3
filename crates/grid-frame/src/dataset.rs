//! The consolidated dataset spanning one forecast cycle.

use std::collections::BTreeMap;

use ndarray::{Array3, Array4};

use crate::error::{GridFrameError, Result};

/// Name of the extra axis carried by sequence variables.
pub const SEQUENCE_DIM: &str = "sequence";

/// A data variable spanning all forecast lead times.
#[derive(Debug, Clone)]
pub enum Variable {
    /// `(step, lat, lon)`
    Grid3(Array3<f32>),
    /// `(step, seq, lat, lon)` — still carrying the sequence axis.
    Grid4(Array4<f32>),
}

impl Variable {
    /// Length of the step dimension.
    pub fn step_len(&self) -> usize {
        match self {
            Self::Grid3(a) => a.shape()[0],
            Self::Grid4(a) => a.shape()[0],
        }
    }

    /// Length of the latitude dimension.
    pub fn lat_len(&self) -> usize {
        match self {
            Self::Grid3(a) => a.shape()[1],
            Self::Grid4(a) => a.shape()[2],
        }
    }

    /// Length of the longitude dimension.
    pub fn lon_len(&self) -> usize {
        match self {
            Self::Grid3(a) => a.shape()[2],
            Self::Grid4(a) => a.shape()[3],
        }
    }

    /// Sequence-axis length, if this variable carries one.
    pub fn seq_len(&self) -> Option<usize> {
        match self {
            Self::Grid3(_) => None,
            Self::Grid4(a) => Some(a.shape()[1]),
        }
    }

    /// Whether this variable still uses the sequence axis.
    pub fn uses_sequence_axis(&self) -> bool {
        matches!(self, Self::Grid4(_))
    }
}

/// An auxiliary (non-gridded) field carried alongside the data variables.
#[derive(Debug, Clone, PartialEq)]
pub enum AuxField {
    /// One value for the whole cycle.
    Scalar(f64),
    /// One value per forecast step.
    PerStep(Vec<f64>),
}

/// The single in-memory dataset spanning all forecast lead times of one
/// cycle.
///
/// Created by the combiner, mutated in place by the pruner and flattener,
/// consumed by the store writer.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Forecast lead times in hours, one per input file, in file order.
    pub steps: Vec<u32>,
    /// Latitude axis (ascending after normalization).
    pub lats: Vec<f64>,
    /// Longitude axis.
    pub lons: Vec<f64>,
    /// Data variables keyed by name.
    pub vars: BTreeMap<String, Variable>,
    /// Auxiliary fields keyed by name.
    pub aux: BTreeMap<String, AuxField>,
    /// Coordinate values of the sequence axis, present only while the
    /// axis is still part of the dataset.
    pub seq_values: Option<Vec<u32>>,
}

impl Dataset {
    /// Whether the sequence axis is still part of the dataset, either as
    /// a declared coordinate or through a variable that uses it.
    pub fn has_sequence_axis(&self) -> bool {
        self.seq_values.is_some() || self.vars.values().any(Variable::uses_sequence_axis)
    }

    /// Names of the dataset's dimensions.
    pub fn dim_names(&self) -> Vec<&'static str> {
        let mut dims = vec!["step", "latitude", "longitude"];
        if self.has_sequence_axis() {
            dims.insert(1, SEQUENCE_DIM);
        }
        dims
    }

    /// Names of all data variables, in map order.
    pub fn var_names(&self) -> Vec<&str> {
        self.vars.keys().map(String::as_str).collect()
    }

    /// Verify that every variable shares the dataset's axes.
    pub fn check_invariants(&self) -> Result<()> {
        for (name, var) in &self.vars {
            let expected = vec![self.steps.len(), self.lats.len(), self.lons.len()];
            let actual = vec![var.step_len(), var.lat_len(), var.lon_len()];
            if expected != actual {
                return Err(GridFrameError::ShapeMismatch {
                    name: name.clone(),
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}
