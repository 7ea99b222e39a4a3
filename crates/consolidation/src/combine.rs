//! Sequential decode-normalize-stack along the step axis.

use std::collections::BTreeMap;
use std::path::PathBuf;

use ndarray::{s, Array3, Array4};
use tracing::{debug, info};

use grid_frame::{
    AuxField, BoundingBox, Dataset, FrameDecoder, FrameVariable, GridFrame, Variable,
};

use crate::config::CompatMode;
use crate::error::{ConsolidationError, Result};
use crate::normalize;

/// Combine the given files into one consolidated dataset.
///
/// Files are decoded sequentially in the given order — decoding is
/// I/O-bound, so fanning out across threads buys nothing here — and each
/// frame is normalized before staging. Coordinates and structure are
/// taken from the first file; under [`CompatMode::Override`] later files
/// are trusted to match, under [`CompatMode::Strict`] each one is
/// validated against the first.
///
/// The resulting `step` axis has exactly one entry per input file, in
/// input order.
pub fn combine_frames(
    paths: &[PathBuf],
    decoder: &dyn FrameDecoder,
    window: &BoundingBox,
    compat: CompatMode,
) -> Result<Dataset> {
    if paths.is_empty() {
        return Err(ConsolidationError::InvalidConfig(
            "cannot combine an empty file list".to_string(),
        ));
    }

    let mut frames: Vec<GridFrame> = Vec::with_capacity(paths.len());
    for path in paths {
        let frame = decoder.decode(path)?;
        let frame = normalize::normalize_frame(frame, window)?;
        if compat == CompatMode::Strict {
            if let Some(first) = frames.first() {
                check_compatible(first, &frame).map_err(|message| {
                    ConsolidationError::SchemaMismatch {
                        path: path.display().to_string(),
                        message,
                    }
                })?;
            }
        }
        debug!(path = %path.display(), step = frame.step, "staged frame");
        frames.push(frame);
    }

    let dataset = stack_frames(&frames)?;
    info!(
        steps = dataset.steps.len(),
        vars = dataset.vars.len(),
        "combined cycle dataset"
    );
    Ok(dataset)
}

/// Validate a later frame against the first frame's schema.
fn check_compatible(first: &GridFrame, frame: &GridFrame) -> std::result::Result<(), String> {
    if frame.lats != first.lats {
        return Err("latitude axis differs from first file".to_string());
    }
    if frame.lons != first.lons {
        return Err("longitude axis differs from first file".to_string());
    }

    let first_vars: Vec<&String> = first.vars.keys().collect();
    let vars: Vec<&String> = frame.vars.keys().collect();
    if vars != first_vars {
        return Err(format!(
            "variable set {:?} differs from first file {:?}",
            vars, first_vars
        ));
    }

    for (name, var) in &frame.vars {
        if var.seq_len() != first.vars[name].seq_len() {
            return Err(format!(
                "sequence length of '{}' differs from first file",
                name
            ));
        }
    }

    Ok(())
}

/// Stack normalized frames into the consolidated dataset.
fn stack_frames(frames: &[GridFrame]) -> Result<Dataset> {
    let first = &frames[0];
    let n_step = frames.len();
    let lats = first.lats.clone();
    let lons = first.lons.clone();
    let (n_lat, n_lon) = (lats.len(), lons.len());
    let steps: Vec<u32> = frames.iter().map(|f| f.step).collect();

    let mut vars = BTreeMap::new();
    for (name, template) in &first.vars {
        let var = match template.seq_len() {
            None => {
                let mut stacked = Array3::zeros((n_step, n_lat, n_lon));
                for (i, frame) in frames.iter().enumerate() {
                    let plane = match frame.vars.get(name) {
                        Some(FrameVariable::Plane(plane))
                            if plane.shape() == [n_lat, n_lon] =>
                        {
                            plane
                        }
                        _ => return Err(stacking_mismatch(name, i)),
                    };
                    stacked.slice_mut(s![i, .., ..]).assign(plane);
                }
                Variable::Grid3(stacked)
            }
            Some(k) => {
                let mut stacked = Array4::zeros((n_step, k, n_lat, n_lon));
                for (i, frame) in frames.iter().enumerate() {
                    let block = match frame.vars.get(name) {
                        Some(FrameVariable::Sequence(block))
                            if block.shape() == [k, n_lat, n_lon] =>
                        {
                            block
                        }
                        _ => return Err(stacking_mismatch(name, i)),
                    };
                    stacked.slice_mut(s![i, .., .., ..]).assign(block);
                }
                Variable::Grid4(stacked)
            }
        };
        vars.insert(name.clone(), var);
    }

    // Auxiliary fields: constant across files collapse to a scalar,
    // otherwise one value per step.
    let mut aux = BTreeMap::new();
    for (name, first_value) in &first.aux {
        let values: Vec<f64> = frames
            .iter()
            .map(|f| f.aux.get(name).copied().unwrap_or(*first_value))
            .collect();
        let constant = values.iter().all(|v| *v == values[0]);
        let field = if constant {
            AuxField::Scalar(values[0])
        } else {
            AuxField::PerStep(values)
        };
        aux.insert(name.clone(), field);
    }

    let seq_values: Option<Vec<u32>> = first
        .vars
        .values()
        .find_map(FrameVariable::seq_len)
        .map(|k| (0..k as u32).collect());

    Ok(Dataset {
        steps,
        lats,
        lons,
        vars,
        aux,
        seq_values,
    })
}

fn stacking_mismatch(name: &str, index: usize) -> ConsolidationError {
    ConsolidationError::SchemaMismatch {
        path: format!("input #{}", index),
        message: format!("variable '{}' is missing or has a different shape", name),
    }
}
