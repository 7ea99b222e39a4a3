//! Latitude orientation and spatial cropping.

use std::ops::Range;

use ndarray::{s, Axis};

use grid_frame::{BoundingBox, FrameVariable, GridFrame, GridFrameError};

use crate::error::Result;

/// Ensure ascending latitude order, then crop the frame to the window.
///
/// The latitude axis is flipped when the frame arrives north-to-south;
/// downstream consumers (and plotting) assume south-to-north ordering
/// regardless of the input's native scan direction. Cropping selects the
/// contiguous coordinate range inside `window`, closed on both ends.
///
/// Pure transform: consumes the frame, returns the normalized frame,
/// touches no shared state.
pub fn normalize_frame(mut frame: GridFrame, window: &BoundingBox) -> Result<GridFrame> {
    if frame.lats.is_empty() {
        return Err(GridFrameError::missing_coordinate("latitude").into());
    }
    if frame.lons.is_empty() {
        return Err(GridFrameError::missing_coordinate("longitude").into());
    }

    let descending = frame.lats.len() > 1 && frame.lats[0] > frame.lats[frame.lats.len() - 1];
    if descending {
        frame.lats.reverse();
        for var in frame.vars.values_mut() {
            match var {
                FrameVariable::Plane(a) => a.invert_axis(Axis(0)),
                FrameVariable::Sequence(a) => a.invert_axis(Axis(1)),
            }
        }
    }

    let lat_range = window_range(&frame.lats, window.min_lat, window.max_lat);
    let lon_range = window_range(&frame.lons, window.min_lon, window.max_lon);

    frame.lats = frame.lats[lat_range.clone()].to_vec();
    frame.lons = frame.lons[lon_range.clone()].to_vec();
    for var in frame.vars.values_mut() {
        *var = match var {
            FrameVariable::Plane(a) => FrameVariable::Plane(
                a.slice(s![lat_range.clone(), lon_range.clone()]).to_owned(),
            ),
            FrameVariable::Sequence(a) => FrameVariable::Sequence(
                a.slice(s![.., lat_range.clone(), lon_range.clone()])
                    .to_owned(),
            ),
        };
    }

    Ok(frame)
}

/// The contiguous index range whose coordinate values lie in [min, max].
fn window_range(coords: &[f64], min: f64, max: f64) -> Range<usize> {
    let start = coords
        .iter()
        .position(|&v| v >= min && v <= max)
        .unwrap_or(coords.len());
    let len = coords[start..]
        .iter()
        .take_while(|&&v| v >= min && v <= max)
        .count();
    start..start + len
}
