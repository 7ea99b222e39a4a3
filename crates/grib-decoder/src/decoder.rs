//! GRIB2 file decoding into grid frames.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use ndarray::{Array2, Axis};
use tracing::{debug, warn};

use grid_frame::{FrameDecoder, FrameVariable, GridFrame, GridFrameError};

use crate::error::{DecodeError, Result};
use crate::tables;

/// Decoder for GRIB2 wave/wind forecast files, built on the `grib` crate.
///
/// One instance serves a whole forecast cycle; it holds only the cycle
/// reference time and no per-file state, so files may be decoded in any
/// order.
pub struct GribFrameDecoder {
    reference_time: Option<DateTime<Utc>>,
}

impl GribFrameDecoder {
    /// Create a decoder without a cycle reference time.
    ///
    /// The `valid_time` auxiliary field then carries the lead offset in
    /// seconds instead of an absolute timestamp.
    pub fn new() -> Self {
        Self {
            reference_time: None,
        }
    }

    /// Create a decoder for a cycle key (`YYYYMMDD`, 00Z run implied).
    pub fn for_cycle(cycle_id: &str) -> Result<Self> {
        let date = NaiveDate::parse_from_str(cycle_id, "%Y%m%d").map_err(|e| {
            DecodeError::InvalidCycle {
                cycle: cycle_id.to_string(),
                message: e.to_string(),
            }
        })?;
        let reference_time = date
            .and_hms_opt(0, 0, 0)
            .map(|dt| Utc.from_utc_datetime(&dt));
        Ok(Self { reference_time })
    }

    fn decode_file(&self, path: &Path) -> Result<GridFrame> {
        let file = File::open(path)?;
        let grib2 = grib::from_reader(BufReader::new(file))
            .map_err(|e| DecodeError::Grib(format!("{e:?}")))?;

        let mut step: Option<u32> = None;
        let mut axes: Option<(Vec<f64>, Vec<f64>)> = None;
        // Encounter-ordered planes per parameter; repeats become the
        // sequence axis.
        let mut fields: Vec<(&'static str, Vec<Array2<f32>>)> = Vec::new();

        for ((_, _), submessage) in grib2.iter() {
            let discipline = submessage.indicator().discipline;
            let prod_def = submessage.prod_def();

            let (category, number) = match (
                prod_def.parameter_category(),
                prod_def.parameter_number(),
            ) {
                (Some(category), Some(number)) => (category, number),
                _ => {
                    warn!(
                        path = %path.display(),
                        "submessage without parameter identity, skipping"
                    );
                    continue;
                }
            };

            let Some(name) = tables::short_name(discipline, category, number) else {
                debug!(discipline, category, number, "unknown parameter, skipping");
                continue;
            };

            if step.is_none() {
                step = prod_def.forecast_time().map(|ft| ft.value);
            }

            if axes.is_none() {
                let latlons: Vec<(f32, f32)> = submessage
                    .latlons()
                    .map_err(|e| DecodeError::Grib(format!("{e:?}")))?
                    .collect();
                axes = Some(split_axes(&latlons).ok_or_else(|| {
                    DecodeError::Geometry(format!(
                        "cannot derive grid axes for {}",
                        path.display()
                    ))
                })?);
            }
            let Some((lats, lons)) = axes.as_ref() else {
                continue;
            };
            let (n_lat, n_lon) = (lats.len(), lons.len());

            let decoder = grib::Grib2SubmessageDecoder::from(submessage)
                .map_err(|e| DecodeError::Grib(format!("{e:?}")))?;
            let values: Vec<f32> = decoder
                .dispatch()
                .map_err(|e| DecodeError::Grib(format!("{e:?}")))?
                .collect();

            if values.len() != n_lat * n_lon {
                return Err(DecodeError::Geometry(format!(
                    "field '{}' has {} values, grid is {}x{}",
                    name,
                    values.len(),
                    n_lat,
                    n_lon
                )));
            }

            let plane = Array2::from_shape_vec((n_lat, n_lon), values)
                .map_err(|e| DecodeError::Geometry(e.to_string()))?;

            match fields.iter_mut().find(|(n, _)| *n == name) {
                Some((_, planes)) => planes.push(plane),
                None => fields.push((name, vec![plane])),
            }
        }

        let (lats, lons) =
            axes.ok_or_else(|| DecodeError::NoFields(path.display().to_string()))?;
        if fields.is_empty() {
            return Err(DecodeError::NoFields(path.display().to_string()));
        }
        let step = step.unwrap_or(0);

        let mut frame = GridFrame::new(step, lats, lons);
        for (name, mut planes) in fields {
            if planes.len() == 1 {
                frame
                    .vars
                    .insert(name.to_string(), FrameVariable::Plane(planes.remove(0)));
            } else {
                let views: Vec<_> = planes.iter().map(|p| p.view()).collect();
                let stacked = ndarray::stack(Axis(0), &views)
                    .map_err(|e| DecodeError::Geometry(e.to_string()))?;
                frame
                    .vars
                    .insert(name.to_string(), FrameVariable::Sequence(stacked));
            }
        }

        frame.aux.insert("surface".to_string(), 0.0);
        let valid_time = match self.reference_time {
            Some(reference) => {
                (reference + chrono::Duration::hours(i64::from(step))).timestamp() as f64
            }
            None => f64::from(step) * 3600.0,
        };
        frame.aux.insert("valid_time".to_string(), valid_time);

        frame.check_shapes()?;
        debug!(
            path = %path.display(),
            step = step,
            vars = frame.vars.len(),
            "decoded frame"
        );
        Ok(frame)
    }
}

impl Default for GribFrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDecoder for GribFrameDecoder {
    fn decode(&self, path: &Path) -> grid_frame::Result<GridFrame> {
        self.decode_file(path).map_err(|e| match e {
            DecodeError::Frame(inner) => inner,
            other => GridFrameError::decode(path.display().to_string(), other.to_string()),
        })
    }
}

/// Derive the latitude and longitude axes from a row-major scan of
/// (lat, lon) grid points.
///
/// Longitudes above 180 are wrapped into [-180, 180], matching the
/// coordinate frame the crop window is expressed in.
fn split_axes(latlons: &[(f32, f32)]) -> Option<(Vec<f64>, Vec<f64>)> {
    if latlons.is_empty() {
        return None;
    }

    let first_lat = latlons[0].0;
    let n_lon = latlons
        .iter()
        .position(|&(lat, _)| (lat - first_lat).abs() > 1e-6)
        .unwrap_or(latlons.len());
    if n_lon == 0 || latlons.len() % n_lon != 0 {
        return None;
    }
    let n_lat = latlons.len() / n_lon;

    let lons: Vec<f64> = latlons[..n_lon]
        .iter()
        .map(|&(_, lon)| wrap_longitude(f64::from(lon)))
        .collect();
    let lats: Vec<f64> = (0..n_lat)
        .map(|i| f64::from(latlons[i * n_lon].0))
        .collect();

    Some((lats, lons))
}

/// Wrap a 0-360 longitude into [-180, 180].
fn wrap_longitude(lon: f64) -> f64 {
    if lon > 180.0 {
        lon - 360.0
    } else {
        lon
    }
}
