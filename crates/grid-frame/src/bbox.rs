//! Geographic bounding box.

use serde::{Deserialize, Serialize};

/// A geographic bounding box in WGS84 coordinates.
///
/// Used as the spatial crop window for the normalizer; both boundaries
/// are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Get the width in degrees.
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Get the height in degrees.
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Check if a point is contained within this bounding box.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        self.contains_lon(lon) && self.contains_lat(lat)
    }

    /// Check if a latitude lies within the box (closed interval).
    pub fn contains_lat(&self, lat: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat
    }

    /// Check if a longitude lies within the box (closed interval).
    pub fn contains_lon(&self, lon: f64) -> bool {
        lon >= self.min_lon && lon <= self.max_lon
    }

    /// Validate that the box is not inverted.
    pub fn validate(&self) -> Result<(), String> {
        if self.min_lat > self.max_lat {
            return Err(format!(
                "inverted latitude range: {} > {}",
                self.min_lat, self.max_lat
            ));
        }
        if self.min_lon > self.max_lon {
            return Err(format!(
                "inverted longitude range: {} > {}",
                self.min_lon, self.max_lon
            ));
        }
        Ok(())
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        // Global coverage
        Self::new(-180.0, -90.0, 180.0, 90.0)
    }
}
