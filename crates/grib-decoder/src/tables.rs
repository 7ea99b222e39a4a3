//! Static GRIB2 parameter tables for wave and surface-wind output.
//!
//! Maps the (discipline, category, number) triple of a product definition
//! to the short names used throughout the pipeline. Only the parameters
//! carried by the gridded wave output are listed; anything else is
//! skipped during decoding.

/// Look up the short name for a GRIB2 parameter triple.
pub fn short_name(discipline: u8, category: u8, number: u8) -> Option<&'static str> {
    match (discipline, category, number) {
        // Meteorological products / momentum
        (0, 2, 0) => Some("wdir"),
        (0, 2, 1) => Some("ws"),
        (0, 2, 2) => Some("u"),
        (0, 2, 3) => Some("v"),

        // Oceanographic products / waves
        (10, 0, 3) => Some("swh"),
        (10, 0, 4) => Some("wvdir"),
        (10, 0, 5) => Some("shww"),
        (10, 0, 6) => Some("mpww"),
        (10, 0, 7) => Some("swdir"),
        (10, 0, 8) => Some("shts"),
        (10, 0, 9) => Some("mpts"),
        (10, 0, 10) => Some("dirpw"),
        (10, 0, 11) => Some("perpw"),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wave_parameters() {
        assert_eq!(short_name(10, 0, 3), Some("swh"));
        assert_eq!(short_name(10, 0, 8), Some("shts"));
        assert_eq!(short_name(10, 0, 9), Some("mpts"));
        assert_eq!(short_name(10, 0, 7), Some("swdir"));
    }

    #[test]
    fn test_wind_parameters() {
        assert_eq!(short_name(0, 2, 1), Some("ws"));
        assert_eq!(short_name(0, 2, 0), Some("wdir"));
    }

    #[test]
    fn test_unknown_parameter() {
        assert_eq!(short_name(0, 0, 0), None);
        assert_eq!(short_name(10, 0, 99), None);
        assert_eq!(short_name(2, 0, 3), None);
    }
}
