//! Configuration for the store writer.

use serde::{Deserialize, Serialize};

/// Configuration for writing a consolidated cycle store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Chunk length along the `step` dimension.
    pub chunk_step: usize,

    /// Compression codec for data arrays.
    pub compression: ZarrCompression,

    /// Compression level (1-9).
    pub compression_level: u8,

    /// Enable byte shuffle filter for better compression.
    pub shuffle: bool,

    /// Store format version.
    pub format: StoreFormat,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            // 81 splits a 0-240 h cycle into two large chunks plus a tail
            chunk_step: 81,
            compression: ZarrCompression::BloscZstd,
            compression_level: 1,
            shuffle: true,
            format: StoreFormat::V3,
        }
    }
}

impl StoreConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_step == 0 {
            return Err("chunk_step must be > 0".to_string());
        }

        if self.compression_level == 0 || self.compression_level > 9 {
            return Err("compression_level must be 1-9".to_string());
        }

        Ok(())
    }
}

/// Store format version selector.
///
/// Exactly one value is supported: the writer creates Zarr V3 stores
/// only. The selector exists so the supported set is explicit at the
/// configuration surface rather than implicit in the writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StoreFormat {
    /// Zarr V3.
    #[default]
    V3,
}

impl StoreFormat {
    /// Parse from string. Returns `None` for unsupported versions.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "3" | "v3" | "zarr3" => Some(Self::V3),
            _ => None,
        }
    }

    /// Get the format name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V3 => "v3",
        }
    }

    /// The store directory extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::V3 => "zarr",
        }
    }
}

impl std::fmt::Display for StoreFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Compression codec for data arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZarrCompression {
    /// No compression.
    None,
    /// Blosc with LZ4.
    BloscLz4,
    /// Blosc with Zstd (recommended).
    BloscZstd,
}

impl Default for ZarrCompression {
    fn default() -> Self {
        Self::BloscZstd
    }
}

impl ZarrCompression {
    /// Parse from string (case-insensitive).
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "none" => Self::None,
            "blosc_lz4" | "lz4" => Self::BloscLz4,
            "blosc_zstd" | "zstd" => Self::BloscZstd,
            _ => Self::BloscZstd,
        }
    }

    /// Get the codec name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::BloscLz4 => "blosc_lz4",
            Self::BloscZstd => "blosc_zstd",
        }
    }
}

impl std::fmt::Display for ZarrCompression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.chunk_step, 81);
        assert_eq!(config.compression, ZarrCompression::BloscZstd);
        assert_eq!(config.compression_level, 1);
        assert!(config.shuffle);
        assert_eq!(config.format, StoreFormat::V3);
    }

    #[test]
    fn test_config_validation() {
        let mut config = StoreConfig::default();
        assert!(config.validate().is_ok());

        config.chunk_step = 0;
        assert!(config.validate().is_err());

        config = StoreConfig::default();
        config.compression_level = 0;
        assert!(config.validate().is_err());

        config.compression_level = 10;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_store_format_from_str() {
        assert_eq!(StoreFormat::from_str("3"), Some(StoreFormat::V3));
        assert_eq!(StoreFormat::from_str("V3"), Some(StoreFormat::V3));
        assert_eq!(StoreFormat::from_str("2"), None);
        assert_eq!(StoreFormat::from_str("invalid"), None);
    }

    #[test]
    fn test_zarr_compression_from_str() {
        assert_eq!(ZarrCompression::from_str("none"), ZarrCompression::None);
        assert_eq!(
            ZarrCompression::from_str("blosc_lz4"),
            ZarrCompression::BloscLz4
        );
        assert_eq!(
            ZarrCompression::from_str("BLOSC_ZSTD"),
            ZarrCompression::BloscZstd
        );
        assert_eq!(
            ZarrCompression::from_str("invalid"),
            ZarrCompression::BloscZstd
        );
    }
}
