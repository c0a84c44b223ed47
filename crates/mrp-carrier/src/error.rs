use std::path::PathBuf;

/// Errors that can occur while reading or writing a carrier.
#[derive(Debug, thiserror::Error)]
pub enum CarrierError {
    /// The bits to embed or extract do not fit in the carrier.
    #[error("carrier capacity exceeded ({needed} bits needed, {available} available)")]
    CapacityExceeded { needed: usize, available: usize },

    /// Failed to decode the raster at the given path.
    #[error("failed to open raster {path}: {source}")]
    Open {
        path: PathBuf,
        source: image::ImageError,
    },

    /// Failed to encode the raster to the given path.
    #[error("failed to save raster {path}: {source}")]
    Save {
        path: PathBuf,
        source: image::ImageError,
    },

    /// The pixel buffer does not match the declared dimensions.
    #[error("pixel buffer has {len} bytes, expected {expected} for {width}x{height} RGB")]
    DimensionMismatch {
        width: u32,
        height: u32,
        len: usize,
        expected: usize,
    },
}

pub type Result<T> = std::result::Result<T, CarrierError>;
