/// Errors that can occur while encoding or decoding an MRP carrier.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Raster or bit-plane error.
    #[error("carrier error: {0}")]
    Carrier(#[from] mrp_carrier::CarrierError),

    /// Frame-level error.
    #[error("frame error: {0}")]
    Frame(#[from] mrp_frame::FrameError),

    /// ECC error.
    #[error("ecc error: {0}")]
    Ecc(#[from] mrp_ecc::EccError),

    /// Sidecar error.
    #[error("sidecar error: {0}")]
    Sidecar(#[from] mrp_sidecar::SidecarError),

    /// JSON serialization/deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The framed stream does not fit in the cover.
    #[error("payload needs {needed} bits but the cover holds {available}")]
    CapacityExceeded { needed: usize, available: usize },
}

pub type Result<T> = std::result::Result<T, CodecError>;
