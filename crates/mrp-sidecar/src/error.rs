/// Errors that can occur while building or parsing a sidecar.
#[derive(Debug, thiserror::Error)]
pub enum SidecarError {
    /// The sidecar payload is not the expected JSON document.
    #[error("malformed sidecar JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The sidecar payload exceeds the configured maximum size.
    #[error("sidecar too large ({size} bytes, max {max})")]
    TooLarge { size: usize, max: usize },

    /// The sidecar names an ECC scheme this decoder does not implement.
    #[error("sidecar ECC scheme: {0}")]
    Scheme(#[from] mrp_ecc::EccError),
}

pub type Result<T> = std::result::Result<T, SidecarError>;
