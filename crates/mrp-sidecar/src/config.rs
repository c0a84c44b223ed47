use mrp_frame::DEFAULT_MAX_PAYLOAD;

/// Controls sidecar construction and parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidecarConfig {
    /// When true, `parity_block_b64` is emitted whenever the block is non-empty.
    pub include_parity_block: bool,
    /// Maximum serialized sidecar size accepted by the parser.
    pub max_sidecar_size: usize,
}

impl Default for SidecarConfig {
    fn default() -> Self {
        Self {
            include_parity_block: true,
            max_sidecar_size: DEFAULT_MAX_PAYLOAD,
        }
    }
}
