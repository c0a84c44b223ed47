use mrp_ecc::EccScheme;
use mrp_frame::FrameConfig;
use mrp_sidecar::SidecarConfig;

/// Configuration for [`encode_with_options`](crate::encode_with_options).
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// ECC applied to the message and metadata payloads.
    pub ecc: EccScheme,
    /// Payload size limit applied while framing.
    pub frame: FrameConfig,
    /// Sidecar construction options.
    pub sidecar: SidecarConfig,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            ecc: EccScheme::Parity,
            frame: FrameConfig::default(),
            sidecar: SidecarConfig::default(),
        }
    }
}

impl EncodeOptions {
    pub fn with_ecc(ecc: EccScheme) -> Self {
        Self {
            ecc,
            ..Self::default()
        }
    }
}

/// Configuration for [`decode_with_options`](crate::decode_with_options).
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    /// When set, a sidecar declaring any other scheme is rejected.
    pub expected_scheme: Option<EccScheme>,
    /// Payload size limit applied while reading frames.
    pub frame: FrameConfig,
    /// Sidecar parsing limits.
    pub sidecar: SidecarConfig,
}
