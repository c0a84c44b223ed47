use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use mrp_ecc::EccScheme;
use mrp_frame::{checksum, crc_hex};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::config::SidecarConfig;
use crate::error::{Result, SidecarError};

/// The integrity document serialized as the `B` frame payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sidecar {
    /// `parity`, `hamming` or `rs`.
    pub ecc_scheme: String,
    /// CRC32 of the encoded `R` payload, 8 uppercase hex digits.
    pub crc_r: String,
    /// CRC32 of the encoded `G` payload, 8 uppercase hex digits.
    pub crc_g: String,
    /// SHA-256 (hex) of the base64-encoded message.
    pub sha256_msg_b64: String,
    /// SHA-256 (hex) of the raw message bytes.
    pub sha256_msg: String,
    /// Pre-ECC length of the `R` payload.
    pub len_r: usize,
    /// Pre-ECC length of the `G` payload.
    pub len_g: usize,
    /// Base64 of the zero-padded XOR of the encoded `R` and `G` payloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parity_block_b64: Option<String>,
    /// Declared parity block length, written by per-plane encoders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parity_len: Option<Value>,
    /// Bits per channel, written by per-plane encoders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bits_per_channel: Option<Value>,
}

impl Sidecar {
    /// Derive a sidecar from the message and the two channel payloads.
    ///
    /// `encoded_r`/`encoded_g` are the post-ECC bytes that get framed;
    /// `len_r`/`len_g` are the pre-ECC lengths.
    pub fn build(
        scheme: EccScheme,
        message: &[u8],
        encoded_r: &[u8],
        encoded_g: &[u8],
        len_r: usize,
        len_g: usize,
        config: &SidecarConfig,
    ) -> Self {
        let parity = parity_block(encoded_r, encoded_g);
        let parity_block_b64 = (config.include_parity_block && !parity.is_empty())
            .then(|| BASE64_STANDARD.encode(&parity));

        Self {
            ecc_scheme: scheme.as_str().to_string(),
            crc_r: crc_hex(checksum(encoded_r)),
            crc_g: crc_hex(checksum(encoded_g)),
            sha256_msg_b64: sha256_hex(BASE64_STANDARD.encode(message).as_bytes()),
            sha256_msg: sha256_hex(message),
            len_r,
            len_g,
            parity_block_b64,
            parity_len: None,
            bits_per_channel: None,
        }
    }

    /// The declared ECC scheme.
    pub fn scheme(&self) -> Result<EccScheme> {
        Ok(self.ecc_scheme.parse()?)
    }

    /// Decoded parity block, if one is present.
    ///
    /// `Some(Err(_))` means the field exists but is not valid base64.
    pub fn parity_block(&self) -> Option<std::result::Result<Vec<u8>, base64::DecodeError>> {
        self.parity_block_b64
            .as_deref()
            .map(|b64| BASE64_STANDARD.decode(b64))
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Parse a sidecar payload.
    pub fn from_json(payload: &[u8], config: &SidecarConfig) -> Result<Self> {
        if payload.len() > config.max_sidecar_size {
            return Err(SidecarError::TooLarge {
                size: payload.len(),
                max: config.max_sidecar_size,
            });
        }
        Ok(serde_json::from_slice(payload)?)
    }
}

/// Byte-wise XOR of `a` and `b`, the shorter one zero-padded.
pub fn parity_block(a: &[u8], b: &[u8]) -> Vec<u8> {
    let len = a.len().max(b.len());
    (0..len)
        .map(|i| a.get(i).copied().unwrap_or(0) ^ b.get(i).copied().unwrap_or(0))
        .collect()
}

/// Lowercase hex SHA-256.
pub fn sha256_hex(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}
