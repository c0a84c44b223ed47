use std::fmt;
use std::path::PathBuf;

use mrp_ecc::EccScheme;
use serde::Serialize;
use serde_json::Value;

/// Terminal outcome of one decode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodeStatus {
    /// Every check passed without repair.
    Ok,
    /// One channel was rebuilt from the parity block and now verifies.
    Recovered,
    /// Payloads verify but the sidecar's own bookkeeping does not.
    Degraded,
    /// A CRC still fails or a fatal step aborted the decode.
    Failed,
    /// The message digest does not match the sidecar.
    IntegrityFailed,
}

impl DecodeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DecodeStatus::Ok => "ok",
            DecodeStatus::Recovered => "recovered",
            DecodeStatus::Degraded => "degraded",
            DecodeStatus::Failed => "failed",
            DecodeStatus::IntegrityFailed => "integrity_failed",
        }
    }

    /// Whether the decoded data may be handed to the caller.
    pub fn is_success(self) -> bool {
        matches!(
            self,
            DecodeStatus::Ok | DecodeStatus::Recovered | DecodeStatus::Degraded
        )
    }
}

impl fmt::Display for DecodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-channel decode diagnostics for `R` and `G`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelReport {
    pub channel: char,
    /// CRC32 recorded in the sidecar.
    pub expected_crc: String,
    /// CRC32 of the re-encoded decoded payload.
    pub actual_crc: String,
    pub crc_ok: bool,
    /// Frame header carried the expected channel label.
    pub channel_valid: bool,
    /// Frame header CRC matched the received payload.
    pub frame_crc_ok: bool,
    pub hamming_corrected: bool,
    pub rs_error: Option<String>,
    pub rs_corrected: usize,
    /// Payload was rebuilt from the parity block.
    pub repaired: bool,
}

/// Everything a decode learned about the carrier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodeReport {
    pub status: DecodeStatus,
    pub ecc_scheme: EccScheme,
    /// Expected CRC32 of the encoded `R` payload.
    pub crc_r: String,
    /// Expected CRC32 of the encoded `G` payload.
    pub crc_g: String,
    pub sha_ok: bool,
    pub r: ChannelReport,
    pub g: ChannelReport,
    /// The `B` frame's header CRC matched its payload.
    pub sidecar_crc_ok: bool,
    pub repaired_channel: Option<char>,
    pub warnings: Vec<String>,
}

/// A successful decode: `ok`, `recovered` or `degraded`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decoded {
    pub message: String,
    pub metadata: Value,
    pub report: DecodeReport,
}

/// A decode that could not vouch for its output.
///
/// `report` is present once the sidecar has been parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{reason}")]
pub struct DecodeFailure {
    pub reason: String,
    pub status: DecodeStatus,
    pub report: Option<DecodeReport>,
}

impl DecodeFailure {
    /// A failure before any report could be assembled.
    pub fn fatal(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            status: DecodeStatus::Failed,
            report: None,
        }
    }

    pub(crate) fn with_report(reason: impl Into<String>, report: DecodeReport) -> Self {
        Self {
            reason: reason.into(),
            status: report.status,
            report: Some(report),
        }
    }
}

impl From<crate::error::CodecError> for DecodeFailure {
    fn from(err: crate::error::CodecError) -> Self {
        Self::fatal(err.to_string())
    }
}

/// Framed payload sizes in bytes (after ECC for `r`/`g`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PayloadLengths {
    pub r: usize,
    pub g: usize,
    pub b: usize,
}

impl PayloadLengths {
    pub fn total(&self) -> usize {
        self.r + self.g + self.b
    }
}

/// Result of a file-to-file encode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodeSummary {
    pub cover: PathBuf,
    pub stego: PathBuf,
    pub ecc: EccScheme,
    pub payload_lengths: PayloadLengths,
    pub bits_used: usize,
    pub capacity_bits: usize,
}
