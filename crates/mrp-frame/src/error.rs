/// Errors that can occur during frame encoding/decoding.
///
/// These are structural failures. Integrity mismatches (bad CRC, unexpected
/// channel label) are reported on [`DecodedFrame`](crate::DecodedFrame) instead.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The frame header contains an invalid magic number.
    #[error("invalid frame magic {found:02X?} (expected \"MRP1\")")]
    InvalidMagic { found: [u8; 4] },

    /// Fewer bytes remain than the fixed header needs.
    #[error("truncated frame header ({available} bytes, need {needed})")]
    TruncatedHeader { needed: usize, available: usize },

    /// The CRC flag is set but the CRC field is cut off.
    #[error("truncated frame CRC ({available} bytes, need 4)")]
    TruncatedCrc { available: usize },

    /// The declared payload length runs past the end of the data.
    #[error("truncated frame payload (declared {declared} bytes, {available} remain)")]
    TruncatedPayload { declared: usize, available: usize },

    /// The channel identifier is not a single ASCII character.
    #[error("invalid channel identifier {0:?} (expected one ASCII character)")]
    InvalidChannel(String),

    /// The payload exceeds the configured maximum size.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// Non-zero bytes follow a frame where only padding is allowed.
    #[error("unexpected non-zero data after frame at offset {offset}")]
    TrailingData { offset: usize },

    /// An I/O error occurred while writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FrameError>;
