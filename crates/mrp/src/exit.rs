use std::fmt;
use std::io;

use mrp_carrier::CarrierError;
use mrp_codec::{CodecError, DecodeStatus};
use mrp_frame::FrameError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
/// Decoded data is intact but the sidecar did not fully check out.
pub const DEGRADED: i32 = 2;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => USAGE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn carrier_error(context: &str, err: CarrierError) -> CliError {
    match err {
        CarrierError::CapacityExceeded { .. } | CarrierError::DimensionMismatch { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        CarrierError::Open { .. } | CarrierError::Save { .. } => {
            CliError::new(FAILURE, format!("{context}: {err}"))
        }
    }
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        FrameError::Io(source) => io_error(context, source),
        FrameError::PayloadTooLarge { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        other => CliError::new(INTERNAL, format!("{context}: {other}")),
    }
}

pub fn codec_error(context: &str, err: CodecError) -> CliError {
    match err {
        CodecError::Carrier(err) => carrier_error(context, err),
        CodecError::Frame(err) => frame_error(context, err),
        CodecError::CapacityExceeded { .. } | CodecError::Json(_) => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        other => CliError::new(INTERNAL, format!("{context}: {other}")),
    }
}

/// Exit code for a decode outcome.
pub fn decode_status_code(status: DecodeStatus) -> i32 {
    match status {
        DecodeStatus::Ok | DecodeStatus::Recovered => SUCCESS,
        DecodeStatus::Degraded => DEGRADED,
        DecodeStatus::Failed => FAILURE,
        DecodeStatus::IntegrityFailed => DATA_INVALID,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_is_data_invalid() {
        let err = codec_error(
            "encode failed",
            CodecError::CapacityExceeded {
                needed: 900,
                available: 48,
            },
        );
        assert_eq!(err.code, DATA_INVALID);
        assert!(err.message.starts_with("encode failed: "));
    }

    #[test]
    fn missing_input_is_usage() {
        let err = io_error("read message", io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(err.code, USAGE);
    }

    #[test]
    fn statuses_map_to_distinct_codes() {
        assert_eq!(decode_status_code(DecodeStatus::Recovered), SUCCESS);
        assert_eq!(decode_status_code(DecodeStatus::Degraded), DEGRADED);
        assert_eq!(decode_status_code(DecodeStatus::Failed), FAILURE);
        assert_eq!(decode_status_code(DecodeStatus::IntegrityFailed), DATA_INVALID);
    }
}
