use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use mrp_ecc::EccScheme;
use serde_json::Value;

use crate::exit::{io_error, CliError, CliResult, DATA_INVALID};
use crate::output::OutputFormat;

pub mod capacity;
pub mod decode;
pub mod encode;
pub mod inspect;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Embed a message and metadata into a cover image.
    Encode(EncodeArgs),
    /// Recover and verify the payload of a stego image.
    Decode(DecodeArgs),
    /// List the frames embedded in an image without verifying them.
    Inspect(InspectArgs),
    /// Report how many bits an image can carry.
    Capacity(CapacityArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args, format),
        Command::Decode(args) => decode::run(args, format),
        Command::Inspect(args) => inspect::run(args, format),
        Command::Capacity(args) => capacity::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Cover image (any format the decoder understands).
    pub cover: PathBuf,
    /// Output PNG path.
    pub output: PathBuf,
    /// Message text.
    #[arg(long, required_unless_present = "message_file", conflicts_with = "message_file")]
    pub message: Option<String>,
    /// Read the message from a UTF-8 file.
    #[arg(long, value_name = "PATH")]
    pub message_file: Option<PathBuf>,
    /// Metadata as a JSON document. Default: {}.
    #[arg(long, conflicts_with = "metadata_file")]
    pub metadata: Option<String>,
    /// Read metadata JSON from a file.
    #[arg(long, value_name = "PATH")]
    pub metadata_file: Option<PathBuf>,
    /// ECC scheme: parity, hamming or rs.
    #[arg(long, default_value = "parity")]
    pub ecc: EccScheme,
    /// Omit the cross-channel parity block from the sidecar.
    #[arg(long)]
    pub no_parity_block: bool,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Stego image to decode.
    pub path: PathBuf,
    /// Reject images whose sidecar declares another ECC scheme.
    #[arg(long, value_name = "SCHEME")]
    pub expect_ecc: Option<EccScheme>,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Image to inspect.
    pub path: PathBuf,
}

#[derive(Args, Debug)]
pub struct CapacityArgs {
    /// Cover image.
    pub path: PathBuf,
    /// Check whether this message fits.
    #[arg(long)]
    pub message: Option<String>,
    /// Metadata JSON used for the fit check. Default: {}.
    #[arg(long, requires = "message")]
    pub metadata: Option<String>,
    /// Only check this scheme. Default: all schemes.
    #[arg(long)]
    pub ecc: Option<EccScheme>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Read a text argument given inline or as a file.
pub(crate) fn text_arg(inline: Option<String>, file: Option<&Path>, what: &str) -> CliResult<Option<String>> {
    match (inline, file) {
        (Some(text), _) => Ok(Some(text)),
        (None, Some(path)) => std::fs::read_to_string(path)
            .map(Some)
            .map_err(|err| io_error(&format!("failed to read {what} {}", path.display()), err)),
        (None, None) => Ok(None),
    }
}

/// Parse metadata JSON, defaulting to an empty object.
pub(crate) fn metadata_arg(text: Option<String>) -> CliResult<Value> {
    match text {
        Some(text) => serde_json::from_str(&text)
            .map_err(|err| CliError::new(DATA_INVALID, format!("invalid metadata JSON: {err}"))),
        None => Ok(Value::Object(Default::default())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_defaults_to_empty_object() {
        assert_eq!(metadata_arg(None).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn invalid_metadata_is_data_invalid() {
        let err = metadata_arg(Some("{oops".into())).unwrap_err();
        assert_eq!(err.code, DATA_INVALID);
    }

    #[test]
    fn inline_text_wins_over_file() {
        let text = text_arg(Some("inline".into()), Some(Path::new("/nonexistent")), "message")
            .unwrap();
        assert_eq!(text.as_deref(), Some("inline"));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = text_arg(None, Some(Path::new("/nonexistent/mrp-msg.txt")), "message")
            .unwrap_err();
        assert!(err.message.contains("failed to read message"));
    }
}
