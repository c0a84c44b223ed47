mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

/// Hide and recover text in the colour LSBs of an RGB image.
#[derive(Parser, Debug)]
#[command(name = "mrp", version, about = "Multi-Channel Resonance Protocol CLI")]
struct Cli {
    /// Output format. Defaults to a table on a terminal and JSON otherwise.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Diagnostic format on stderr.
    #[arg(
        long,
        value_name = "FORMAT",
        env = "MRP_LOG_FORMAT",
        default_value = "text",
        global = true
    )]
    log_format: LogFormat,

    /// Minimum diagnostic level on stderr.
    #[arg(
        long,
        value_name = "LEVEL",
        env = "MRP_LOG_LEVEL",
        default_value = "info",
        global = true
    )]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn execute(self) -> i32 {
        init_logging(self.log_format, self.log_level);
        let format = self.format.unwrap_or_else(OutputFormat::default_for_stdout);

        cmd::run(self.command, format).unwrap_or_else(|err| {
            eprintln!("error: {err}");
            err.code
        })
    }
}

fn main() {
    std::process::exit(Cli::parse().execute());
}

#[cfg(test)]
mod tests {
    use mrp_ecc::EccScheme;

    use super::*;

    #[test]
    fn parses_encode_subcommand() {
        let cli = Cli::try_parse_from([
            "mrp",
            "encode",
            "cover.png",
            "stego.png",
            "--message",
            "hello world",
            "--metadata",
            "{\"sequence\":1}",
            "--ecc",
            "rs",
        ])
        .expect("encode args should parse");

        match cli.command {
            Command::Encode(args) => {
                assert_eq!(args.ecc, EccScheme::Rs);
                assert_eq!(args.message.as_deref(), Some("hello world"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_conflicting_message_args() {
        let err = Cli::try_parse_from([
            "mrp",
            "encode",
            "cover.png",
            "stego.png",
            "--message",
            "hi",
            "--message-file",
            "msg.txt",
        ])
        .expect_err("conflicting args should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn rejects_unknown_ecc_scheme() {
        let err = Cli::try_parse_from([
            "mrp",
            "encode",
            "cover.png",
            "stego.png",
            "--message",
            "hi",
            "--ecc",
            "golay",
        ])
        .expect_err("unknown scheme should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn parses_decode_with_global_format() {
        let cli = Cli::try_parse_from(["mrp", "decode", "stego.png", "--format", "json"])
            .expect("decode args should parse");
        assert!(matches!(cli.command, Command::Decode(_)));
        assert!(matches!(cli.format, Some(OutputFormat::Json)));
        assert_eq!(cli.log_level, LogLevel::Info);
    }

    #[test]
    fn log_options_are_global() {
        let cli = Cli::try_parse_from([
            "mrp",
            "inspect",
            "stego.png",
            "--log-format",
            "json",
            "--log-level",
            "debug",
        ])
        .expect("trailing global flags should parse");
        assert_eq!(cli.log_format, LogFormat::Json);
        assert_eq!(cli.log_level, LogLevel::Debug);
    }
}
