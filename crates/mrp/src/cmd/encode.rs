use mrp_codec::{encode_with_options, EncodeOptions, EncodeSummary, PayloadLengths};
use mrp_ecc::EccScheme;
use serde::Serialize;

use crate::cmd::{metadata_arg, text_arg, EncodeArgs};
use crate::exit::{codec_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_json, print_raw, print_table, OutputFormat, ENCODE_SCHEMA_ID};

#[derive(Serialize)]
struct EncodeOutput<'a> {
    schema_id: &'static str,
    cover: String,
    stego: String,
    ecc: EccScheme,
    payload_lengths: &'a PayloadLengths,
    bits_used: usize,
    capacity_bits: usize,
}

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let message = text_arg(args.message, args.message_file.as_deref(), "message")?
        .ok_or_else(|| CliError::new(USAGE, "one of --message or --message-file is required"))?;
    let metadata = metadata_arg(text_arg(
        args.metadata,
        args.metadata_file.as_deref(),
        "metadata",
    )?)?;

    let mut options = EncodeOptions::with_ecc(args.ecc);
    options.sidecar.include_parity_block = !args.no_parity_block;

    let summary = encode_with_options(&args.cover, &args.output, &message, &metadata, &options)
        .map_err(|err| codec_error("encode failed", err))?;

    print_summary(&summary, format);
    Ok(SUCCESS)
}

fn print_summary(summary: &EncodeSummary, format: OutputFormat) {
    let out = EncodeOutput {
        schema_id: ENCODE_SCHEMA_ID,
        cover: summary.cover.display().to_string(),
        stego: summary.stego.display().to_string(),
        ecc: summary.ecc,
        payload_lengths: &summary.payload_lengths,
        bits_used: summary.bits_used,
        capacity_bits: summary.capacity_bits,
    };

    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table => print_table(
            ["FIELD", "VALUE"],
            vec![
                ("cover".into(), out.cover.clone()),
                ("stego".into(), out.stego.clone()),
                ("ecc".into(), out.ecc.to_string()),
                ("R bytes".into(), out.payload_lengths.r.to_string()),
                ("G bytes".into(), out.payload_lengths.g.to_string()),
                ("B bytes".into(), out.payload_lengths.b.to_string()),
                (
                    "bits used".into(),
                    format!("{} / {}", out.bits_used, out.capacity_bits),
                ),
            ],
        ),
        OutputFormat::Pretty => println!(
            "encoded {} -> {} ecc={} r={} g={} b={} bits={}/{}",
            out.cover,
            out.stego,
            out.ecc,
            out.payload_lengths.r,
            out.payload_lengths.g,
            out.payload_lengths.b,
            out.bits_used,
            out.capacity_bits
        ),
        OutputFormat::Raw => print_raw(format!("{}\n", out.stego).as_bytes()),
    }
}
