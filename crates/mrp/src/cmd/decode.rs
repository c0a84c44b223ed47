use mrp_codec::{decode_with_options, DecodeFailure, DecodeOptions, DecodeReport, Decoded};
use serde::Serialize;
use serde_json::Value;

use crate::cmd::DecodeArgs;
use crate::exit::{decode_status_code, CliError, CliResult};
use crate::output::{print_json, print_raw, print_table, OutputFormat, DECODE_SCHEMA_ID};

#[derive(Serialize)]
struct DecodeOutput<'a> {
    schema_id: &'static str,
    status: &'static str,
    message: Option<&'a str>,
    metadata: Option<&'a Value>,
    error: Option<&'a str>,
    report: Option<&'a DecodeReport>,
}

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let options = DecodeOptions {
        expected_scheme: args.expect_ecc,
        ..DecodeOptions::default()
    };

    match decode_with_options(&args.path, &options) {
        Ok(decoded) => {
            print_decoded(&decoded, format);
            Ok(decode_status_code(decoded.report.status))
        }
        Err(failure) => {
            print_failure(&failure, format);
            Err(CliError::new(
                decode_status_code(failure.status),
                format!("decode {}: {}", failure.status, failure.reason),
            ))
        }
    }
}

fn print_decoded(decoded: &Decoded, format: OutputFormat) {
    let report = &decoded.report;
    match format {
        OutputFormat::Json => print_json(&DecodeOutput {
            schema_id: DECODE_SCHEMA_ID,
            status: report.status.as_str(),
            message: Some(&decoded.message),
            metadata: Some(&decoded.metadata),
            error: None,
            report: Some(report),
        }),
        OutputFormat::Table => {
            let mut rows = vec![
                ("status".to_string(), report.status.to_string()),
                ("message".to_string(), decoded.message.clone()),
                ("metadata".to_string(), decoded.metadata.to_string()),
            ];
            rows.extend(report_rows(report));
            print_table(["FIELD", "VALUE"], rows);
        }
        OutputFormat::Pretty => {
            println!(
                "status={} ecc={} crc_r={} crc_g={} sha_ok={} message={:?}",
                report.status,
                report.ecc_scheme,
                report.crc_r,
                report.crc_g,
                report.sha_ok,
                decoded.message
            );
            for warning in &report.warnings {
                println!("warning: {warning}");
            }
        }
        OutputFormat::Raw => print_raw(decoded.message.as_bytes()),
    }
}

fn print_failure(failure: &DecodeFailure, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&DecodeOutput {
            schema_id: DECODE_SCHEMA_ID,
            status: failure.status.as_str(),
            message: None,
            metadata: None,
            error: Some(&failure.reason),
            report: failure.report.as_ref(),
        }),
        OutputFormat::Table => {
            let mut rows = vec![
                ("status".to_string(), failure.status.to_string()),
                ("error".to_string(), failure.reason.clone()),
            ];
            if let Some(report) = &failure.report {
                rows.extend(report_rows(report));
            }
            print_table(["FIELD", "VALUE"], rows);
        }
        // The error line on stderr carries everything.
        OutputFormat::Pretty | OutputFormat::Raw => {}
    }
}

fn report_rows(report: &DecodeReport) -> Vec<(String, String)> {
    let mut rows = vec![
        ("ecc".to_string(), report.ecc_scheme.to_string()),
        ("sha ok".to_string(), report.sha_ok.to_string()),
        ("sidecar crc ok".to_string(), report.sidecar_crc_ok.to_string()),
    ];
    for channel in [&report.r, &report.g] {
        let mut notes = Vec::new();
        if channel.hamming_corrected {
            notes.push("hamming corrected".to_string());
        }
        if channel.rs_corrected > 0 {
            notes.push(format!("rs corrected {} bytes", channel.rs_corrected));
        }
        if let Some(err) = &channel.rs_error {
            notes.push(format!("rs error: {err}"));
        }
        if channel.repaired {
            notes.push("repaired from parity".to_string());
        }
        if !channel.channel_valid {
            notes.push("header mismatch".to_string());
        }
        rows.push((
            format!("{} crc", channel.channel),
            format!(
                "{} (expected {}, {}){}",
                channel.actual_crc,
                channel.expected_crc,
                if channel.crc_ok { "ok" } else { "mismatch" },
                if notes.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", notes.join(", "))
                }
            ),
        ));
    }
    for warning in &report.warnings {
        rows.push(("warning".to_string(), warning.clone()));
    }
    rows
}
