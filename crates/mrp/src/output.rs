use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

pub const ENCODE_SCHEMA_ID: &str = "https://schemas.3leaps.dev/mrp/cli/v1/encode-result.schema.json";
pub const DECODE_SCHEMA_ID: &str = "https://schemas.3leaps.dev/mrp/cli/v1/decode-result.schema.json";
pub const INSPECT_SCHEMA_ID: &str = "https://schemas.3leaps.dev/mrp/cli/v1/inspect-result.schema.json";
pub const CAPACITY_SCHEMA_ID: &str =
    "https://schemas.3leaps.dev/mrp/cli/v1/capacity-result.schema.json";

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

pub fn print_json<T: Serialize>(out: &T) {
    println!(
        "{}",
        serde_json::to_string(out).unwrap_or_else(|_| "{}".to_string())
    );
}

/// Two-column key/value table.
pub fn print_table(header: [&str; 2], rows: Vec<(String, String)>) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    for (key, value) in rows {
        table.add_row(vec![key, value]);
    }
    println!("{table}");
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}
