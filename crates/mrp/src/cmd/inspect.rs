use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use mrp_carrier::Raster;
use mrp_codec::{inspect_raster, Inspection};
use mrp_frame::FrameConfig;
use serde::Serialize;

use crate::cmd::InspectArgs;
use crate::exit::{carrier_error, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_json, OutputFormat, INSPECT_SCHEMA_ID};

#[derive(Serialize)]
struct InspectOutput<'a> {
    schema_id: &'static str,
    width: u32,
    height: u32,
    #[serde(flatten)]
    inspection: &'a Inspection,
}

pub fn run(args: InspectArgs, format: OutputFormat) -> CliResult<i32> {
    let raster = Raster::open(&args.path).map_err(|err| carrier_error("inspect failed", err))?;
    let inspection = inspect_raster(&raster, &FrameConfig::default());

    let out = InspectOutput {
        schema_id: INSPECT_SCHEMA_ID,
        width: raster.width(),
        height: raster.height(),
        inspection: &inspection,
    };
    print_inspection(&out, format);

    Ok(if inspection.error.is_some() {
        DATA_INVALID
    } else {
        SUCCESS
    })
}

fn print_inspection(out: &InspectOutput<'_>, format: OutputFormat) {
    let inspection = out.inspection;
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["CHANNEL", "NAME", "FLAGS", "LENGTH", "CRC", "BIT OFFSET"]);
            for frame in &inspection.frames {
                table.add_row(vec![
                    frame.channel.to_string(),
                    frame.name.to_string(),
                    format!("{:#04x}", frame.flags),
                    frame.length.to_string(),
                    match &frame.stored_crc {
                        Some(crc) if frame.crc_ok => format!("{crc} ok"),
                        Some(crc) => format!("{crc} mismatch"),
                        None => "-".to_string(),
                    },
                    frame.bit_offset.to_string(),
                ]);
            }
            println!("{table}");
            println!(
                "{}x{} image, {} of {} bits framed",
                out.width, out.height, inspection.bits_used, inspection.capacity_bits
            );
            if let Some(err) = &inspection.error {
                println!("stopped: {err}");
            }
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            for frame in &inspection.frames {
                println!(
                    "channel={} ({}) length={} crc_ok={} bit_offset={}",
                    frame.channel, frame.name, frame.length, frame.crc_ok, frame.bit_offset
                );
            }
            if let Some(err) = &inspection.error {
                println!("stopped: {err}");
            }
        }
    }
}
