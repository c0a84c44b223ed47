use mrp_carrier::Raster;
use mrp_codec::{encode_raster, CodecError, EncodeOptions};
use mrp_ecc::EccScheme;
use serde::Serialize;

use crate::cmd::{metadata_arg, CapacityArgs};
use crate::exit::{carrier_error, codec_error, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_json, print_table, OutputFormat, CAPACITY_SCHEMA_ID};

#[derive(Serialize)]
struct SchemeFit {
    ecc: EccScheme,
    bits_needed: usize,
    fits: bool,
}

#[derive(Serialize)]
struct CapacityOutput {
    schema_id: &'static str,
    width: u32,
    height: u32,
    capacity_bits: usize,
    capacity_bytes: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fit: Vec<SchemeFit>,
}

pub fn run(args: CapacityArgs, format: OutputFormat) -> CliResult<i32> {
    let raster = Raster::open(&args.path).map_err(|err| carrier_error("capacity failed", err))?;
    let capacity_bits = raster.capacity_bits();

    let mut fit = Vec::new();
    if let Some(message) = &args.message {
        let metadata = metadata_arg(args.metadata)?;
        let schemes = match args.ecc {
            Some(ecc) => vec![ecc],
            None => EccScheme::ALL.to_vec(),
        };
        for ecc in schemes {
            let bits_needed =
                match encode_raster(&raster, message, &metadata, &EncodeOptions::with_ecc(ecc)) {
                    Ok(embedded) => embedded.bits_used,
                    Err(CodecError::CapacityExceeded { needed, .. }) => needed,
                    Err(err) => return Err(codec_error("capacity failed", err)),
                };
            fit.push(SchemeFit {
                ecc,
                bits_needed,
                fits: bits_needed <= capacity_bits,
            });
        }
    }

    let out = CapacityOutput {
        schema_id: CAPACITY_SCHEMA_ID,
        width: raster.width(),
        height: raster.height(),
        capacity_bits,
        capacity_bytes: capacity_bits / 8,
        fit,
    };
    print_capacity(&out, format);

    Ok(if out.fit.iter().any(|f| !f.fits) {
        DATA_INVALID
    } else {
        SUCCESS
    })
}

fn print_capacity(out: &CapacityOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table => {
            let mut rows = vec![
                ("size".to_string(), format!("{}x{}", out.width, out.height)),
                ("capacity bits".to_string(), out.capacity_bits.to_string()),
                ("capacity bytes".to_string(), out.capacity_bytes.to_string()),
            ];
            for fit in &out.fit {
                rows.push((
                    format!("{} needs", fit.ecc),
                    format!(
                        "{} bits ({})",
                        fit.bits_needed,
                        if fit.fits { "fits" } else { "too large" }
                    ),
                ));
            }
            print_table(["FIELD", "VALUE"], rows);
        }
        OutputFormat::Pretty => {
            println!(
                "{}x{} capacity={} bits ({} bytes)",
                out.width, out.height, out.capacity_bits, out.capacity_bytes
            );
            for fit in &out.fit {
                println!(
                    "  {}: {} bits, fits={}",
                    fit.ecc, fit.bits_needed, fit.fits
                );
            }
        }
        OutputFormat::Raw => println!("{}", out.capacity_bits),
    }
}
