use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use mrp_carrier::{embed_bytes, Raster};
use mrp_ecc::EccScheme;
use mrp_frame::{Channel, Frame, FrameWriter};
use mrp_sidecar::Sidecar;
use serde_json::Value;

use crate::config::EncodeOptions;
use crate::error::{CodecError, Result};
use crate::report::{EncodeSummary, PayloadLengths};

/// A stego raster plus what went into it.
#[derive(Debug, Clone)]
pub struct Embedded {
    pub stego: Raster,
    pub ecc: EccScheme,
    pub payload_lengths: PayloadLengths,
    pub bits_used: usize,
    pub capacity_bits: usize,
}

/// Embed `message` and `metadata` into a copy of `cover`.
///
/// The cover is never touched. The copy is only produced once every frame
/// has been built and the stream is known to fit.
pub fn encode_raster(
    cover: &Raster,
    message: &str,
    metadata: &Value,
    options: &EncodeOptions,
) -> Result<Embedded> {
    let codec = options.ecc.codec();

    let payload_r = BASE64_STANDARD.encode(message.as_bytes()).into_bytes();
    let payload_g = BASE64_STANDARD
        .encode(serde_json::to_vec(metadata)?)
        .into_bytes();

    let encoded_r = codec.encode(&payload_r);
    let encoded_g = codec.encode(&payload_g);

    let sidecar = Sidecar::build(
        options.ecc,
        message.as_bytes(),
        &encoded_r,
        &encoded_g,
        payload_r.len(),
        payload_g.len(),
        &options.sidecar,
    );
    let sidecar_json = sidecar.to_json()?;

    let payload_lengths = PayloadLengths {
        r: encoded_r.len(),
        g: encoded_g.len(),
        b: sidecar_json.len(),
    };

    let mut writer = FrameWriter::with_config(Vec::new(), options.frame.clone());
    writer.write_frame(&Frame::new(Channel::R, encoded_r))?;
    writer.write_frame(&Frame::new(Channel::G, encoded_g))?;
    writer.write_frame(&Frame::new(Channel::B, sidecar_json))?;
    let stream = writer.into_inner();

    let bits_used = stream.len() * 8;
    let capacity_bits = cover.capacity_bits();
    if bits_used > capacity_bits {
        tracing::warn!(
            needed = bits_used,
            available = capacity_bits,
            "framed payload exceeds cover capacity"
        );
        return Err(CodecError::CapacityExceeded {
            needed: bits_used,
            available: capacity_bits,
        });
    }

    let mut stego = cover.clone();
    embed_bytes(stego.pixels_mut(), 0, &stream)?;

    tracing::debug!(
        ecc = %options.ecc,
        r = payload_lengths.r,
        g = payload_lengths.g,
        b = payload_lengths.b,
        bits_used,
        capacity_bits,
        "embedded frames"
    );

    Ok(Embedded {
        stego,
        ecc: options.ecc,
        payload_lengths,
        bits_used,
        capacity_bits,
    })
}

/// Encode into `out` using the given ECC scheme and default options.
pub fn encode(
    cover: impl AsRef<Path>,
    out: impl AsRef<Path>,
    message: &str,
    metadata: &Value,
    ecc: EccScheme,
) -> Result<EncodeSummary> {
    encode_with_options(cover, out, message, metadata, &EncodeOptions::with_ecc(ecc))
}

/// Encode into `out` with explicit options.
///
/// `out` is written only after the whole stream has been embedded.
pub fn encode_with_options(
    cover: impl AsRef<Path>,
    out: impl AsRef<Path>,
    message: &str,
    metadata: &Value,
    options: &EncodeOptions,
) -> Result<EncodeSummary> {
    let cover = cover.as_ref();
    let out = out.as_ref();

    let raster = Raster::open(cover)?;
    let embedded = encode_raster(&raster, message, metadata, options)?;
    embedded.stego.save(out)?;

    tracing::info!(
        cover = %cover.display(),
        stego = %out.display(),
        ecc = %embedded.ecc,
        bits_used = embedded.bits_used,
        "encoded carrier"
    );

    Ok(EncodeSummary {
        cover: cover.to_path_buf(),
        stego: out.to_path_buf(),
        ecc: embedded.ecc,
        payload_lengths: embedded.payload_lengths,
        bits_used: embedded.bits_used,
        capacity_bits: embedded.capacity_bits,
    })
}
