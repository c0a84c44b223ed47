use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use mrp_carrier::{extract_bytes, Raster};
use mrp_ecc::{EccCodec, EccScheme};
use mrp_frame::{checksum, crc_hex, Channel, DecodedFrame, FrameReader};
use mrp_sidecar::{bookkeeping_issues, validate, verify_message, Sidecar};
use serde_json::Value;

use crate::config::DecodeOptions;
use crate::error::CodecError;
use crate::repair::repair_single_channel;
use crate::report::{ChannelReport, DecodeFailure, DecodeReport, DecodeStatus, Decoded};

type Outcome = std::result::Result<Decoded, DecodeFailure>;

/// Decode a stego image with default options.
pub fn decode(path: impl AsRef<Path>) -> Outcome {
    decode_with_options(path, &DecodeOptions::default())
}

/// Decode a stego image with explicit options.
pub fn decode_with_options(path: impl AsRef<Path>, options: &DecodeOptions) -> Outcome {
    let path = path.as_ref();
    let raster = Raster::open(path).map_err(CodecError::from)?;
    let outcome = decode_raster(&raster, options);
    match &outcome {
        Ok(decoded) => tracing::info!(
            path = %path.display(),
            status = %decoded.report.status,
            "decoded carrier"
        ),
        Err(failure) => tracing::warn!(
            path = %path.display(),
            status = %failure.status,
            reason = %failure.reason,
            "decode failed"
        ),
    }
    outcome
}

/// Decode the frames embedded in `raster`.
///
/// Integrity outcomes are returned as data: `Ok` carries `ok`, `recovered`
/// or `degraded` results, `Err` carries `failed` or `integrity_failed`.
pub fn decode_raster(raster: &Raster, options: &DecodeOptions) -> Outcome {
    let stream = extract_bytes(raster.pixels(), 0, raster.capacity_bits() / 8)
        .map_err(CodecError::from)?;
    let mut reader = FrameReader::with_config(stream, options.frame.clone());
    let frame_r = read_channel(&mut reader, Channel::R)?;
    let frame_g = read_channel(&mut reader, Channel::G)?;
    let frame_b = read_channel(&mut reader, Channel::B)?;

    let sidecar = Sidecar::from_json(frame_b.frame.payload(), &options.sidecar)
        .map_err(|err| DecodeFailure::fatal(err.to_string()))?;
    let scheme = sidecar
        .scheme()
        .map_err(|err| DecodeFailure::fatal(err.to_string()))?;
    if let Some(expected) = options.expected_scheme {
        if expected != scheme {
            return Err(DecodeFailure::fatal(format!(
                "sidecar declares ecc scheme {scheme}, expected {expected}"
            )));
        }
    }

    let mut warnings = Vec::new();
    let mislabeled: Vec<char> = [&frame_r, &frame_g, &frame_b]
        .iter()
        .filter(|decoded| !decoded.channel_valid)
        .map(|decoded| decoded.frame.channel() as char)
        .collect();
    if !mislabeled.is_empty() {
        if !scheme.allows_parity_repair() {
            return Err(DecodeFailure::fatal("Channel header mismatch detected"));
        }
        tracing::warn!(?mislabeled, %scheme, "tolerating channel header mismatch");
        warnings.push(format!(
            "channel header mismatch tolerated (found {mislabeled:?})"
        ));
    }

    let codec = scheme.codec();
    let mut session = Session {
        scheme,
        r: ChannelState::decode(Channel::R, &frame_r, &sidecar.crc_r, sidecar.len_r, &*codec),
        g: ChannelState::decode(Channel::G, &frame_g, &sidecar.crc_g, sidecar.len_g, &*codec),
        crc_r: sidecar.crc_r.clone(),
        crc_g: sidecar.crc_g.clone(),
        sidecar_crc_ok: frame_b.crc_ok,
        sha_ok: false,
        repaired: None,
        warnings,
    };

    if let Some(reason) = session.r.failure.clone().or_else(|| session.g.failure.clone()) {
        return Err(session.fail(DecodeStatus::Failed, reason));
    }

    let validation = validate(&sidecar, session.r.crc, session.g.crc);
    session.r.report.crc_ok = validation.crc_r_ok;
    session.g.report.crc_ok = validation.crc_g_ok;

    if !validation.all_ok() && scheme.allows_parity_repair() {
        match repair_single_channel(&sidecar, &*codec, &mut session.r, &mut session.g) {
            Ok(repaired) => session.repaired = repaired,
            Err(reason) => {
                tracing::warn!(%scheme, %reason, "parity repair refused");
                return Err(session.fail(DecodeStatus::Failed, reason));
            }
        }
    }

    let message = decode_message(&session.r.decoded);
    if let Ok(text) = &message {
        session.sha_ok = verify_message(&sidecar, text.as_bytes(), &session.r.decoded);
        if !session.sha_ok {
            return Err(session.fail(
                DecodeStatus::IntegrityFailed,
                "SHA-256 mismatch: message does not match sidecar digest",
            ));
        }
    }

    let failing = session.failing_channels();
    if !failing.is_empty() {
        let reason = format!("CRC mismatch on channel {}", join_channels(&failing));
        return Err(session.fail(DecodeStatus::Failed, reason));
    }

    let message = message.map_err(|reason| session.fail(DecodeStatus::Failed, reason))?;
    let metadata = decode_metadata(&session.g.decoded)
        .map_err(|reason| session.fail(DecodeStatus::Failed, reason))?;

    let issues = bookkeeping_issues(
        &sidecar,
        &codec.encode(&session.r.decoded),
        &codec.encode(&session.g.decoded),
    );
    let degraded = !issues.is_empty() || !session.sidecar_crc_ok;
    session.warnings.extend(issues);
    if !session.sidecar_crc_ok {
        session
            .warnings
            .push("sidecar frame CRC does not match its payload".to_string());
    }

    let status = if session.repaired.is_some() {
        DecodeStatus::Recovered
    } else if degraded {
        DecodeStatus::Degraded
    } else {
        DecodeStatus::Ok
    };
    if status != DecodeStatus::Ok {
        tracing::warn!(%status, warnings = ?session.warnings, "decode completed with findings");
    }

    Ok(Decoded {
        message,
        metadata,
        report: session.report(status),
    })
}

fn read_channel(
    reader: &mut FrameReader,
    channel: Channel,
) -> std::result::Result<DecodedFrame, DecodeFailure> {
    let offset = reader.position();
    let decoded = reader.read_frame(Some(channel.as_byte())).map_err(|err| {
        DecodeFailure::fatal(format!("{channel} frame at byte {offset}: {err}"))
    })?;
    tracing::debug!(
        %channel,
        offset,
        length = decoded.frame.payload().len(),
        crc_ok = decoded.crc_ok,
        channel_valid = decoded.channel_valid,
        "read frame"
    );
    Ok(decoded)
}

fn decode_message(payload: &[u8]) -> std::result::Result<String, String> {
    let bytes = BASE64_STANDARD
        .decode(payload)
        .map_err(|err| format!("message payload is not valid base64: {err}"))?;
    String::from_utf8(bytes).map_err(|err| format!("message is not valid UTF-8: {err}"))
}

fn decode_metadata(payload: &[u8]) -> std::result::Result<Value, String> {
    let bytes = BASE64_STANDARD
        .decode(payload)
        .map_err(|err| format!("metadata payload is not valid base64: {err}"))?;
    serde_json::from_slice(&bytes).map_err(|err| format!("metadata is not valid JSON: {err}"))
}

fn join_channels(channels: &[Channel]) -> String {
    channels
        .iter()
        .map(|channel| channel.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// One ECC-decoded payload and its running report.
pub(crate) struct ChannelState {
    pub(crate) channel: Channel,
    pub(crate) expected_len: usize,
    /// Decoded (pre-ECC) payload. Empty when ECC decoding failed.
    pub(crate) decoded: Vec<u8>,
    /// CRC32 of the re-encoded decoded payload.
    pub(crate) crc: u32,
    pub(crate) failure: Option<String>,
    pub(crate) report: ChannelReport,
}

impl ChannelState {
    fn decode(
        channel: Channel,
        frame: &DecodedFrame,
        expected_crc: &str,
        expected_len: usize,
        codec: &dyn EccCodec,
    ) -> Self {
        let mut report = ChannelReport {
            channel: channel.as_char(),
            expected_crc: expected_crc.to_string(),
            actual_crc: String::new(),
            crc_ok: false,
            channel_valid: frame.channel_valid,
            frame_crc_ok: frame.crc_ok,
            hamming_corrected: false,
            rs_error: None,
            rs_corrected: 0,
            repaired: false,
        };

        match codec.decode(frame.frame.payload(), expected_len) {
            Ok(decoded) => {
                report.hamming_corrected = decoded.report.hamming_corrected;
                report.rs_corrected = decoded.report.rs_corrected;
                if decoded.report.hamming_corrected || decoded.report.rs_corrected > 0 {
                    tracing::debug!(
                        %channel,
                        bits = decoded.report.corrected_bits,
                        bytes = decoded.report.rs_corrected,
                        "ecc corrected payload"
                    );
                }
                let crc = checksum(&codec.encode(&decoded.data));
                report.actual_crc = crc_hex(crc);
                Self {
                    channel,
                    expected_len,
                    decoded: decoded.data,
                    crc,
                    failure: None,
                    report,
                }
            }
            Err(err) => {
                tracing::warn!(%channel, error = %err, "ecc decode failed");
                if codec.scheme() == EccScheme::Rs {
                    report.rs_error = Some(err.to_string());
                }
                Self {
                    channel,
                    expected_len,
                    decoded: Vec::new(),
                    crc: 0,
                    failure: Some(format!("{channel} payload ECC decode failed: {err}")),
                    report,
                }
            }
        }
    }

    /// Replace the payload with a verified reconstruction.
    pub(crate) fn accept_repair(&mut self, payload: Vec<u8>, crc: u32) {
        self.decoded = payload;
        self.crc = crc;
        self.report.actual_crc = crc_hex(crc);
        self.report.crc_ok = true;
        self.report.repaired = true;
    }
}

struct Session {
    scheme: EccScheme,
    r: ChannelState,
    g: ChannelState,
    crc_r: String,
    crc_g: String,
    sidecar_crc_ok: bool,
    sha_ok: bool,
    repaired: Option<Channel>,
    warnings: Vec<String>,
}

impl Session {
    fn failing_channels(&self) -> Vec<Channel> {
        [&self.r, &self.g]
            .iter()
            .filter(|state| !state.report.crc_ok)
            .map(|state| state.channel)
            .collect()
    }

    fn report(&self, status: DecodeStatus) -> DecodeReport {
        DecodeReport {
            status,
            ecc_scheme: self.scheme,
            crc_r: self.crc_r.clone(),
            crc_g: self.crc_g.clone(),
            sha_ok: self.sha_ok,
            r: self.r.report.clone(),
            g: self.g.report.clone(),
            sidecar_crc_ok: self.sidecar_crc_ok,
            repaired_channel: self.repaired.map(Channel::as_char),
            warnings: self.warnings.clone(),
        }
    }

    fn fail(&self, status: DecodeStatus, reason: impl Into<String>) -> DecodeFailure {
        DecodeFailure::with_report(reason, self.report(status))
    }
}
