//! Cross-channel repair from the sidecar's XOR parity block.
//!
//! One XOR block is one linear equation, so at most one of `R`/`G` can be
//! rebuilt. A reconstruction is only accepted when it reproduces the CRC the
//! sidecar recorded (and, for `R`, the digest of the base64 message).

use mrp_ecc::EccCodec;
use mrp_frame::{checksum, crc_hex, Channel};
use mrp_sidecar::{parity_block, sha256_hex, Sidecar};

use crate::decoder::ChannelState;

/// Rebuild the single channel whose CRC failed.
///
/// Returns `Ok(None)` when nothing needs repair or the sidecar carries no
/// parity block, and `Err(reason)` when repair was refused or did not verify.
pub(crate) fn repair_single_channel(
    sidecar: &Sidecar,
    codec: &dyn EccCodec,
    r: &mut ChannelState,
    g: &mut ChannelState,
) -> Result<Option<Channel>, String> {
    let (failing, good) = match (r.report.crc_ok, g.report.crc_ok) {
        (true, true) => return Ok(None),
        (false, false) => {
            return Err("Multiple channel corruption detected — cannot repair".to_string())
        }
        (false, true) => (r, &*g),
        (true, false) => (g, &*r),
    };

    let parity = match sidecar.parity_block() {
        Some(Ok(parity)) => parity,
        Some(Err(err)) => {
            tracing::warn!(channel = %failing.channel, error = %err, "parity block unreadable");
            return Ok(None);
        }
        None => return Ok(None),
    };

    tracing::warn!(
        channel = %failing.channel,
        parity_len = parity.len(),
        "attempting parity repair"
    );

    let mut candidate = parity_block(&parity, &good.decoded);
    candidate.resize(failing.expected_len, 0);

    let crc = checksum(&codec.encode(&candidate));
    let crc_ok = failing.report.expected_crc.eq_ignore_ascii_case(&crc_hex(crc));
    let digest_ok = failing.channel != Channel::R
        || sidecar
            .sha256_msg_b64
            .eq_ignore_ascii_case(&sha256_hex(&candidate));

    if crc_ok && digest_ok {
        tracing::info!(channel = %failing.channel, "parity repair verified");
        let channel = failing.channel;
        failing.accept_repair(candidate, crc);
        return Ok(Some(channel));
    }

    Err(format!("Failed to repair {} — data unrecoverable", failing.channel))
}
