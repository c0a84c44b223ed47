use mrp_carrier::Raster;
use mrp_codec::{decode_raster, encode_raster, DecodeOptions, DecodeStatus, Embedded, EncodeOptions};
use mrp_ecc::EccScheme;
use mrp_frame::{HEADER_SIZE, MAGIC};
use serde_json::json;

const MESSAGE: &str = "hello world";

fn embed(ecc: EccScheme) -> Embedded {
    let metadata = json!({"purpose": "MRP test", "sequence": 1});
    encode_raster(
        &Raster::solid(50, 50, [128, 64, 32]),
        MESSAGE,
        &metadata,
        &EncodeOptions::with_ecc(ecc),
    )
    .expect("encode should succeed")
}

/// Bit offsets of the `R`, `G` and `B` payloads in the LSB stream.
fn payload_bits(embedded: &Embedded) -> (usize, usize, usize) {
    let lengths = embedded.payload_lengths;
    let r = HEADER_SIZE * 8;
    let g = (2 * HEADER_SIZE + lengths.r) * 8;
    let b = (3 * HEADER_SIZE + lengths.r + lengths.g) * 8;
    (r, g, b)
}

fn flip(raster: &mut Raster, bits: &[usize]) {
    for &bit in bits {
        raster.pixels_mut()[bit] ^= 1;
    }
}

fn decode(raster: &Raster) -> Result<mrp_codec::Decoded, mrp_codec::DecodeFailure> {
    decode_raster(raster, &DecodeOptions::default())
}

#[test]
fn parity_scheme_does_not_heal_a_single_flip() {
    let embedded = embed(EccScheme::Parity);
    let (r, _, _) = payload_bits(&embedded);

    for k in (0..embedded.payload_lengths.r * 8).step_by(11) {
        let mut stego = embedded.stego.clone();
        flip(&mut stego, &[r + k]);
        let failure = decode(&stego).expect_err("flipped parity payload must not decode");
        assert!(
            matches!(
                failure.status,
                DecodeStatus::Failed | DecodeStatus::IntegrityFailed
            ),
            "bit {k}: {failure}"
        );
        let report = failure.report.expect("report should be present");
        assert!(!report.r.crc_ok);
        assert!(!report.r.frame_crc_ok);
        assert!(report.repaired_channel.is_none());
    }
}

#[test]
fn hamming_corrects_any_single_bit_in_a_codeword() {
    let embedded = embed(EccScheme::Hamming);
    let (r, _, _) = payload_bits(&embedded);

    for k in 7..14 {
        let mut stego = embedded.stego.clone();
        flip(&mut stego, &[r + k]);
        let decoded = decode(&stego).unwrap_or_else(|failure| panic!("bit {k}: {failure}"));
        assert_eq!(decoded.message, MESSAGE);
        assert_eq!(decoded.report.status, DecodeStatus::Ok);
        assert!(decoded.report.r.hamming_corrected);
        assert!(decoded.report.r.crc_ok);
        assert!(!decoded.report.r.frame_crc_ok);
        assert_eq!(decoded.report.r.actual_crc, decoded.report.crc_r);
    }
}

#[test]
fn hamming_double_error_in_one_codeword_fails() {
    let embedded = embed(EccScheme::Hamming);
    let (r, _, _) = payload_bits(&embedded);

    for (a, b) in [(0, 1), (2, 6), (7, 13)] {
        let mut stego = embedded.stego.clone();
        flip(&mut stego, &[r + a, r + b]);
        let failure = decode(&stego).expect_err("double error must not decode");
        assert_eq!(failure.status, DecodeStatus::Failed);
        assert_eq!(failure.reason, "Failed to repair R — data unrecoverable");
        let report = failure.report.expect("report should be present");
        assert!(report.r.hamming_corrected);
        assert!(!report.r.crc_ok);
        assert!(report.g.crc_ok);
    }
}

#[test]
fn reed_solomon_corrects_up_to_eight_bytes() {
    let embedded = embed(EccScheme::Rs);
    let (r, _, _) = payload_bits(&embedded);

    for count in 1..=8 {
        let mut stego = embedded.stego.clone();
        let bits: Vec<usize> = (0..count).map(|byte| r + byte * 3 * 8 + (byte % 8)).collect();
        flip(&mut stego, &bits);
        let decoded = decode(&stego).unwrap_or_else(|failure| panic!("{count} bytes: {failure}"));
        assert_eq!(decoded.message, MESSAGE);
        assert_eq!(decoded.report.status, DecodeStatus::Ok);
        assert_eq!(decoded.report.r.rs_corrected, count);
    }
}

#[test]
fn reed_solomon_rejects_nine_bytes() {
    let embedded = embed(EccScheme::Rs);
    let (r, _, _) = payload_bits(&embedded);

    let mut stego = embedded.stego.clone();
    let bits: Vec<usize> = (0..9).map(|byte| r + byte * 3 * 8).collect();
    flip(&mut stego, &bits);
    let failure = decode(&stego).expect_err("nine byte errors must not decode");
    assert_eq!(failure.status, DecodeStatus::Failed);
}

#[test]
fn corrupting_both_channels_refuses_repair() {
    let embedded = embed(EccScheme::Hamming);
    let (r, g, _) = payload_bits(&embedded);

    let mut stego = embedded.stego.clone();
    flip(&mut stego, &[r, r + 1, g, g + 1]);
    let failure = decode(&stego).expect_err("two damaged channels must not decode");
    assert_eq!(failure.status, DecodeStatus::Failed);
    assert!(
        failure
            .reason
            .starts_with("Multiple channel corruption detected"),
        "{}",
        failure.reason
    );
    let report = failure.report.expect("report should be present");
    assert!(!report.r.crc_ok && !report.g.crc_ok);
}

#[test]
fn sidecar_corruption_is_never_trusted_silently() {
    for ecc in [EccScheme::Parity, EccScheme::Hamming] {
        let embedded = embed(ecc);
        let (_, _, b) = payload_bits(&embedded);

        for k in (0..embedded.payload_lengths.b * 8).step_by(5) {
            let mut stego = embedded.stego.clone();
            flip(&mut stego, &[b + k]);
            match decode(&stego) {
                Ok(decoded) => {
                    assert_eq!(decoded.report.status, DecodeStatus::Degraded, "{ecc} bit {k}");
                    assert!(!decoded.report.sidecar_crc_ok);
                    assert_eq!(decoded.message, MESSAGE);
                }
                Err(failure) => assert!(!failure.status.is_success()),
            }
        }
    }
}

#[test]
fn sidecar_header_crc_damage_degrades() {
    let embedded = embed(EccScheme::Rs);
    let (_, _, b) = payload_bits(&embedded);

    // Last bit of the B frame's stored CRC.
    let mut stego = embedded.stego.clone();
    flip(&mut stego, &[b - 1]);
    let decoded = decode(&stego).expect("payloads are intact");
    assert_eq!(decoded.report.status, DecodeStatus::Degraded);
    assert!(!decoded.report.sidecar_crc_ok);
    assert!(decoded.report.r.crc_ok && decoded.report.g.crc_ok);
    assert!(decoded
        .report
        .warnings
        .iter()
        .any(|w| w.contains("sidecar frame CRC")));
}

#[test]
fn channel_label_mismatch_depends_on_scheme() {
    // LSB of the R frame's channel byte turns 'R' into 'S'.
    let label_bit = MAGIC.len() * 8 + 7;

    let mut parity = embed(EccScheme::Parity).stego;
    flip(&mut parity, &[label_bit]);
    let failure = decode(&parity).expect_err("parity scheme rejects mislabeled frames");
    assert_eq!(failure.reason, "Channel header mismatch detected");

    for ecc in [EccScheme::Hamming, EccScheme::Rs] {
        let mut stego = embed(ecc).stego;
        flip(&mut stego, &[label_bit]);
        let decoded = decode(&stego).unwrap_or_else(|failure| panic!("{ecc}: {failure}"));
        assert_eq!(decoded.message, MESSAGE);
        assert!(!decoded.report.r.channel_valid);
        assert!(decoded.report.g.channel_valid);
        assert!(decoded
            .report
            .warnings
            .iter()
            .any(|w| w.contains("channel header mismatch")));
    }
}

#[test]
fn damaged_magic_is_structural() {
    let mut stego = embed(EccScheme::Rs).stego;
    flip(&mut stego, &[0]);
    let failure = decode(&stego).expect_err("bad magic must not decode");
    assert_eq!(failure.status, DecodeStatus::Failed);
    assert!(failure.report.is_none());
    assert!(failure.reason.contains("magic"));
}

#[test]
fn damage_outside_the_stream_is_ignored() {
    let embedded = embed(EccScheme::Parity);
    let mut stego = embedded.stego.clone();
    flip(&mut stego, &[embedded.bits_used, embedded.capacity_bits - 1]);
    let decoded = decode(&stego).expect("trailing LSBs are not part of any frame");
    assert_eq!(decoded.report.status, DecodeStatus::Ok);
}
