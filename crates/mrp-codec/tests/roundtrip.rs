use mrp_carrier::Raster;
use mrp_codec::{decode, decode_raster, encode, encode_raster, DecodeOptions, DecodeStatus, EncodeOptions};
use mrp_ecc::EccScheme;
use mrp_frame::{checksum, crc_hex};
use serde_json::json;

#[test]
fn every_scheme_round_trips_in_memory() {
    let cover = Raster::solid(64, 64, [200, 100, 50]);
    let metadata = json!({
        "purpose": "round trip",
        "tags": ["a", "b"],
        "nested": {"depth": 2, "ok": true},
    });
    let message = "multi-channel resonance: ünïcödé and emoji \u{1F308}";

    for ecc in EccScheme::ALL {
        let embedded = encode_raster(&cover, message, &metadata, &EncodeOptions::with_ecc(ecc))
            .unwrap_or_else(|err| panic!("{ecc}: encode failed: {err}"));
        let decoded = decode_raster(&embedded.stego, &DecodeOptions::default())
            .unwrap_or_else(|failure| panic!("{ecc}: decode failed: {failure}"));

        assert_eq!(decoded.message, message, "{ecc}");
        assert_eq!(decoded.metadata, metadata, "{ecc}");
        assert_eq!(decoded.report.status, DecodeStatus::Ok, "{ecc}");
        assert_eq!(decoded.report.ecc_scheme, ecc);
        assert!(decoded.report.sha_ok);
    }
}

#[test]
fn reported_crcs_cover_the_encoded_payloads() {
    let cover = Raster::solid(64, 64, [0, 0, 0]);
    let metadata = json!({"sequence": 7});
    let payload_r = b"aGVsbG8gd29ybGQ=";
    let payload_g = br#"eyJzZXF1ZW5jZSI6N30="#;

    for ecc in EccScheme::ALL {
        let codec = ecc.codec();
        let embedded = encode_raster(&cover, "hello world", &metadata, &EncodeOptions::with_ecc(ecc))
            .expect("encode should succeed");
        let report = decode_raster(&embedded.stego, &DecodeOptions::default())
            .expect("decode should succeed")
            .report;

        assert_eq!(report.crc_r, crc_hex(checksum(&codec.encode(payload_r))), "{ecc}");
        assert_eq!(report.crc_g, crc_hex(checksum(&codec.encode(payload_g))), "{ecc}");
        assert_eq!(report.r.actual_crc, report.crc_r);
        assert_eq!(report.g.actual_crc, report.crc_g);
    }
}

#[test]
fn empty_message_and_null_metadata_round_trip() {
    let cover = Raster::solid(40, 40, [1, 2, 3]);
    for ecc in EccScheme::ALL {
        let embedded = encode_raster(&cover, "", &json!(null), &EncodeOptions::with_ecc(ecc))
            .expect("encode should succeed");
        let decoded = decode_raster(&embedded.stego, &DecodeOptions::default())
            .expect("decode should succeed");
        assert_eq!(decoded.message, "");
        assert_eq!(decoded.metadata, json!(null));
    }
}

#[test]
fn long_message_spans_several_rs_blocks() {
    let cover = Raster::solid(120, 120, [90, 90, 90]);
    let message: String = (0..400).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
    let embedded = encode_raster(&cover, &message, &json!({}), &EncodeOptions::with_ecc(EccScheme::Rs))
        .expect("encode should succeed");
    // 400 chars -> 536 base64 bytes -> 3 blocks of 16 parity bytes.
    assert_eq!(embedded.payload_lengths.r, 536 + 3 * 16);
    let decoded = decode_raster(&embedded.stego, &DecodeOptions::default())
        .expect("decode should succeed");
    assert_eq!(decoded.message, message);
}

#[test]
fn file_round_trip_through_png() {
    let dir = tempfile::tempdir().expect("temp dir should be creatable");
    let cover_path = dir.path().join("cover.png");
    let stego_path = dir.path().join("stego.png");
    Raster::solid(50, 50, [33, 66, 99])
        .save(&cover_path)
        .expect("cover should be writable");

    let summary = encode(&cover_path, &stego_path, "via disk", &json!({"disk": true}), EccScheme::Hamming)
        .expect("encode should succeed");
    assert_eq!(summary.stego, stego_path);
    assert_eq!(summary.ecc, EccScheme::Hamming);
    assert_eq!(summary.capacity_bits, 50 * 50 * 3);
    assert!(summary.bits_used <= summary.capacity_bits);

    let decoded = decode(&stego_path).expect("decode should succeed");
    assert_eq!(decoded.message, "via disk");
    assert_eq!(decoded.metadata, json!({"disk": true}));

    // The cover file is left as it was.
    let cover = Raster::open(&cover_path).expect("cover should reopen");
    assert_eq!(cover, Raster::solid(50, 50, [33, 66, 99]));
}

#[test]
fn capacity_failure_writes_nothing() {
    let dir = tempfile::tempdir().expect("temp dir should be creatable");
    let cover_path = dir.path().join("tiny.png");
    let stego_path = dir.path().join("stego.png");
    Raster::solid(8, 8, [5, 5, 5])
        .save(&cover_path)
        .expect("cover should be writable");

    let err = encode(&cover_path, &stego_path, "this will not fit", &json!({}), EccScheme::Parity)
        .expect_err("encode should fail closed");
    assert!(matches!(
        err,
        mrp_codec::CodecError::CapacityExceeded { available: 192, .. }
    ));
    assert!(!stego_path.exists());
}

#[test]
fn missing_stego_file_is_a_failure() {
    let dir = tempfile::tempdir().expect("temp dir should be creatable");
    let failure = decode(dir.path().join("absent.png")).expect_err("decode should fail");
    assert_eq!(failure.status, DecodeStatus::Failed);
    assert!(failure.reason.contains("absent.png"));
}
