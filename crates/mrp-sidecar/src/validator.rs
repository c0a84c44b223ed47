use mrp_frame::crc_hex;
use serde_json::Value;

use crate::sidecar::{parity_block, sha256_hex, Sidecar};

/// Outcome of comparing recomputed CRCs against the sidecar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validation {
    pub crc_r_ok: bool,
    pub crc_g_ok: bool,
}

impl Validation {
    pub fn all_ok(&self) -> bool {
        self.crc_r_ok && self.crc_g_ok
    }
}

/// Compare recomputed CRC32s for `R` and `G` with the sidecar's values.
pub fn validate(sidecar: &Sidecar, crc_r_calc: u32, crc_g_calc: u32) -> Validation {
    let validation = Validation {
        crc_r_ok: crc_matches(&sidecar.crc_r, crc_r_calc),
        crc_g_ok: crc_matches(&sidecar.crc_g, crc_g_calc),
    };
    if !validation.all_ok() {
        tracing::debug!(
            expected_r = %sidecar.crc_r,
            actual_r = %crc_hex(crc_r_calc),
            expected_g = %sidecar.crc_g,
            actual_g = %crc_hex(crc_g_calc),
            "sidecar CRC mismatch"
        );
    }
    validation
}

pub(crate) fn crc_matches(expected: &str, actual: u32) -> bool {
    expected.eq_ignore_ascii_case(&crc_hex(actual))
}

/// Check both message digests recorded in the sidecar.
pub fn verify_message(sidecar: &Sidecar, message: &[u8], message_b64: &[u8]) -> bool {
    sidecar.sha256_msg.eq_ignore_ascii_case(&sha256_hex(message))
        && sidecar
            .sha256_msg_b64
            .eq_ignore_ascii_case(&sha256_hex(message_b64))
}

/// Inconsistencies in the sidecar's own parity and length bookkeeping.
///
/// `encoded_r`/`encoded_g` are the encoded payloads the sidecar should
/// describe. An empty result means the bookkeeping is consistent.
pub fn bookkeeping_issues(sidecar: &Sidecar, encoded_r: &[u8], encoded_g: &[u8]) -> Vec<String> {
    let mut issues = Vec::new();
    let expected = parity_block(encoded_r, encoded_g);

    let stored_len = match sidecar.parity_block() {
        Some(Ok(stored)) => {
            if stored.len() != expected.len() {
                issues.push(format!(
                    "parity block is {} bytes, expected {}",
                    stored.len(),
                    expected.len()
                ));
            } else if stored != expected {
                issues.push("parity block does not match encoded payloads".to_string());
            }
            Some(stored.len())
        }
        Some(Err(err)) => {
            issues.push(format!("parity block is not valid base64: {err}"));
            None
        }
        None => Some(0),
    };

    if let Some(declared) = &sidecar.parity_len {
        match declared.as_u64() {
            Some(declared) if Some(declared as usize) == stored_len => {}
            Some(declared) => issues.push(format!(
                "parity_len {declared} does not match parity block length"
            )),
            None => issues.push(format!("malformed parity_len {declared}")),
        }
    }

    if let Some(bits) = &sidecar.bits_per_channel {
        if bits != &Value::from(1) {
            issues.push(format!("unsupported bits_per_channel {bits}"));
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use mrp_ecc::EccScheme;
    use mrp_frame::checksum;

    use super::*;
    use crate::config::SidecarConfig;

    fn sample() -> Sidecar {
        Sidecar::build(
            EccScheme::Parity,
            b"hello world",
            b"aGVsbG8gd29ybGQ=",
            b"e30=",
            16,
            4,
            &SidecarConfig::default(),
        )
    }

    #[test]
    fn validate_reports_each_channel() {
        let sidecar = sample();
        let good_r = checksum(b"aGVsbG8gd29ybGQ=");
        let good_g = checksum(b"e30=");

        assert!(validate(&sidecar, good_r, good_g).all_ok());

        let bad_g = validate(&sidecar, good_r, good_g ^ 1);
        assert!(bad_g.crc_r_ok);
        assert!(!bad_g.crc_g_ok);
        assert!(!bad_g.all_ok());
    }

    #[test]
    fn validate_accepts_lowercase_hex() {
        let mut sidecar = sample();
        sidecar.crc_r = sidecar.crc_r.to_lowercase();
        assert!(validate(&sidecar, checksum(b"aGVsbG8gd29ybGQ="), checksum(b"e30=")).crc_r_ok);
    }

    #[test]
    fn verify_message_needs_both_digests() {
        let mut sidecar = sample();
        assert!(verify_message(&sidecar, b"hello world", b"aGVsbG8gd29ybGQ="));
        assert!(!verify_message(&sidecar, b"hello worle", b"aGVsbG8gd29ybGQ="));

        sidecar.sha256_msg_b64 = sha256_hex(b"other");
        assert!(!verify_message(&sidecar, b"hello world", b"aGVsbG8gd29ybGQ="));
    }

    #[test]
    fn consistent_bookkeeping_has_no_issues() {
        let sidecar = sample();
        assert!(bookkeeping_issues(&sidecar, b"aGVsbG8gd29ybGQ=", b"e30=").is_empty());
    }

    #[test]
    fn tampered_parity_block_is_flagged() {
        let mut sidecar = sample();
        let mut block = sidecar.parity_block().unwrap().unwrap();
        block[0] ^= 0x40;
        sidecar.parity_block_b64 = Some(base64::Engine::encode(
            &base64::engine::general_purpose::STANDARD,
            &block,
        ));
        let issues = bookkeeping_issues(&sidecar, b"aGVsbG8gd29ybGQ=", b"e30=");
        assert_eq!(issues, vec!["parity block does not match encoded payloads"]);
    }

    #[test]
    fn invalid_base64_parity_is_flagged() {
        let mut sidecar = sample();
        sidecar.parity_block_b64 = Some("not*base64".into());
        let issues = bookkeeping_issues(&sidecar, b"aGVsbG8gd29ybGQ=", b"e30=");
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("not valid base64"));
    }

    #[test]
    fn parity_len_must_be_a_matching_integer() {
        let mut sidecar = sample();
        sidecar.parity_len = Some(Value::from(16));
        assert!(bookkeeping_issues(&sidecar, b"aGVsbG8gd29ybGQ=", b"e30=").is_empty());

        sidecar.parity_len = Some(Value::from(15));
        assert_eq!(
            bookkeeping_issues(&sidecar, b"aGVsbG8gd29ybGQ=", b"e30=").len(),
            1
        );

        sidecar.parity_len = Some(Value::from("sixteen"));
        let issues = bookkeeping_issues(&sidecar, b"aGVsbG8gd29ybGQ=", b"e30=");
        assert!(issues[0].starts_with("malformed parity_len"));
    }

    #[test]
    fn bits_per_channel_other_than_one_is_flagged() {
        let mut sidecar = sample();
        sidecar.bits_per_channel = Some(Value::from(2));
        let issues = bookkeeping_issues(&sidecar, b"aGVsbG8gd29ybGQ=", b"e30=");
        assert_eq!(issues, vec!["unsupported bits_per_channel 2"]);
    }

    #[test]
    fn omitted_parity_block_is_not_an_issue() {
        let mut sidecar = sample();
        sidecar.parity_block_b64 = None;
        assert!(bookkeeping_issues(&sidecar, b"aGVsbG8gd29ybGQ=", b"e30=").is_empty());

        sidecar.parity_len = Some(Value::from(16));
        assert_eq!(
            bookkeeping_issues(&sidecar, b"aGVsbG8gd29ybGQ=", b"e30="),
            vec!["parity_len 16 does not match parity block length"]
        );
    }
}
