use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EccError, Result};
use crate::hamming::HammingCodec;
use crate::parity::ParityCodec;
use crate::reed_solomon::{ReedSolomon, RS_PARITY_SYMBOLS};

/// The intra-payload code recorded in the sidecar's `ecc_scheme` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EccScheme {
    Parity,
    Hamming,
    Rs,
}

impl EccScheme {
    pub const ALL: [EccScheme; 3] = [EccScheme::Parity, EccScheme::Hamming, EccScheme::Rs];

    pub fn as_str(self) -> &'static str {
        match self {
            EccScheme::Parity => "parity",
            EccScheme::Hamming => "hamming",
            EccScheme::Rs => "rs",
        }
    }

    /// Whether a CRC failure may be repaired from the cross-channel parity block.
    ///
    /// The `parity` scheme stores the block but never repairs from it.
    pub fn allows_parity_repair(self) -> bool {
        matches!(self, EccScheme::Hamming | EccScheme::Rs)
    }

    /// Construct the codec for this scheme.
    pub fn codec(self) -> Box<dyn EccCodec> {
        match self {
            EccScheme::Parity => Box::new(ParityCodec),
            EccScheme::Hamming => Box::new(HammingCodec),
            EccScheme::Rs => Box::new(ReedSolomon::new(RS_PARITY_SYMBOLS)),
        }
    }
}

impl fmt::Display for EccScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EccScheme {
    type Err = EccError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "parity" => Ok(EccScheme::Parity),
            "hamming" => Ok(EccScheme::Hamming),
            "rs" => Ok(EccScheme::Rs),
            other => Err(EccError::UnknownScheme(other.to_string())),
        }
    }
}

/// Diagnostics from one decode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EccReport {
    /// At least one Hamming codeword had a non-zero syndrome.
    pub hamming_corrected: bool,
    /// Bits flipped by the Hamming decoder.
    pub corrected_bits: usize,
    /// Bytes repaired by the Reed-Solomon decoder.
    pub rs_corrected: usize,
}

/// Decoded payload plus diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EccDecoded {
    pub data: Vec<u8>,
    pub report: EccReport,
}

/// An encode/decode transform applied to one channel payload.
pub trait EccCodec {
    /// Which scheme this codec implements.
    fn scheme(&self) -> EccScheme;

    /// Encode a payload.
    fn encode(&self, payload: &[u8]) -> Vec<u8>;

    /// Decode `encoded` and truncate to `expected_len` bytes.
    fn decode(&self, encoded: &[u8], expected_len: usize) -> Result<EccDecoded>;
}

/// Truncate decoded bytes to the length recorded at encode time.
pub(crate) fn truncate_to(mut data: Vec<u8>, expected_len: usize) -> Result<Vec<u8>> {
    if data.len() < expected_len {
        return Err(EccError::Truncated {
            expected: expected_len,
            available: data.len(),
        });
    }
    data.truncate(expected_len);
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for scheme in EccScheme::ALL {
            assert_eq!(scheme.as_str().parse::<EccScheme>().unwrap(), scheme);
            assert_eq!(scheme.codec().scheme(), scheme);
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert_eq!(
            "golay".parse::<EccScheme>(),
            Err(EccError::UnknownScheme("golay".into()))
        );
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&EccScheme::Rs).unwrap(), "\"rs\"");
        let parsed: EccScheme = serde_json::from_str("\"hamming\"").unwrap();
        assert_eq!(parsed, EccScheme::Hamming);
    }

    #[test]
    fn only_hamming_and_rs_repair_from_parity() {
        assert!(!EccScheme::Parity.allows_parity_repair());
        assert!(EccScheme::Hamming.allows_parity_repair());
        assert!(EccScheme::Rs.allows_parity_repair());
    }

    #[test]
    fn every_codec_round_trips() {
        let payload = b"eyJwdXJwb3NlIjogIk1SUCB0ZXN0In0=";
        for scheme in EccScheme::ALL {
            let codec = scheme.codec();
            let encoded = codec.encode(payload);
            let decoded = codec.decode(&encoded, payload.len()).unwrap();
            assert_eq!(decoded.data, payload.to_vec(), "{scheme}");
            assert_eq!(decoded.report, EccReport::default(), "{scheme}");
        }
    }
}
