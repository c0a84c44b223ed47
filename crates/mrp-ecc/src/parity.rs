use crate::error::Result;
use crate::scheme::{truncate_to, EccCodec, EccDecoded, EccReport, EccScheme};

/// Identity transform used by the `parity` scheme.
///
/// Provides no intra-payload correction; the cross-channel parity block lives
/// in the sidecar.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParityCodec;

impl EccCodec for ParityCodec {
    fn scheme(&self) -> EccScheme {
        EccScheme::Parity
    }

    fn encode(&self, payload: &[u8]) -> Vec<u8> {
        payload.to_vec()
    }

    fn decode(&self, encoded: &[u8], expected_len: usize) -> Result<EccDecoded> {
        Ok(EccDecoded {
            data: truncate_to(encoded.to_vec(), expected_len)?,
            report: EccReport::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EccError;

    #[test]
    fn encode_is_identity() {
        assert_eq!(ParityCodec.encode(b"abc"), b"abc".to_vec());
    }

    #[test]
    fn decode_truncates() {
        let decoded = ParityCodec.decode(b"abc\0\0", 3).unwrap();
        assert_eq!(decoded.data, b"abc".to_vec());
    }

    #[test]
    fn decode_short_input_fails() {
        assert_eq!(
            ParityCodec.decode(b"ab", 3),
            Err(EccError::Truncated {
                expected: 3,
                available: 2
            })
        );
    }
}
