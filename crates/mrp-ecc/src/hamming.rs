//! Hamming(7,4) over the payload bitstream.
//!
//! Each nibble `(d1, d2, d3, d4)` (MSB first) becomes the codeword
//! `(p1, p2, d1, p3, d2, d3, d4)` with
//! `p1 = d1^d2^d4`, `p2 = d1^d3^d4`, `p3 = d2^d3^d4`.
//! Codewords are concatenated MSB first and the final byte is zero-padded.
//!
//! One flipped bit per codeword is corrected. Two flipped bits produce a
//! syndrome pointing at a third position; the decoder flips it and the
//! resulting payload is caught by the caller's CRC check.

use crate::error::Result;
use crate::scheme::{truncate_to, EccCodec, EccDecoded, EccReport, EccScheme};

/// Codeword length in bits.
pub const CODEWORD_BITS: usize = 7;

#[derive(Debug, Clone, Copy, Default)]
pub struct HammingCodec;

impl EccCodec for HammingCodec {
    fn scheme(&self) -> EccScheme {
        EccScheme::Hamming
    }

    fn encode(&self, payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(payload.len() * 2 * CODEWORD_BITS);
        for nibble in bits_of(payload).chunks(4) {
            out.extend_from_slice(&encode_nibble([nibble[0], nibble[1], nibble[2], nibble[3]]));
        }
        bytes_of(&out)
    }

    fn decode(&self, encoded: &[u8], expected_len: usize) -> Result<EccDecoded> {
        let bits = bits_of(encoded);
        let mut data_bits = Vec::with_capacity(bits.len() / CODEWORD_BITS * 4);
        let mut report = EccReport::default();

        for block in bits.chunks_exact(CODEWORD_BITS) {
            let mut word = [0u8; CODEWORD_BITS];
            word.copy_from_slice(block);
            if let Some(position) = correct(&mut word) {
                tracing::trace!(position, "hamming corrected bit");
                report.hamming_corrected = true;
                report.corrected_bits += 1;
            }
            data_bits.extend_from_slice(&[word[2], word[4], word[5], word[6]]);
        }

        Ok(EccDecoded {
            data: truncate_to(bytes_of(&data_bits), expected_len)?,
            report,
        })
    }
}

fn encode_nibble([d1, d2, d3, d4]: [u8; 4]) -> [u8; CODEWORD_BITS] {
    let p1 = d1 ^ d2 ^ d4;
    let p2 = d1 ^ d3 ^ d4;
    let p3 = d2 ^ d3 ^ d4;
    [p1, p2, d1, p3, d2, d3, d4]
}

/// Flip the bit named by the syndrome. Returns the 1-based position flipped.
fn correct(word: &mut [u8; CODEWORD_BITS]) -> Option<usize> {
    let [b1, b2, b3, b4, b5, b6, b7] = *word;
    let s1 = b1 ^ b3 ^ b5 ^ b7;
    let s2 = b2 ^ b3 ^ b6 ^ b7;
    let s3 = b4 ^ b5 ^ b6 ^ b7;
    let syndrome = ((s3 << 2) | (s2 << 1) | s1) as usize;
    if syndrome == 0 {
        return None;
    }
    word[syndrome - 1] ^= 1;
    Some(syndrome)
}

fn bits_of(bytes: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .flat_map(|byte| (0..8).rev().map(move |shift| (byte >> shift) & 1))
        .collect()
}

fn bytes_of(bits: &[u8]) -> Vec<u8> {
    bits.chunks(8)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |acc, (i, bit)| acc | (bit << (7 - i)))
        })
        .collect()
}
