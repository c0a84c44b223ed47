//! Systematic Reed-Solomon over GF(2^8).
//!
//! The payload is split into blocks of at most `255 - nsym` data bytes, each
//! followed by `nsym` parity bytes. Roots of the generator are
//! α^0 .. α^(nsym-1). Decoding runs syndromes, Berlekamp-Massey, a Chien
//! search and Forney's algorithm, then verifies the corrected block.

use crate::error::{EccError, Result};
use crate::gf256::{
    alpha_pow, alpha_pow_neg, div, eval_high_first, eval_low_first, mul, poly_mul,
};
use crate::scheme::{truncate_to, EccCodec, EccDecoded, EccReport, EccScheme};

/// Parity symbols per block used by MRP.
pub const RS_PARITY_SYMBOLS: usize = 16;

/// Maximum codeword length over GF(2^8).
pub const RS_BLOCK_SIZE: usize = 255;

/// A Reed-Solomon codec with a fixed number of parity symbols.
#[derive(Debug, Clone)]
pub struct ReedSolomon {
    nsym: usize,
    /// Generator polynomial, highest degree first, monic.
    generator: Vec<u8>,
}

impl ReedSolomon {
    /// Build a codec with `nsym` parity bytes per block.
    ///
    /// # Panics
    /// If `nsym` is zero or leaves no room for data in a 255-byte block.
    pub fn new(nsym: usize) -> Self {
        assert!(
            nsym > 0 && nsym < RS_BLOCK_SIZE,
            "parity symbols must be in 1..255"
        );
        let generator = (0..nsym).fold(vec![1u8], |g, i| poly_mul(&g, &[1, alpha_pow(i)]));
        Self { nsym, generator }
    }

    pub fn parity_symbols(&self) -> usize {
        self.nsym
    }

    /// Largest number of byte errors correctable per block.
    pub fn max_corrections(&self) -> usize {
        self.nsym / 2
    }

    fn data_per_block(&self) -> usize {
        RS_BLOCK_SIZE - self.nsym
    }

    fn encode_block(&self, data: &[u8]) -> Vec<u8> {
        let mut work = vec![0u8; data.len() + self.nsym];
        work[..data.len()].copy_from_slice(data);
        for i in 0..data.len() {
            let coef = work[i];
            if coef == 0 {
                continue;
            }
            for (j, &g) in self.generator.iter().enumerate().skip(1) {
                work[i + j] ^= mul(g, coef);
            }
        }
        work[..data.len()].copy_from_slice(data);
        work
    }

    fn syndromes(&self, block: &[u8]) -> Vec<u8> {
        (0..self.nsym)
            .map(|i| eval_high_first(block, alpha_pow(i)))
            .collect()
    }

    /// Correct `block` in place. Returns the number of corrected bytes.
    fn decode_block(&self, index: usize, block: &mut [u8]) -> Result<usize> {
        let n = block.len();
        if n <= self.nsym {
            return Err(EccError::MalformedBlock {
                block: index,
                len: n,
                parity: self.nsym,
            });
        }
        let uncorrectable = |reason: String| EccError::Uncorrectable {
            block: index,
            reason,
        };

        let synd = self.syndromes(block);
        if synd.iter().all(|s| *s == 0) {
            return Ok(0);
        }

        let locator = berlekamp_massey(&synd);
        let errors = locator.len() - 1;
        if errors > self.max_corrections() {
            return Err(uncorrectable(format!(
                "{errors} errors exceed capacity of {}",
                self.max_corrections()
            )));
        }

        // Chien search over the degrees present in this (possibly shortened) block.
        let degrees: Vec<usize> = (0..n)
            .filter(|&d| eval_low_first(&locator, alpha_pow_neg(d)) == 0)
            .collect();
        if degrees.len() != errors {
            return Err(uncorrectable(format!(
                "locator of degree {errors} has {} roots in block",
                degrees.len()
            )));
        }

        // Forney with first consecutive root α^0: e = X * Ω(X^-1) / Λ'(X^-1).
        let evaluator: Vec<u8> = (0..self.nsym)
            .map(|k| {
                (0..=k)
                    .filter(|&i| k - i < locator.len())
                    .fold(0u8, |acc, i| acc ^ mul(synd[i], locator[k - i]))
            })
            .collect();
        let derivative: Vec<u8> = locator
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, &c)| if i % 2 == 1 { c } else { 0 })
            .collect();

        for &d in &degrees {
            let x_inv = alpha_pow_neg(d);
            let denom = eval_low_first(&derivative, x_inv);
            if denom == 0 {
                return Err(uncorrectable("zero locator derivative".to_string()));
            }
            let magnitude = mul(alpha_pow(d), div(eval_low_first(&evaluator, x_inv), denom));
            block[n - 1 - d] ^= magnitude;
        }

        if self.syndromes(block).iter().any(|s| *s != 0) {
            return Err(uncorrectable(
                "residual syndrome after correction".to_string(),
            ));
        }
        Ok(errors)
    }
}

impl Default for ReedSolomon {
    fn default() -> Self {
        Self::new(RS_PARITY_SYMBOLS)
    }
}

impl EccCodec for ReedSolomon {
    fn scheme(&self) -> EccScheme {
        EccScheme::Rs
    }

    fn encode(&self, payload: &[u8]) -> Vec<u8> {
        payload
            .chunks(self.data_per_block())
            .flat_map(|chunk| self.encode_block(chunk))
            .collect()
    }

    fn decode(&self, encoded: &[u8], expected_len: usize) -> Result<EccDecoded> {
        let mut data = Vec::with_capacity(encoded.len());
        let mut report = EccReport::default();

        for (index, chunk) in encoded.chunks(RS_BLOCK_SIZE).enumerate() {
            let mut block = chunk.to_vec();
            let corrected = self.decode_block(index, &mut block)?;
            if corrected > 0 {
                tracing::debug!(block = index, corrected, "reed-solomon corrected bytes");
            }
            report.rs_corrected += corrected;
            data.extend_from_slice(&block[..block.len() - self.nsym]);
        }

        Ok(EccDecoded {
            data: truncate_to(data, expected_len)?,
            report,
        })
    }
}

/// Error locator Λ(x), lowest degree first, trimmed of high zero terms.
fn berlekamp_massey(synd: &[u8]) -> Vec<u8> {
    let mut current = vec![1u8];
    let mut previous = vec![1u8];
    let mut order = 0usize;
    let mut shift = 1usize;
    let mut last_discrepancy = 1u8;

    for n in 0..synd.len() {
        let discrepancy = (1..=order)
            .filter(|&i| i < current.len())
            .fold(synd[n], |acc, i| acc ^ mul(current[i], synd[n - i]));

        if discrepancy == 0 {
            shift += 1;
            continue;
        }

        let scale = div(discrepancy, last_discrepancy);
        let mut next = current.clone();
        if next.len() < previous.len() + shift {
            next.resize(previous.len() + shift, 0);
        }
        for (i, &b) in previous.iter().enumerate() {
            next[i + shift] ^= mul(scale, b);
        }

        if 2 * order <= n {
            order = n + 1 - order;
            previous = current;
            last_discrepancy = discrepancy;
            shift = 1;
        } else {
            shift += 1;
        }
        current = next;
    }

    while current.len() > 1 && current.last() == Some(&0) {
        current.pop();
    }
    current
}
