//! Least-significant-bit plane access over a raw pixel buffer.
//!
//! Bits are represented as `u8` values of `0` or `1`. Byte streams are
//! expanded MSB-first, so bit `i` of the stream lands in the LSB of
//! `buffer[offset + i]`.

use crate::error::{CarrierError, Result};

/// Channels per pixel in the interleaved RGB buffer.
pub const RGB_CHANNELS: usize = 3;

/// Number of payload bits a `width` x `height` raster can carry.
///
/// One bit per byte of the interleaved buffer.
pub fn capacity(width: u32, height: u32, channels: usize) -> usize {
    width as usize * height as usize * channels
}

/// Expand bytes into bits, most significant bit first.
pub fn unpack_bits(bytes: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for byte in bytes {
        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1);
        }
    }
    bits
}

/// Pack bits (MSB first) into bytes. A trailing partial byte is zero-padded.
pub fn pack_bits(bits: &[u8]) -> Vec<u8> {
    bits.chunks(8)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |acc, (i, bit)| acc | ((bit & 1) << (7 - i)))
        })
        .collect()
}

/// Write `bits` into the LSBs of `buffer` starting at byte `offset`.
///
/// Fails without touching the buffer if the bits do not fit.
pub fn embed(buffer: &mut [u8], offset: usize, bits: &[u8]) -> Result<()> {
    check_span(buffer.len(), offset, bits.len())?;
    for (slot, bit) in buffer[offset..offset + bits.len()].iter_mut().zip(bits) {
        *slot = (*slot & 0xFE) | (bit & 1);
    }
    Ok(())
}

/// Write a byte stream MSB-first into the LSBs of `buffer`.
///
/// Returns the number of bits written.
pub fn embed_bytes(buffer: &mut [u8], offset: usize, bytes: &[u8]) -> Result<usize> {
    let bits = unpack_bits(bytes);
    embed(buffer, offset, &bits)?;
    tracing::trace!(offset, bits = bits.len(), "embedded bit-plane span");
    Ok(bits.len())
}

/// Read `count` LSBs from `buffer` starting at byte `offset`.
pub fn extract(buffer: &[u8], offset: usize, count: usize) -> Result<Vec<u8>> {
    check_span(buffer.len(), offset, count)?;
    Ok(buffer[offset..offset + count]
        .iter()
        .map(|byte| byte & 1)
        .collect())
}

/// Read `byte_count` whole bytes (MSB first) from the LSBs of `buffer`.
pub fn extract_bytes(buffer: &[u8], offset: usize, byte_count: usize) -> Result<Vec<u8>> {
    let bits = extract(buffer, offset, byte_count * 8)?;
    Ok(pack_bits(&bits))
}

fn check_span(len: usize, offset: usize, count: usize) -> Result<()> {
    let available = len.saturating_sub(offset);
    if offset > len || count > available {
        return Err(CarrierError::CapacityExceeded {
            needed: count,
            available,
        });
    }
    Ok(())
}
