//! Carrier layer for MRP: raster access and least-significant-bit plane I/O.
//!
//! This is the lowest layer of mrp. The carrier is a row-major, interleaved,
//! 8-bit-per-channel RGB buffer; one payload bit lives in the LSB of every byte.
//! Everything else builds on top of the [`Raster`] type and the bit-plane
//! functions provided here.

pub mod bitplane;
pub mod error;
pub mod raster;

pub use bitplane::{
    capacity, embed, embed_bytes, extract, extract_bytes, pack_bits, unpack_bits, RGB_CHANNELS,
};
pub use error::{CarrierError, Result};
pub use raster::Raster;
