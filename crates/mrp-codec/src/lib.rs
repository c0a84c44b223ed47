//! MRP encode/decode orchestration.
//!
//! This is the layer most callers want. [`encode`] frames a message and its
//! JSON metadata into the LSB plane of a cover image; [`decode`] reads them
//! back, applies the recorded ECC, checks every value the sidecar vouches
//! for, repairs a single damaged channel from the parity block when the
//! scheme allows it, and reports what happened.

pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod inspect;
mod repair;
pub mod report;

pub use config::{DecodeOptions, EncodeOptions};
pub use decoder::{decode, decode_raster, decode_with_options};
pub use encoder::{encode, encode_raster, encode_with_options, Embedded};
pub use error::{CodecError, Result};
pub use inspect::{inspect_raster, FrameSummary, Inspection};
pub use report::{
    ChannelReport, DecodeFailure, DecodeReport, DecodeStatus, Decoded, EncodeSummary,
    PayloadLengths,
};
