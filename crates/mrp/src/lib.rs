//! Multi-Channel Resonance Protocol.
//!
//! mrp hides a UTF-8 message and a JSON metadata document in the
//! least-significant bits of an RGB image. Each payload travels in its own
//! CRC-checked frame, optionally protected by Hamming(7,4) or Reed-Solomon,
//! and a third frame carries an integrity sidecar that lets the decoder
//! detect tampering and rebuild a single damaged channel.
//!
//! # Crate Structure
//!
//! - [`carrier`]: Raster I/O and LSB bit-plane access
//! - [`frame`]: Self-describing, length-prefixed channel frames
//! - [`ecc`]: Parity, Hamming(7,4) and Reed-Solomon transforms
//! - [`sidecar`]: The cross-channel integrity document
//! - [`codec`]: Encode/decode orchestration and reports

/// Re-export carrier types.
pub mod carrier {
    pub use mrp_carrier::*;
}

/// Re-export frame types.
pub mod frame {
    pub use mrp_frame::*;
}

/// Re-export ECC types.
pub mod ecc {
    pub use mrp_ecc::*;
}

/// Re-export sidecar types.
pub mod sidecar {
    pub use mrp_sidecar::*;
}

/// Re-export codec types.
pub mod codec {
    pub use mrp_codec::*;
}

pub use mrp_codec::{decode, encode, DecodeFailure, DecodeStatus, Decoded, EncodeSummary};
pub use mrp_ecc::EccScheme;
