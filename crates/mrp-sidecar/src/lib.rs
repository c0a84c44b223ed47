//! Cross-channel integrity sidecar carried in the `B` frame.
//!
//! The sidecar records which ECC scheme was applied, CRC32s of the encoded
//! message and metadata payloads, SHA-256 digests of the message, the
//! pre-ECC lengths, and an XOR parity block over the two encoded payloads.
//! Decoders compare recomputed values against it; they never trust a payload
//! the sidecar does not vouch for.

pub mod config;
pub mod error;
pub mod sidecar;
pub mod validator;

pub use config::SidecarConfig;
pub use error::{Result, SidecarError};
pub use sidecar::{parity_block, sha256_hex, Sidecar};
pub use validator::{bookkeeping_issues, validate, verify_message, Validation};
