//! Error-correcting codes applied to MRP channel payloads before framing.
//!
//! Three schemes are available, selected once per carrier:
//! - [`EccScheme::Parity`]: identity transform; recovery relies only on the
//!   cross-channel XOR block kept in the sidecar
//! - [`EccScheme::Hamming`]: Hamming(7,4) over the payload bitstream, one
//!   corrected bit per 7-bit codeword
//! - [`EccScheme::Rs`]: Reed-Solomon over GF(2^8) with 16 parity bytes per
//!   block, up to 8 corrected bytes per block

pub mod error;
pub mod gf256;
pub mod hamming;
pub mod parity;
pub mod reed_solomon;
pub mod scheme;

pub use error::{EccError, Result};
pub use hamming::HammingCodec;
pub use parity::ParityCodec;
pub use reed_solomon::{ReedSolomon, RS_BLOCK_SIZE, RS_PARITY_SYMBOLS};
pub use scheme::{EccCodec, EccDecoded, EccReport, EccScheme};
