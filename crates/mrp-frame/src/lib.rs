//! Self-describing channel framing for MRP.
//!
//! Every channel stream is framed with:
//! - A 4-byte magic number ("MRP1") for synchronization
//! - A 1-byte ASCII channel label (`R`, `G`, `B`)
//! - A 1-byte flag set (bit 0: CRC32 present)
//! - A 4-byte big-endian payload length
//! - An optional 4-byte big-endian CRC32 of the payload
//!
//! Frames are concatenated back-to-back; a reader learns where the next frame
//! starts from the length field of the current one.

pub mod channel;
pub mod codec;
pub mod error;
pub mod reader;
pub mod writer;

pub use channel::{channel_name, Channel};
pub use codec::{
    checksum, crc_hex, decode_frame, encode_frame, parse_frame, parse_from, DecodedFrame, Frame,
    FrameConfig, BASE_HEADER_SIZE, CRC_SIZE, DEFAULT_MAX_PAYLOAD, FLAG_CRC, HEADER_SIZE, MAGIC,
};
pub use error::{FrameError, Result};
pub use reader::FrameReader;
pub use writer::FrameWriter;
