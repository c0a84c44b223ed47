use bytes::{BufMut, Bytes, BytesMut};

use crate::channel::Channel;
use crate::error::{FrameError, Result};

/// Fixed header without CRC: magic (4) + channel (1) + flags (1) + length (4).
pub const BASE_HEADER_SIZE: usize = 10;

/// Size of the optional CRC32 field.
pub const CRC_SIZE: usize = 4;

/// Header size as written by the encoder (CRC always present).
pub const HEADER_SIZE: usize = BASE_HEADER_SIZE + CRC_SIZE;

/// Magic bytes: "MRP1".
pub const MAGIC: [u8; 4] = *b"MRP1";

/// Flag bit 0: a CRC32 of the payload follows the length field.
pub const FLAG_CRC: u8 = 0x01;

/// Default maximum payload size: 16 MiB.
pub const DEFAULT_MAX_PAYLOAD: usize = 16 * 1024 * 1024;

/// CRC32 (IEEE) of `data`.
pub fn checksum(data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Uppercase, zero-padded 8-digit hex rendering of a CRC32.
pub fn crc_hex(crc: u32) -> String {
    format!("{crc:08X}")
}

/// One channel's frame. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    channel: u8,
    flags: u8,
    crc32: Option<u32>,
    payload: Bytes,
}

impl Frame {
    /// Create a CRC-carrying frame for a known channel.
    pub fn new(channel: Channel, payload: impl Into<Bytes>) -> Self {
        Self {
            channel: channel.as_byte(),
            flags: FLAG_CRC,
            crc32: None,
            payload: payload.into(),
        }
    }

    /// Create a frame from a textual channel label.
    ///
    /// Fails unless `channel` is exactly one ASCII character.
    pub fn build(channel: &str, payload: impl Into<Bytes>, with_crc: bool) -> Result<Self> {
        let channel = match channel.as_bytes() {
            [byte] if byte.is_ascii() => *byte,
            _ => return Err(FrameError::InvalidChannel(channel.to_string())),
        };
        Ok(Self {
            channel,
            flags: if with_crc { FLAG_CRC } else { 0 },
            crc32: None,
            payload: payload.into(),
        })
    }

    /// The raw channel byte from the header.
    pub fn channel(&self) -> u8 {
        self.channel
    }

    pub fn flags(&self) -> u8 {
        self.flags
    }

    pub fn has_crc(&self) -> bool {
        self.flags & FLAG_CRC != 0
    }

    /// The CRC carried by (or computed for) this frame.
    ///
    /// For parsed frames this is the stored value, which may not match the
    /// payload. For built frames it is computed on demand.
    pub fn crc32(&self) -> Option<u32> {
        if !self.has_crc() {
            return None;
        }
        Some(self.crc32.unwrap_or_else(|| checksum(&self.payload)))
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// The total wire size of this frame (header + payload).
    pub fn wire_size(&self) -> usize {
        let crc = if self.has_crc() { CRC_SIZE } else { 0 };
        BASE_HEADER_SIZE + crc + self.payload.len()
    }

    /// Serialize header, optional CRC and payload.
    pub fn to_bytes(&self) -> Result<Bytes> {
        let mut dst = BytesMut::with_capacity(self.wire_size());
        encode_frame(self, &mut dst)?;
        Ok(dst.freeze())
    }
}

/// A parsed frame plus its integrity observations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame {
    pub frame: Frame,
    /// Stored CRC matches the payload. `true` when no CRC is present.
    pub crc_ok: bool,
    /// Channel byte matches the caller's expectation. `true` when none was given.
    pub channel_valid: bool,
}

/// Encode a frame into the wire format.
///
/// Wire format (big-endian):
/// ```text
/// ┌────────────┬─────────┬───────┬────────────┬──────────────┬──────────────┐
/// │ Magic (4B) │ Channel │ Flags │ Length     │ CRC32 (4B)   │ Payload      │
/// │ "MRP1"     │ (1B)    │ (1B)  │ (4B BE)    │ iff flag bit0│ (Length B)   │
/// └────────────┴─────────┴───────┴────────────┴──────────────┴──────────────┘
/// ```
pub fn encode_frame(frame: &Frame, dst: &mut BytesMut) -> Result<()> {
    if frame.payload.len() > u32::MAX as usize {
        return Err(FrameError::PayloadTooLarge {
            size: frame.payload.len(),
            max: u32::MAX as usize,
        });
    }
    dst.reserve(frame.wire_size());
    dst.put_slice(&MAGIC);
    dst.put_u8(frame.channel);
    dst.put_u8(frame.flags);
    dst.put_u32(frame.payload.len() as u32);
    if let Some(crc) = frame.crc32() {
        dst.put_u32(crc);
    }
    dst.put_slice(&frame.payload);
    Ok(())
}

/// Decode one frame from the front of `data`.
///
/// Returns the frame and the number of bytes it occupied. Structural problems
/// are errors; CRC and channel mismatches are reported on the result.
pub fn decode_frame(
    data: &[u8],
    expected_channel: Option<u8>,
    max_payload: usize,
) -> Result<(DecodedFrame, usize)> {
    if data.len() < BASE_HEADER_SIZE {
        return Err(FrameError::TruncatedHeader {
            needed: BASE_HEADER_SIZE,
            available: data.len(),
        });
    }

    let found: [u8; 4] = [data[0], data[1], data[2], data[3]];
    if found != MAGIC {
        return Err(FrameError::InvalidMagic { found });
    }

    let channel = data[4];
    let flags = data[5];
    let length = u32::from_be_bytes([data[6], data[7], data[8], data[9]]) as usize;
    let mut pos = BASE_HEADER_SIZE;

    let stored_crc = if flags & FLAG_CRC != 0 {
        let rest = &data[pos..];
        if rest.len() < CRC_SIZE {
            return Err(FrameError::TruncatedCrc {
                available: rest.len(),
            });
        }
        pos += CRC_SIZE;
        Some(u32::from_be_bytes([rest[0], rest[1], rest[2], rest[3]]))
    } else {
        None
    };

    if length > max_payload {
        return Err(FrameError::PayloadTooLarge {
            size: length,
            max: max_payload,
        });
    }
    let available = data.len() - pos;
    if length > available {
        return Err(FrameError::TruncatedPayload {
            declared: length,
            available,
        });
    }

    let payload = Bytes::copy_from_slice(&data[pos..pos + length]);
    pos += length;

    let crc_ok = stored_crc.is_none_or(|crc| crc == checksum(&payload));
    let channel_valid = expected_channel.is_none_or(|expected| expected == channel);

    tracing::trace!(
        channel = %(channel as char),
        length,
        crc_ok,
        channel_valid,
        "decoded frame"
    );

    Ok((
        DecodedFrame {
            frame: Frame {
                channel,
                flags,
                crc32: stored_crc,
                payload,
            },
            crc_ok,
            channel_valid,
        },
        pos,
    ))
}

/// Decode one frame from the front of `data` with the default payload limit.
pub fn parse_from(data: &[u8], expected_channel: Option<u8>) -> Result<(DecodedFrame, usize)> {
    decode_frame(data, expected_channel, DEFAULT_MAX_PAYLOAD)
}

/// Decode a frame that must be the only content of `data`.
///
/// Bytes after the frame are tolerated only if they are all zero (alignment
/// padding).
pub fn parse_frame(data: &[u8], expected_channel: Option<u8>) -> Result<DecodedFrame> {
    let (decoded, consumed) = parse_from(data, expected_channel)?;
    if let Some(stray) = data[consumed..].iter().position(|b| *b != 0) {
        return Err(FrameError::TrailingData {
            offset: consumed + stray,
        });
    }
    Ok(decoded)
}

/// Configuration for frame reading and writing.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Maximum payload size in bytes. Default: 16 MiB.
    pub max_payload_size: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_payload_size: DEFAULT_MAX_PAYLOAD,
        }
    }
}
