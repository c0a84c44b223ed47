use bytes::Bytes;

use crate::codec::{decode_frame, DecodedFrame, FrameConfig};
use crate::error::Result;

/// Reads successive frames from an owned byte buffer.
///
/// The cursor advances by each frame's header plus declared length, so the
/// position of the next frame is always derived from the data just read.
#[derive(Debug, Clone)]
pub struct FrameReader {
    buf: Bytes,
    pos: usize,
    config: FrameConfig,
}

impl FrameReader {
    /// Create a new frame reader with default configuration.
    pub fn new(buf: impl Into<Bytes>) -> Self {
        Self::with_config(buf, FrameConfig::default())
    }

    /// Create a new frame reader with explicit configuration.
    pub fn with_config(buf: impl Into<Bytes>, config: FrameConfig) -> Self {
        Self {
            buf: buf.into(),
            pos: 0,
            config,
        }
    }

    /// Read the next frame, checking its label against `expected_channel`.
    ///
    /// On a structural error the cursor does not move.
    pub fn read_frame(&mut self, expected_channel: Option<u8>) -> Result<DecodedFrame> {
        let (decoded, consumed) = decode_frame(
            &self.buf[self.pos..],
            expected_channel,
            self.config.max_payload_size,
        )?;
        self.pos += consumed;
        Ok(decoded)
    }

    /// Byte offset of the next frame.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Current frame reader configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}
