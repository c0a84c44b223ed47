use std::io::{ErrorKind, Write};

use bytes::BytesMut;

use crate::codec::{encode_frame, Frame, FrameConfig};
use crate::error::{FrameError, Result};

const INITIAL_BUFFER_CAPACITY: usize = 1024;

/// Writes complete frames back-to-back to any `Write` sink.
pub struct FrameWriter<T> {
    inner: T,
    buf: BytesMut,
    config: FrameConfig,
    written: usize,
}

impl<T: Write> FrameWriter<T> {
    /// Create a new frame writer with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new frame writer with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
            written: 0,
        }
    }

    /// Write a complete frame. Returns its wire size.
    pub fn write_frame(&mut self, frame: &Frame) -> Result<usize> {
        let size = frame.payload().len();
        if size > self.config.max_payload_size {
            return Err(FrameError::PayloadTooLarge {
                size,
                max: self.config.max_payload_size,
            });
        }

        self.buf.clear();
        encode_frame(frame, &mut self.buf)?;

        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(FrameError::Io(ErrorKind::WriteZero.into())),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }

        self.written += self.buf.len();
        tracing::debug!(
            channel = %(frame.channel() as char),
            payload = size,
            wire = self.buf.len(),
            "wrote frame"
        );
        Ok(self.buf.len())
    }

    /// Total bytes written so far.
    pub fn bytes_written(&self) -> usize {
        self.written
    }

    /// Borrow the underlying sink.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Consume the writer and return the inner sink.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current frame writer configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}
