//! MRP channel labels.
//!
//! A carrier holds exactly three frames, in this order: `R` (message),
//! `G` (metadata) and `B` (integrity sidecar).

use std::fmt;

use crate::error::FrameError;

/// The three logical streams of an MRP carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Base64 of the UTF-8 message.
    R,
    /// Base64 of the JSON metadata.
    G,
    /// JSON integrity sidecar.
    B,
}

impl Channel {
    /// Embedding order.
    pub const ALL: [Channel; 3] = [Channel::R, Channel::G, Channel::B];

    /// The ASCII byte written in the frame header.
    pub fn as_byte(self) -> u8 {
        match self {
            Channel::R => b'R',
            Channel::G => b'G',
            Channel::B => b'B',
        }
    }

    /// Map a header byte back to a channel.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'R' => Some(Channel::R),
            b'G' => Some(Channel::G),
            b'B' => Some(Channel::B),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        self.as_byte() as char
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl TryFrom<&str> for Channel {
    type Error = FrameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.as_bytes() {
            [byte] => {
                Channel::from_byte(*byte).ok_or_else(|| FrameError::InvalidChannel(value.into()))
            }
            _ => Err(FrameError::InvalidChannel(value.into())),
        }
    }
}

/// Returns a human-readable name for a channel header byte.
pub fn channel_name(byte: u8) -> &'static str {
    match Channel::from_byte(byte) {
        Some(Channel::R) => "MESSAGE",
        Some(Channel::G) => "METADATA",
        Some(Channel::B) => "SIDECAR",
        None if byte.is_ascii() => "UNKNOWN",
        None => "INVALID",
    }
}
