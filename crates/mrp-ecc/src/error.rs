/// Errors that can occur while applying an error-correcting code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EccError {
    /// The scheme name is not one of `parity`, `hamming`, `rs`.
    #[error("unknown ECC scheme {0:?} (expected parity, hamming or rs)")]
    UnknownScheme(String),

    /// Fewer bytes decoded than the caller expects.
    #[error("decoded payload too short ({available} bytes, expected {expected})")]
    Truncated { expected: usize, available: usize },

    /// A Reed-Solomon block is shorter than its parity section.
    #[error("Reed-Solomon block {block} is malformed ({len} bytes, need more than {parity})")]
    MalformedBlock {
        block: usize,
        len: usize,
        parity: usize,
    },

    /// A Reed-Solomon block holds more errors than the code can correct.
    #[error("Reed-Solomon block {block} uncorrectable: {reason}")]
    Uncorrectable { block: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, EccError>;
