use std::io::ErrorKind;

use crate::encoding::TextEncoding;
use crate::prefix::PrefixKind;

/// Errors that can occur while reading or writing endian-aware data.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The adapter configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A fixed string length must be at least one byte.
    #[error("invalid fixed string length {length} (must be at least 1)")]
    InvalidLength { length: usize },

    /// The encoded string does not fit in the chosen length prefix.
    #[error("string of {len} bytes does not fit a {prefix} prefix (max {max})")]
    PrefixOverflow {
        prefix: PrefixKind,
        len: u64,
        max: u64,
    },

    /// The string exceeds the configured maximum size.
    #[error("string too large ({size} bytes, max {max})")]
    StringTooLarge { size: u64, max: usize },

    /// A length prefix width tag that is not 1, 2, 4 or 8.
    #[error("unsupported length prefix width {0}")]
    UnsupportedPrefix(u8),

    /// The stream ended before the requested bytes were available.
    #[error("unexpected end of stream")]
    EndOfStream,

    /// Text could not be converted with the configured encoding.
    #[error("{encoding} text error: {reason}")]
    Encoding {
        encoding: TextEncoding,
        reason: String,
    },

    /// An I/O error occurred on the underlying stream.
    #[error("stream I/O error: {0}")]
    Io(#[source] std::io::Error),
}

impl CodecError {
    pub(crate) fn encoding(encoding: TextEncoding, reason: impl Into<String>) -> Self {
        CodecError::Encoding {
            encoding,
            reason: reason.into(),
        }
    }

    /// True when the stream ran out of data.
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, CodecError::EndOfStream)
    }

    /// True for length and prefix-width violations.
    pub fn is_range(&self) -> bool {
        matches!(
            self,
            CodecError::InvalidLength { .. }
                | CodecError::PrefixOverflow { .. }
                | CodecError::StringTooLarge { .. }
        )
    }
}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == ErrorKind::UnexpectedEof {
            CodecError::EndOfStream
        } else {
            CodecError::Io(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
