use wireorder_numeric::ByteOrder;

use crate::encoding::TextEncoding;
use crate::error::{CodecError, Result};

/// Default maximum encoded string size: 16 MiB.
pub const DEFAULT_MAX_STRING_BYTES: usize = 16 * 1024 * 1024;

/// Configuration shared by [`EndianReader`](crate::EndianReader) and
/// [`EndianWriter`](crate::EndianWriter).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CodecConfig {
    /// Declared wire byte order. Default: `Native`.
    pub byte_order: ByteOrder,
    /// Encoding of string payloads. Default: UTF-8.
    pub encoding: TextEncoding,
    /// Hand the stream back from `close()` instead of dropping it.
    pub leave_open: bool,
    /// Largest string payload accepted from a length prefix or produced by
    /// the writer. Default: 16 MiB.
    pub max_string_bytes: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            byte_order: ByteOrder::Native,
            encoding: TextEncoding::Utf8,
            leave_open: false,
            max_string_bytes: DEFAULT_MAX_STRING_BYTES,
        }
    }
}

impl CodecConfig {
    pub fn new(byte_order: ByteOrder, encoding: TextEncoding) -> Self {
        Self {
            byte_order,
            encoding,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_string_bytes == 0 {
            return Err(CodecError::Config(
                "max_string_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Remove trailing zero code units of `unit` bytes each.
///
/// The backward scan stops at the start of the slice, so an all-zero buffer
/// strips to empty. A trailing partial unit is dropped when it is all zero
/// (zero padding to an odd width); otherwise the buffer is returned unchanged.
pub fn strip_trailing_zeros(bytes: &[u8], unit: usize) -> &[u8] {
    let unit = unit.max(1);
    let mut end = bytes.len();
    let partial = end % unit;
    if partial != 0 {
        if bytes[end - partial..].iter().any(|&b| b != 0) {
            return bytes;
        }
        end -= partial;
    }
    while end >= unit && bytes[end - unit..end].iter().all(|&b| b == 0) {
        end -= unit;
    }
    &bytes[..end]
}
