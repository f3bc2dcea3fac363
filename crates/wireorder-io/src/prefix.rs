//! Length prefix widths for prefix-framed strings.

use std::fmt;

use crate::error::CodecError;

/// Width of the length field that precedes string data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PrefixKind {
    /// 8-bit length.
    Byte,
    /// 16-bit length.
    UInt16,
    /// 32-bit length.
    UInt32,
    /// 64-bit length.
    UInt64,
}

impl PrefixKind {
    /// Size of the length field in bytes.
    pub const fn width(self) -> usize {
        match self {
            PrefixKind::Byte => 1,
            PrefixKind::UInt16 => 2,
            PrefixKind::UInt32 => 4,
            PrefixKind::UInt64 => 8,
        }
    }

    /// Largest byte length the field can represent.
    pub const fn max_len(self) -> u64 {
        match self {
            PrefixKind::Byte => u8::MAX as u64,
            PrefixKind::UInt16 => u16::MAX as u64,
            PrefixKind::UInt32 => u32::MAX as u64,
            PrefixKind::UInt64 => u64::MAX,
        }
    }

    pub const fn fits(self, len: u64) -> bool {
        len <= self.max_len()
    }
}

impl TryFrom<u8> for PrefixKind {
    type Error = CodecError;

    /// Decode a prefix from its width in bytes.
    fn try_from(width: u8) -> Result<Self, Self::Error> {
        match width {
            1 => Ok(PrefixKind::Byte),
            2 => Ok(PrefixKind::UInt16),
            4 => Ok(PrefixKind::UInt32),
            8 => Ok(PrefixKind::UInt64),
            other => Err(CodecError::UnsupportedPrefix(other)),
        }
    }
}

impl fmt::Display for PrefixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefixKind::Byte => f.write_str("u8"),
            PrefixKind::UInt16 => f.write_str("u16"),
            PrefixKind::UInt32 => f.write_str("u32"),
            PrefixKind::UInt64 => f.write_str("u64"),
        }
    }
}
