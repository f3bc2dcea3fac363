//! Text encodings for string payloads.
//!
//! Every encoding is strict: text that cannot be represented, or bytes that
//! are not valid in the encoding, produce [`CodecError::Encoding`] rather
//! than replacement characters.

use std::fmt;
use std::io::Read;

use bytes::BufMut;

use crate::error::{CodecError, Result};

/// Text encoding used for string payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TextEncoding {
    #[default]
    Utf8,
    Utf16Le,
    Utf16Be,
    /// ISO-8859-1: every code point below U+0100 maps to one byte.
    Latin1,
    /// 7-bit ASCII.
    Ascii,
}

impl TextEncoding {
    /// Upper bound on the number of bytes one `char` encodes to.
    pub const fn max_bytes_per_char(self) -> usize {
        match self {
            TextEncoding::Utf8 | TextEncoding::Utf16Le | TextEncoding::Utf16Be => 4,
            TextEncoding::Latin1 | TextEncoding::Ascii => 1,
        }
    }

    /// Size of the smallest unit of encoded text.
    pub const fn code_unit_width(self) -> usize {
        match self {
            TextEncoding::Utf16Le | TextEncoding::Utf16Be => 2,
            TextEncoding::Utf8 | TextEncoding::Latin1 | TextEncoding::Ascii => 1,
        }
    }

    /// Append the encoding of `text` to `dst`.
    ///
    /// On error `dst` may hold a partial encoding; callers that stage into a
    /// buffer discard it.
    pub fn encode_into<B: BufMut>(self, text: &str, dst: &mut B) -> Result<()> {
        match self {
            TextEncoding::Utf8 => dst.put_slice(text.as_bytes()),
            TextEncoding::Utf16Le => text.encode_utf16().for_each(|unit| dst.put_u16_le(unit)),
            TextEncoding::Utf16Be => text.encode_utf16().for_each(|unit| dst.put_u16(unit)),
            TextEncoding::Latin1 | TextEncoding::Ascii => {
                for c in text.chars() {
                    dst.put_u8(self.single_byte(c)?);
                }
            }
        }
        Ok(())
    }

    pub fn encode(self, text: &str) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(text.len());
        self.encode_into(text, &mut out)?;
        Ok(out)
    }

    /// Number of bytes `text` encodes to.
    pub fn encoded_len(self, text: &str) -> Result<usize> {
        match self {
            TextEncoding::Utf8 => Ok(text.len()),
            TextEncoding::Utf16Le | TextEncoding::Utf16Be => Ok(text.encode_utf16().count() * 2),
            TextEncoding::Latin1 | TextEncoding::Ascii => {
                let mut len = 0usize;
                for c in text.chars() {
                    self.single_byte(c)?;
                    len += 1;
                }
                Ok(len)
            }
        }
    }

    pub fn decode(self, bytes: &[u8]) -> Result<String> {
        match self {
            TextEncoding::Utf8 => std::str::from_utf8(bytes)
                .map(str::to_owned)
                .map_err(|e| CodecError::encoding(self, e.to_string())),
            TextEncoding::Utf16Le | TextEncoding::Utf16Be => {
                if bytes.len() % 2 != 0 {
                    return Err(CodecError::encoding(
                        self,
                        format!("odd byte length {}", bytes.len()),
                    ));
                }
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| self.code_unit([pair[0], pair[1]]))
                    .collect();
                String::from_utf16(&units).map_err(|e| CodecError::encoding(self, e.to_string()))
            }
            TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            TextEncoding::Ascii => bytes
                .iter()
                .map(|&b| {
                    if b.is_ascii() {
                        Ok(char::from(b))
                    } else {
                        Err(CodecError::encoding(
                            self,
                            format!("byte 0x{b:02X} is not ASCII"),
                        ))
                    }
                })
                .collect(),
        }
    }

    /// Read exactly one character from `src`.
    ///
    /// Consumes only the bytes that make up the character. In UTF-16 a high
    /// surrogate is always read together with the following unit; if that
    /// unit is not a low surrogate both are consumed and the error reason
    /// names both values.
    pub fn read_char<R: Read + ?Sized>(self, src: &mut R) -> Result<char> {
        match self {
            TextEncoding::Utf8 => {
                let mut buf = [0u8; 4];
                src.read_exact(&mut buf[..1])?;
                let len = match buf[0] {
                    0x00..=0x7F => 1,
                    0xC2..=0xDF => 2,
                    0xE0..=0xEF => 3,
                    0xF0..=0xF4 => 4,
                    lead => {
                        return Err(CodecError::encoding(
                            self,
                            format!("invalid lead byte 0x{lead:02X}"),
                        ))
                    }
                };
                src.read_exact(&mut buf[1..len])?;
                std::str::from_utf8(&buf[..len])
                    .map_err(|e| CodecError::encoding(self, e.to_string()))?
                    .chars()
                    .next()
                    .ok_or_else(|| CodecError::encoding(self, "empty character"))
            }
            TextEncoding::Utf16Le | TextEncoding::Utf16Be => {
                let first = self.read_unit(src)?;
                if !(0xD800..=0xDBFF).contains(&first) {
                    return char::from_u32(u32::from(first)).ok_or_else(|| {
                        CodecError::encoding(self, format!("unpaired surrogate 0x{first:04X}"))
                    });
                }
                let second = self.read_unit(src)?;
                if !(0xDC00..=0xDFFF).contains(&second) {
                    return Err(CodecError::encoding(
                        self,
                        format!("high surrogate 0x{first:04X} followed by 0x{second:04X}"),
                    ));
                }
                let scalar =
                    0x1_0000 + ((u32::from(first) - 0xD800) << 10) + (u32::from(second) - 0xDC00);
                char::from_u32(scalar).ok_or_else(|| {
                    CodecError::encoding(self, format!("invalid scalar 0x{scalar:X}"))
                })
            }
            TextEncoding::Latin1 | TextEncoding::Ascii => {
                let mut byte = [0u8; 1];
                src.read_exact(&mut byte)?;
                if self == TextEncoding::Ascii && !byte[0].is_ascii() {
                    return Err(CodecError::encoding(
                        self,
                        format!("byte 0x{:02X} is not ASCII", byte[0]),
                    ));
                }
                Ok(char::from(byte[0]))
            }
        }
    }

    fn read_unit<R: Read + ?Sized>(self, src: &mut R) -> Result<u16> {
        let mut pair = [0u8; 2];
        src.read_exact(&mut pair)?;
        Ok(self.code_unit(pair))
    }

    fn code_unit(self, pair: [u8; 2]) -> u16 {
        match self {
            TextEncoding::Utf16Be => u16::from_be_bytes(pair),
            _ => u16::from_le_bytes(pair),
        }
    }

    fn single_byte(self, c: char) -> Result<u8> {
        let limit = match self {
            TextEncoding::Ascii => 0x7F,
            _ => 0xFF,
        };
        if u32::from(c) <= limit {
            Ok(u32::from(c) as u8)
        } else {
            Err(CodecError::encoding(
                self,
                format!("character {c:?} is not representable"),
            ))
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextEncoding::Utf8 => f.write_str("utf-8"),
            TextEncoding::Utf16Le => f.write_str("utf-16le"),
            TextEncoding::Utf16Be => f.write_str("utf-16be"),
            TextEncoding::Latin1 => f.write_str("latin-1"),
            TextEncoding::Ascii => f.write_str("ascii"),
        }
    }
}
