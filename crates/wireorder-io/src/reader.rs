use std::io::Read;

use bytes::{Bytes, BytesMut};
use tracing::{debug, trace};
use wireorder_numeric::{ByteOrder, WireOrder};

use crate::codec::{strip_trailing_zeros, CodecConfig};
use crate::encoding::TextEncoding;
use crate::error::{CodecError, Result};
use crate::prefix::PrefixKind;

/// Reads byte-order-aware scalars and framed strings from any `Read` stream.
///
/// Multi-byte values are read in host order and swapped when the configured
/// wire order differs from the host.
pub struct EndianReader<T> {
    inner: T,
    order: WireOrder,
    config: CodecConfig,
}

macro_rules! read_scalar {
    ($($(#[$doc:meta])* $name:ident => $ty:ty),* $(,)?) => {$(
        $(#[$doc])*
        pub fn $name(&mut self) -> Result<$ty> {
            let mut raw = [0u8; std::mem::size_of::<$ty>()];
            self.inner.read_exact(&mut raw)?;
            Ok(self.order.apply(<$ty>::from_ne_bytes(raw)))
        }
    )*};
}

impl<T: Read> EndianReader<T> {
    /// Create a reader using the host byte order and UTF-8.
    pub fn new(inner: T) -> Self {
        Self::from_parts(inner, CodecConfig::default())
    }

    /// Create a reader for an explicit byte order and text encoding.
    pub fn with_order(inner: T, byte_order: ByteOrder, encoding: TextEncoding) -> Self {
        Self::from_parts(inner, CodecConfig::new(byte_order, encoding))
    }

    /// Create a reader with explicit configuration.
    ///
    /// Fails without constructing anything if the configuration is invalid.
    pub fn with_config(inner: T, config: CodecConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(inner, config))
    }

    fn from_parts(inner: T, mut config: CodecConfig) -> Self {
        let order = WireOrder::new(config.byte_order);
        config.byte_order = order.order();
        debug!(
            byte_order = %order.order(),
            swap = order.swaps(),
            encoding = %config.encoding,
            "endian reader created"
        );
        Self {
            inner,
            order,
            config,
        }
    }

    read_scalar! {
        /// Read a signed 16-bit integer.
        read_i16 => i16,
        /// Read an unsigned 16-bit integer.
        read_u16 => u16,
        /// Read a signed 32-bit integer.
        read_i32 => i32,
        /// Read an unsigned 32-bit integer.
        read_u32 => u32,
        /// Read a signed 64-bit integer.
        read_i64 => i64,
        /// Read an unsigned 64-bit integer.
        read_u64 => u64,
        /// Read an IEEE 754 single-precision float.
        read_f32 => f32,
        /// Read an IEEE 754 double-precision float.
        read_f64 => f64,
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let mut raw = [0u8; 1];
        self.inner.read_exact(&mut raw)?;
        Ok(raw[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        self.read_u8().map(|b| b as i8)
    }

    /// Read exactly `len` raw bytes.
    ///
    /// `len` is bounded by `max_string_bytes` before anything is allocated.
    pub fn read_bytes(&mut self, len: usize) -> Result<Bytes> {
        let len = self.checked_len(len as u64)?;
        let mut buf = BytesMut::zeroed(len);
        self.inner.read_exact(&mut buf)?;
        Ok(buf.freeze())
    }

    /// Read one character using the configured text encoding.
    pub fn read_char(&mut self) -> Result<char> {
        self.config.encoding.read_char(&mut self.inner)
    }

    /// Read a string preceded by a length field of `prefix` width.
    ///
    /// The length counts encoded bytes. With `null_terminated`, trailing
    /// zero code units are stripped before decoding.
    pub fn read_prefixed_string(
        &mut self,
        prefix: PrefixKind,
        null_terminated: bool,
    ) -> Result<String> {
        let len = match prefix {
            PrefixKind::Byte => u64::from(self.read_u8()?),
            PrefixKind::UInt16 => u64::from(self.read_u16()?),
            PrefixKind::UInt32 => u64::from(self.read_u32()?),
            PrefixKind::UInt64 => self.read_u64()?,
        };
        trace!(%prefix, len, null_terminated, "reading prefixed string");

        let len = self.checked_len(len)?;
        let data = self.read_bytes(len)?;
        self.decode_payload(&data, null_terminated)
    }

    /// Read a string with an 8-bit length prefix.
    pub fn read_bstring(&mut self) -> Result<String> {
        self.read_prefixed_string(PrefixKind::Byte, false)
    }

    /// Read a zero-padded string with an 8-bit length prefix.
    pub fn read_bzstring(&mut self) -> Result<String> {
        self.read_prefixed_string(PrefixKind::Byte, true)
    }

    /// Read a string with a 16-bit length prefix.
    pub fn read_wstring(&mut self) -> Result<String> {
        self.read_prefixed_string(PrefixKind::UInt16, false)
    }

    /// Read a zero-padded string with a 16-bit length prefix.
    pub fn read_wzstring(&mut self) -> Result<String> {
        self.read_prefixed_string(PrefixKind::UInt16, true)
    }

    /// Read a string stored in exactly `length` bytes, zero padded.
    ///
    /// `length` must be at least 1 and no more than `max_string_bytes`.
    pub fn read_fixed_string(&mut self, length: usize) -> Result<String> {
        if length < 1 {
            return Err(CodecError::InvalidLength { length });
        }
        let data = self.read_bytes(length)?;
        self.decode_payload(&data, true)
    }

    /// Read characters up to `terminator`.
    ///
    /// The terminator is consumed but not returned. The read is unbounded:
    /// a stream without the terminator fails with `EndOfStream`.
    pub fn read_terminated_string(&mut self, terminator: char) -> Result<String> {
        let mut out = String::new();
        loop {
            let c = self.read_char()?;
            if c == terminator {
                return Ok(out);
            }
            out.push(c);
        }
    }

    /// Read a NUL-terminated string.
    pub fn read_zstring(&mut self) -> Result<String> {
        self.read_terminated_string('\0')
    }

    fn checked_len(&self, len: u64) -> Result<usize> {
        match usize::try_from(len) {
            Ok(n) if n <= self.config.max_string_bytes => Ok(n),
            _ => Err(CodecError::StringTooLarge {
                size: len,
                max: self.config.max_string_bytes,
            }),
        }
    }

    fn decode_payload(&self, data: &[u8], strip: bool) -> Result<String> {
        let encoding = self.config.encoding;
        let data = if strip {
            strip_trailing_zeros(data, encoding.code_unit_width())
        } else {
            data
        };
        encoding.decode(data)
    }

    /// The resolved wire byte order (never `Native`).
    pub fn byte_order(&self) -> ByteOrder {
        self.order.order()
    }

    /// Change the wire byte order for subsequent reads.
    pub fn set_byte_order(&mut self, byte_order: ByteOrder) {
        self.set_wire_order(WireOrder::new(byte_order));
    }

    pub(crate) fn set_wire_order(&mut self, order: WireOrder) {
        debug!(byte_order = %order.order(), swap = order.swaps(), "reader byte order changed");
        self.config.byte_order = order.order();
        self.order = order;
    }

    pub fn wire_order(&self) -> WireOrder {
        self.order
    }

    pub fn encoding(&self) -> TextEncoding {
        self.config.encoding
    }

    /// Current reader configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Release the reader.
    ///
    /// Returns the stream when `leave_open` is set; otherwise it is dropped
    /// here.
    pub fn close(self) -> Option<T> {
        debug!(leave_open = self.config.leave_open, "endian reader closed");
        if self.config.leave_open {
            Some(self.inner)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, ErrorKind};

    use super::*;

    fn reader(bytes: &[u8], order: ByteOrder) -> EndianReader<Cursor<Vec<u8>>> {
        EndianReader::with_order(Cursor::new(bytes.to_vec()), order, TextEncoding::Utf8)
    }

    #[test]
    fn reads_big_endian_scalars() {
        let mut r = reader(&[0x12, 0x34, 0x12, 0x34, 0x56, 0x78], ByteOrder::Big);
        assert_eq!(r.read_u16().unwrap(), 0x1234);
        assert_eq!(r.read_u32().unwrap(), 0x1234_5678);
    }

    #[test]
    fn reads_little_endian_scalars() {
        let mut r = reader(
            &[0x34, 0x12, 0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01],
            ByteOrder::Little,
        );
        assert_eq!(r.read_i16().unwrap(), 0x1234);
        assert_eq!(r.read_u64().unwrap(), 0x0102_0304_0506_0708);
    }

    #[test]
    fn reads_negative_and_float_values() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&(-2i32).to_be_bytes());
        bytes.extend_from_slice(&(-9_000_000_000i64).to_be_bytes());
        bytes.extend_from_slice(&1.5f32.to_be_bytes());
        bytes.extend_from_slice(&(-0.25f64).to_be_bytes());

        let mut r = reader(&bytes, ByteOrder::Big);
        assert_eq!(r.read_i32().unwrap(), -2);
        assert_eq!(r.read_i64().unwrap(), -9_000_000_000);
        assert_eq!(r.read_f32().unwrap(), 1.5);
        assert_eq!(r.read_f64().unwrap(), -0.25);
    }

    #[test]
    fn native_order_reads_host_bytes() {
        let mut r = reader(&0xCAFEu16.to_ne_bytes(), ByteOrder::Native);
        assert_eq!(r.byte_order(), ByteOrder::host());
        assert_eq!(r.read_u16().unwrap(), 0xCAFE);
    }

    #[test]
    fn single_bytes_are_never_swapped() {
        let mut r = reader(&[0xFF, 0x7F], ByteOrder::Big);
        assert_eq!(r.read_i8().unwrap(), -1);
        assert_eq!(r.read_u8().unwrap(), 0x7F);
    }

    #[test]
    fn short_read_is_end_of_stream() {
        let mut r = reader(&[0x01, 0x02, 0x03], ByteOrder::Big);
        let err = r.read_u32().unwrap_err();
        assert!(err.is_end_of_stream());
    }

    #[test]
    fn set_byte_order_applies_to_next_read() {
        let mut r = reader(&[0x00, 0x01, 0x00, 0x01], ByteOrder::Big);
        assert_eq!(r.read_u16().unwrap(), 1);
        r.set_byte_order(ByteOrder::Little);
        assert_eq!(r.byte_order(), ByteOrder::Little);
        assert_eq!(r.read_u16().unwrap(), 0x0100);
    }

    #[test]
    fn byte_prefixed_string() {
        let mut r = reader(b"\x05hello", ByteOrder::Big);
        assert_eq!(r.read_bstring().unwrap(), "hello");
    }

    #[test]
    fn word_prefix_honours_byte_order() {
        let mut r = reader(b"\x00\x02hi", ByteOrder::Big);
        assert_eq!(r.read_wstring().unwrap(), "hi");

        let mut r = reader(b"\x02\x00hi", ByteOrder::Little);
        assert_eq!(r.read_wstring().unwrap(), "hi");
    }

    #[test]
    fn u32_and_u64_prefixes() {
        let mut r = reader(b"\x00\x00\x00\x03abc", ByteOrder::Big);
        assert_eq!(
            r.read_prefixed_string(PrefixKind::UInt32, false).unwrap(),
            "abc"
        );

        let mut r = reader(b"\x01\x00\x00\x00\x00\x00\x00\x00z", ByteOrder::Little);
        assert_eq!(
            r.read_prefixed_string(PrefixKind::UInt64, false).unwrap(),
            "z"
        );
    }

    #[test]
    fn zero_length_prefix_reads_empty_string() {
        let mut r = reader(b"\x00rest", ByteOrder::Big);
        assert_eq!(r.read_bstring().unwrap(), "");
        assert_eq!(r.get_ref().position(), 1);
    }

    #[test]
    fn null_terminated_prefix_strips_padding() {
        let mut r = reader(b"\x08AB\0\0\0\0\0\0", ByteOrder::Big);
        assert_eq!(r.read_bzstring().unwrap(), "AB");
        assert_eq!(r.get_ref().position(), 9);
    }

    #[test]
    fn null_terminated_prefix_all_zero_payload() {
        let mut r = reader(b"\x00\x04\0\0\0\0", ByteOrder::Big);
        assert_eq!(r.read_wzstring().unwrap(), "");
    }

    #[test]
    fn non_terminated_prefix_keeps_zero_bytes() {
        let mut r = reader(b"\x03AB\0", ByteOrder::Big);
        assert_eq!(r.read_bstring().unwrap(), "AB\0");
    }

    #[test]
    fn truncated_payload_is_end_of_stream() {
        let mut r = reader(b"\x0Ashort", ByteOrder::Big);
        assert!(r.read_bstring().unwrap_err().is_end_of_stream());
    }

    #[test]
    fn oversized_prefix_rejected_before_allocation() {
        let cfg = CodecConfig {
            byte_order: ByteOrder::Big,
            max_string_bytes: 16,
            ..CodecConfig::default()
        };
        let mut r =
            EndianReader::with_config(Cursor::new(b"\x00\x00\x04\x00".to_vec()), cfg).unwrap();
        let err = r.read_prefixed_string(PrefixKind::UInt32, false).unwrap_err();
        assert!(matches!(
            err,
            CodecError::StringTooLarge { size: 1024, max: 16 }
        ));
    }

    #[test]
    fn huge_u64_prefix_is_rejected() {
        let mut r = reader(&[0xFF; 8], ByteOrder::Big);
        let err = r.read_prefixed_string(PrefixKind::UInt64, false).unwrap_err();
        assert!(matches!(err, CodecError::StringTooLarge { size: u64::MAX, .. }));
    }

    #[test]
    fn invalid_config_fails_construction() {
        let cfg = CodecConfig {
            max_string_bytes: 0,
            ..CodecConfig::default()
        };
        let result = EndianReader::with_config(Cursor::new(Vec::new()), cfg);
        assert!(matches!(result, Err(CodecError::Config(_))));
    }

    #[test]
    fn fixed_string_strips_padding() {
        let mut r = reader(b"HELLO\0\0\0", ByteOrder::Big);
        assert_eq!(r.read_fixed_string(8).unwrap(), "HELLO");
    }

    #[test]
    fn fixed_string_all_zero() {
        let mut r = reader(&[0u8; 4], ByteOrder::Big);
        assert_eq!(r.read_fixed_string(4).unwrap(), "");
    }

    #[test]
    fn fixed_string_zero_length_is_range_error() {
        let mut r = reader(b"abc", ByteOrder::Big);
        let err = r.read_fixed_string(0).unwrap_err();
        assert!(matches!(err, CodecError::InvalidLength { length: 0 }));
        assert_eq!(r.get_ref().position(), 0);
    }

    #[test]
    fn fixed_string_over_limit_is_rejected_before_reading() {
        let cfg = CodecConfig {
            max_string_bytes: 4,
            ..CodecConfig::default()
        };
        let mut r = EndianReader::with_config(Cursor::new(b"HELLO".to_vec()), cfg).unwrap();
        let err = r.read_fixed_string(5).unwrap_err();
        assert!(matches!(err, CodecError::StringTooLarge { size: 5, max: 4 }));
        assert_eq!(r.get_ref().position(), 0);
        assert_eq!(r.read_fixed_string(4).unwrap(), "HELL");
    }

    #[test]
    fn huge_lengths_are_errors_not_allocations() {
        let mut r = reader(b"abc", ByteOrder::Big);
        assert!(matches!(
            r.read_fixed_string(usize::MAX).unwrap_err(),
            CodecError::StringTooLarge { .. }
        ));
        assert!(r.read_bytes(usize::MAX).unwrap_err().is_range());
        assert_eq!(r.read_bytes(3).unwrap().as_ref(), b"abc");
    }

    #[test]
    fn utf16_fixed_string_with_odd_padding() {
        // "AB" in UTF-16LE padded to five bytes
        let mut r = EndianReader::with_order(
            Cursor::new(vec![0x41, 0x00, 0x42, 0x00, 0x00]),
            ByteOrder::Little,
            TextEncoding::Utf16Le,
        );
        assert_eq!(r.read_fixed_string(5).unwrap(), "AB");
    }

    #[test]
    fn zstring_consumes_terminator() {
        let mut r = reader(b"ABC\0DE\0", ByteOrder::Big);
        assert_eq!(r.read_zstring().unwrap(), "ABC");
        assert_eq!(r.read_zstring().unwrap(), "DE");
    }

    #[test]
    fn custom_terminator() {
        let mut r = reader("a;bé;".as_bytes(), ByteOrder::Big);
        assert_eq!(r.read_terminated_string(';').unwrap(), "a");
        assert_eq!(r.read_terminated_string(';').unwrap(), "bé");
    }

    #[test]
    fn unterminated_string_is_end_of_stream() {
        let mut r = reader(b"ABC", ByteOrder::Big);
        assert!(r.read_zstring().unwrap_err().is_end_of_stream());
    }

    #[test]
    fn utf16_zstring() {
        let bytes = TextEncoding::Utf16Le.encode("hé\0").unwrap();
        let mut r = EndianReader::with_order(
            Cursor::new(bytes),
            ByteOrder::Big,
            TextEncoding::Utf16Le,
        );
        assert_eq!(r.read_zstring().unwrap(), "hé");
    }

    #[test]
    fn utf16_null_terminated_prefix_keeps_high_zero_bytes() {
        // "A\0" in UTF-16LE is 41 00 00 00
        let mut r = EndianReader::with_order(
            Cursor::new(b"\x04\x41\x00\x00\x00".to_vec()),
            ByteOrder::Little,
            TextEncoding::Utf16Le,
        );
        assert_eq!(r.read_bzstring().unwrap(), "A");
    }

    #[test]
    fn invalid_utf8_payload_is_encoding_error() {
        let mut r = reader(b"\x02\xC3\x28", ByteOrder::Big);
        assert!(matches!(
            r.read_bstring().unwrap_err(),
            CodecError::Encoding { .. }
        ));
    }

    #[test]
    fn io_errors_propagate() {
        let mut r = EndianReader::new(FailingReader);
        let err = r.read_u32().unwrap_err();
        assert!(matches!(err, CodecError::Io(e) if e.kind() == ErrorKind::PermissionDenied));
    }

    #[test]
    fn byte_by_byte_stream() {
        let inner = ByteByByteReader {
            bytes: b"\x00\x03abc".to_vec(),
            pos: 0,
        };
        let mut r = EndianReader::with_order(inner, ByteOrder::Big, TextEncoding::Utf8);
        assert_eq!(r.read_wstring().unwrap(), "abc");
    }

    #[test]
    fn close_respects_leave_open() {
        let cfg = CodecConfig {
            leave_open: true,
            ..CodecConfig::default()
        };
        let r = EndianReader::with_config(Cursor::new(vec![1, 2]), cfg).unwrap();
        let inner = r.close().unwrap();
        assert_eq!(inner.into_inner(), vec![1, 2]);

        let r = EndianReader::new(Cursor::new(vec![1, 2]));
        assert!(r.close().is_none());
    }

    #[test]
    fn borrowed_stream_outlives_reader() {
        let mut cursor = Cursor::new(vec![0x00, 0x2A, 0xFF]);
        {
            let mut r = EndianReader::with_order(&mut cursor, ByteOrder::Big, TextEncoding::Utf8);
            assert_eq!(r.read_u16().unwrap(), 42);
        }
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn accessors_and_into_inner() {
        let mut r = EndianReader::new(Cursor::new(vec![1u8, 2, 3]));
        assert_eq!(r.get_ref().get_ref(), &[1, 2, 3]);
        r.get_mut().set_position(2);
        assert_eq!(r.read_u8().unwrap(), 3);
        assert_eq!(r.get_ref().position(), 3);
        assert_eq!(r.encoding(), TextEncoding::Utf8);
        assert_eq!(r.config().max_string_bytes, crate::DEFAULT_MAX_STRING_BYTES);
        let inner = r.into_inner();
        assert_eq!(inner.position(), 3);
        assert_eq!(inner.into_inner(), vec![1, 2, 3]);
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(ErrorKind::PermissionDenied))
        }
    }

    struct ByteByByteReader {
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for ByteByByteReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.pos >= self.bytes.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.bytes[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }
}
