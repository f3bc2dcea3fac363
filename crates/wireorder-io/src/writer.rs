use std::io::Write;

use bytes::{BufMut, BytesMut};
use tracing::{debug, trace};
use wireorder_numeric::{ByteOrder, WireOrder};

use crate::codec::CodecConfig;
use crate::encoding::TextEncoding;
use crate::error::{CodecError, Result};
use crate::prefix::PrefixKind;

const INITIAL_BUFFER_CAPACITY: usize = 256;

/// Writes byte-order-aware scalars and framed strings to any `Write` stream.
///
/// Strings are staged in an internal buffer and written with a single
/// `write_all`, so a rejected string leaves the stream untouched.
pub struct EndianWriter<T> {
    inner: T,
    buf: BytesMut,
    order: WireOrder,
    config: CodecConfig,
}

macro_rules! write_scalar {
    ($($(#[$doc:meta])* $name:ident => $ty:ty),* $(,)?) => {$(
        $(#[$doc])*
        pub fn $name(&mut self, value: $ty) -> Result<()> {
            let raw = self.order.apply(value).to_ne_bytes();
            self.inner.write_all(&raw)?;
            Ok(())
        }
    )*};
}

impl<T: Write> EndianWriter<T> {
    /// Create a writer using the host byte order and UTF-8.
    pub fn new(inner: T) -> Self {
        Self::from_parts(inner, CodecConfig::default())
    }

    /// Create a writer for an explicit byte order and text encoding.
    pub fn with_order(inner: T, byte_order: ByteOrder, encoding: TextEncoding) -> Self {
        Self::from_parts(inner, CodecConfig::new(byte_order, encoding))
    }

    /// Create a writer with explicit configuration.
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
            "endian writer created"
        );
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            order,
            config,
        }
    }

    write_scalar! {
        /// Write a signed 16-bit integer.
        write_i16 => i16,
        /// Write an unsigned 16-bit integer.
        write_u16 => u16,
        /// Write a signed 32-bit integer.
        write_i32 => i32,
        /// Write an unsigned 32-bit integer.
        write_u32 => u32,
        /// Write a signed 64-bit integer.
        write_i64 => i64,
        /// Write an unsigned 64-bit integer.
        write_u64 => u64,
        /// Write an IEEE 754 single-precision float.
        write_f32 => f32,
        /// Write an IEEE 754 double-precision float.
        write_f64 => f64,
    }

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.inner.write_all(&[value])?;
        Ok(())
    }

    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        self.write_u8(value as u8)
    }

    /// Write raw bytes without any framing.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner.write_all(bytes)?;
        Ok(())
    }

    /// Write one character using the configured text encoding.
    pub fn write_char(&mut self, c: char) -> Result<()> {
        let mut utf8 = [0u8; 4];
        self.write_encoded(c.encode_utf8(&mut utf8))
    }

    /// Write `value` preceded by a length field of `prefix` width.
    ///
    /// With `null_terminated` a NUL character is appended before measuring.
    /// The length counts encoded bytes and must fit both the prefix width
    /// and `max_string_bytes`; otherwise nothing is written.
    pub fn write_prefixed_string(
        &mut self,
        value: &str,
        prefix: PrefixKind,
        null_terminated: bool,
    ) -> Result<()> {
        let encoding = self.config.encoding;
        let width = prefix.width();

        let mut encoded = encoding.encoded_len(value)?;
        if null_terminated {
            encoded += encoding.code_unit_width();
        }
        let len = encoded as u64;
        if !prefix.fits(len) {
            return Err(CodecError::PrefixOverflow {
                prefix,
                len,
                max: prefix.max_len(),
            });
        }
        self.check_string_size(encoded)?;
        trace!(%prefix, len, null_terminated, "writing prefixed string");

        self.buf.clear();
        self.buf.reserve(width + encoded);
        self.buf.put_bytes(0, width);
        encoding.encode_into(value, &mut self.buf)?;
        if null_terminated {
            encoding.encode_into("\0", &mut self.buf)?;
        }

        // Lengths are validated above, so the narrowing casts are exact.
        let order = self.order;
        let header = &mut self.buf[..width];
        match prefix {
            PrefixKind::Byte => header.copy_from_slice(&[len as u8]),
            PrefixKind::UInt16 => header.copy_from_slice(&order.apply(len as u16).to_ne_bytes()),
            PrefixKind::UInt32 => header.copy_from_slice(&order.apply(len as u32).to_ne_bytes()),
            PrefixKind::UInt64 => header.copy_from_slice(&order.apply(len).to_ne_bytes()),
        }

        self.flush_staged()
    }

    /// Write `value` with an 8-bit length prefix.
    pub fn write_bstring(&mut self, value: &str) -> Result<()> {
        self.write_prefixed_string(value, PrefixKind::Byte, false)
    }

    /// Write `value` plus a NUL with an 8-bit length prefix.
    pub fn write_bzstring(&mut self, value: &str) -> Result<()> {
        self.write_prefixed_string(value, PrefixKind::Byte, true)
    }

    /// Write `value` with a 16-bit length prefix.
    pub fn write_wstring(&mut self, value: &str) -> Result<()> {
        self.write_prefixed_string(value, PrefixKind::UInt16, false)
    }

    /// Write `value` plus a NUL with a 16-bit length prefix.
    pub fn write_wzstring(&mut self, value: &str) -> Result<()> {
        self.write_prefixed_string(value, PrefixKind::UInt16, true)
    }

    /// Write `value` into exactly `length` bytes.
    ///
    /// The encoding is truncated or zero padded to fit. Truncation is lossy
    /// and may split a multi-byte character. `length` is bounded by
    /// `max_string_bytes`.
    pub fn write_fixed_string(&mut self, value: &str, length: usize) -> Result<()> {
        if length < 1 {
            return Err(CodecError::InvalidLength { length });
        }
        self.check_string_size(length)?;

        self.buf.clear();
        self.config.encoding.encode_into(value, &mut self.buf)?;
        if self.buf.len() > length {
            debug!(
                encoded = self.buf.len(),
                length, "truncating string to fixed width"
            );
        }
        self.buf.resize(length, 0);

        self.flush_staged()
    }

    /// Write `value` followed by `terminator`, without a length prefix.
    pub fn write_terminated_string(&mut self, value: &str, terminator: char) -> Result<()> {
        let encoding = self.config.encoding;
        let mut utf8 = [0u8; 4];

        self.buf.clear();
        encoding.encode_into(value, &mut self.buf)?;
        encoding.encode_into(terminator.encode_utf8(&mut utf8), &mut self.buf)?;

        self.flush_staged()
    }

    /// Write `value` followed by a NUL character.
    pub fn write_zstring(&mut self, value: &str) -> Result<()> {
        self.write_terminated_string(value, '\0')
    }

    fn check_string_size(&self, size: usize) -> Result<()> {
        if size > self.config.max_string_bytes {
            return Err(CodecError::StringTooLarge {
                size: size as u64,
                max: self.config.max_string_bytes,
            });
        }
        Ok(())
    }

    fn write_encoded(&mut self, text: &str) -> Result<()> {
        self.buf.clear();
        self.config.encoding.encode_into(text, &mut self.buf)?;
        self.flush_staged()
    }

    fn flush_staged(&mut self) -> Result<()> {
        let result = self.inner.write_all(&self.buf);
        self.buf.clear();
        result.map_err(Into::into)
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    /// The resolved wire byte order (never `Native`).
    pub fn byte_order(&self) -> ByteOrder {
        self.order.order()
    }

    /// Change the wire byte order for subsequent writes.
    pub fn set_byte_order(&mut self, byte_order: ByteOrder) {
        self.set_wire_order(WireOrder::new(byte_order));
    }

    pub(crate) fn set_wire_order(&mut self, order: WireOrder) {
        debug!(byte_order = %order.order(), swap = order.swaps(), "writer byte order changed");
        self.config.byte_order = order.order();
        self.order = order;
    }

    pub fn wire_order(&self) -> WireOrder {
        self.order
    }

    pub fn encoding(&self) -> TextEncoding {
        self.config.encoding
    }

    /// Current writer configuration.
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

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Flush and release the writer.
    ///
    /// Returns the stream when `leave_open` is set; otherwise it is dropped
    /// here.
    pub fn close(mut self) -> Result<Option<T>> {
        self.flush()?;
        debug!(leave_open = self.config.leave_open, "endian writer closed");
        if self.config.leave_open {
            Ok(Some(self.inner))
        } else {
            Ok(None)
        }
    }
}
