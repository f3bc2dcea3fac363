//! Byte-order-aware reader and writer adapters with string framing.
//!
//! [`EndianReader`] and [`EndianWriter`] wrap any `Read` / `Write` stream and
//! convert multi-byte scalars between a declared wire order and the host
//! order. On top of the scalars they provide four string conventions:
//! - length-prefixed (8/16/32/64-bit prefix, optionally NUL terminated)
//! - fixed width, zero padded
//! - terminated by a delimiter character
//! - NUL terminated
//!
//! Adapters are single-threaded and not reentrant; give each thread its own.

pub mod codec;
pub mod encoding;
pub mod error;
pub mod prefix;
pub mod reader;
pub mod writer;

pub use codec::{strip_trailing_zeros, CodecConfig, DEFAULT_MAX_STRING_BYTES};
pub use encoding::TextEncoding;
pub use error::{CodecError, Result};
pub use prefix::PrefixKind;
pub use reader::EndianReader;
pub use writer::EndianWriter;
pub use wireorder_numeric::{ByteOrder, WireOrder};
