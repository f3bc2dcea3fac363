//! Byte-order-aware binary codecs.
//!
//! wireorder reads and writes fixed-width numbers in a declared byte order
//! over any `std::io` stream, and frames strings with length prefixes,
//! fixed widths or terminators.
//!
//! # Crate Structure
//!
//! - [`numeric`]: byte-order model, byte swap and bit rotate primitives
//! - [`io`]: `EndianReader` / `EndianWriter` and string framing
//!
//! ```
//! use std::io::Cursor;
//! use wireorder::{ByteOrder, EndianReader, EndianWriter, TextEncoding};
//!
//! let mut writer = EndianWriter::with_order(Vec::new(), ByteOrder::Big, TextEncoding::Utf8);
//! writer.write_u32(0xCAFE_BABE).unwrap();
//! writer.write_wstring("hello").unwrap();
//! let bytes = writer.into_inner();
//! assert_eq!(&bytes[..4], &[0xCA, 0xFE, 0xBA, 0xBE]);
//!
//! let mut reader =
//!     EndianReader::with_order(Cursor::new(bytes), ByteOrder::Big, TextEncoding::Utf8);
//! assert_eq!(reader.read_u32().unwrap(), 0xCAFE_BABE);
//! assert_eq!(reader.read_wstring().unwrap(), "hello");
//! ```

/// Re-export numeric types.
pub mod numeric {
    pub use wireorder_numeric::*;
}

/// Re-export reader/writer types.
pub mod io {
    pub use wireorder_io::*;
}

pub use wireorder_io::{
    CodecConfig, CodecError, EndianReader, EndianWriter, PrefixKind, Result, TextEncoding,
};
pub use wireorder_numeric::{ByteOrder, Rotate, Swap, WireOrder};
