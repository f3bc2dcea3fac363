//! Byte-order model and fixed-width numeric helpers.
//!
//! This is the lowest layer of wireorder. It knows nothing about streams:
//! - [`ByteOrder`] / [`WireOrder`] decide whether a value must be swapped
//! - [`Swap`] reverses the byte sequence of 8/16/32/64-bit values
//! - [`Rotate`] performs circular bit rotation
//!
//! The stream adapters in `wireorder-io` build on the cached swap decision
//! carried by [`WireOrder`].

pub mod convert;
pub mod order;
pub mod rotate;
pub mod swap;

pub use convert::{big_to_native, little_to_native, native_to_big, native_to_little};
pub use order::{swap_required, ByteOrder, WireOrder};
pub use rotate::Rotate;
pub use swap::Swap;
