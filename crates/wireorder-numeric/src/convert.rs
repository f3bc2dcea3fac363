//! One-off conversions between the host order and a fixed wire order.
//!
//! For repeated conversions keep a [`WireOrder`] around instead; these
//! helpers are for call sites that handle a single field.

use crate::order::{ByteOrder, WireOrder};
use crate::swap::Swap;

const BIG: WireOrder = WireOrder::new(ByteOrder::Big);
const LITTLE: WireOrder = WireOrder::new(ByteOrder::Little);

/// Interpret a value read as big-endian in host order.
#[inline]
pub fn big_to_native<T: Swap>(value: T) -> T {
    BIG.apply(value)
}

/// Interpret a value read as little-endian in host order.
#[inline]
pub fn little_to_native<T: Swap>(value: T) -> T {
    LITTLE.apply(value)
}

/// Prepare a host value for writing as big-endian.
#[inline]
pub fn native_to_big<T: Swap>(value: T) -> T {
    BIG.apply(value)
}

/// Prepare a host value for writing as little-endian.
#[inline]
pub fn native_to_little<T: Swap>(value: T) -> T {
    LITTLE.apply(value)
}
