//! Circular bit rotation.
//!
//! `count` is masked into `[0, width)` before shifting. A masked count of
//! zero returns the value unchanged instead of shifting by the full width.

/// Rotate the bits of a fixed-width integer.
pub trait Rotate: Copy {
    /// Rotate left by `count` bits.
    #[must_use]
    fn rotl(self, count: u32) -> Self;

    /// Rotate right by `count` bits.
    #[must_use]
    fn rotr(self, count: u32) -> Self;
}

macro_rules! impl_rotate_unsigned {
    ($($ty:ty),*) => {$(
        impl Rotate for $ty {
            #[inline]
            fn rotl(self, count: u32) -> Self {
                let count = count & (<$ty>::BITS - 1);
                if count == 0 {
                    return self;
                }
                (self << count) | (self >> (<$ty>::BITS - count))
            }

            #[inline]
            fn rotr(self, count: u32) -> Self {
                let count = count & (<$ty>::BITS - 1);
                if count == 0 {
                    return self;
                }
                (self >> count) | (self << (<$ty>::BITS - count))
            }
        }
    )*};
}

macro_rules! impl_rotate_signed {
    ($($ty:ty => $unsigned:ty),*) => {$(
        impl Rotate for $ty {
            #[inline]
            fn rotl(self, count: u32) -> Self {
                (self as $unsigned).rotl(count) as $ty
            }

            #[inline]
            fn rotr(self, count: u32) -> Self {
                (self as $unsigned).rotr(count) as $ty
            }
        }
    )*};
}

impl_rotate_unsigned!(u8, u16, u32, u64);
impl_rotate_signed!(i8 => u8, i16 => u16, i32 => u32, i64 => u64);
