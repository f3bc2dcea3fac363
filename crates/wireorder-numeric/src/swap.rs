//! Byte-sequence reversal for fixed-width values.
//!
//! Signed integers and floats reinterpret their bits as the unsigned type of
//! the same width and reuse its routine. No numeric conversion happens on
//! any path, so `x.swap().swap()` reproduces `x` bit-for-bit, NaN payloads
//! included.

/// Reverse the byte order of a fixed-width value.
pub trait Swap: Copy {
    #[must_use]
    fn swap(self) -> Self;
}

impl Swap for u8 {
    #[inline]
    fn swap(self) -> Self {
        self
    }
}

impl Swap for i8 {
    #[inline]
    fn swap(self) -> Self {
        self
    }
}

impl Swap for u16 {
    #[inline]
    fn swap(self) -> Self {
        ((self >> 8) & 0x00FF) | ((self << 8) & 0xFF00)
    }
}

impl Swap for u32 {
    #[inline]
    fn swap(self) -> Self {
        // 16-bit halves, then bytes within each half
        let x = (self >> 16) | (self << 16);
        ((x & 0xFF00_FF00) >> 8) | ((x & 0x00FF_00FF) << 8)
    }
}

impl Swap for u64 {
    #[inline]
    fn swap(self) -> Self {
        let x = (self >> 32) | (self << 32);
        let x = ((x & 0xFFFF_0000_FFFF_0000) >> 16) | ((x & 0x0000_FFFF_0000_FFFF) << 16);
        ((x & 0xFF00_FF00_FF00_FF00) >> 8) | ((x & 0x00FF_00FF_00FF_00FF) << 8)
    }
}

impl Swap for i16 {
    #[inline]
    fn swap(self) -> Self {
        (self as u16).swap() as i16
    }
}

impl Swap for i32 {
    #[inline]
    fn swap(self) -> Self {
        (self as u32).swap() as i32
    }
}

impl Swap for i64 {
    #[inline]
    fn swap(self) -> Self {
        (self as u64).swap() as i64
    }
}

impl Swap for f32 {
    #[inline]
    fn swap(self) -> Self {
        f32::from_bits(self.to_bits().swap())
    }
}

impl Swap for f64 {
    #[inline]
    fn swap(self) -> Self {
        f64::from_bits(self.to_bits().swap())
    }
}
