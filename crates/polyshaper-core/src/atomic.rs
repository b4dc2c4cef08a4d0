//! Lock-free float cells for parameters shared between threads.
//!
//! Values are stored bit-cast in an integer atomic. Writers use `Release`,
//! readers use `Acquire`; a single value can never tear.

use core::sync::atomic::{AtomicU32, AtomicU64, Ordering};

/// An `f32` stored as its bit pattern in an [`AtomicU32`].
///
/// Control thread writes, audio thread reads. No locks, no allocations.
#[derive(Debug)]
pub struct AtomicF32(AtomicU32);

impl AtomicF32 {
    /// Create a new cell holding `value`.
    pub const fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    /// Read the current value.
    #[inline]
    pub fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Acquire))
    }

    /// Replace the current value.
    #[inline]
    pub fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Release);
    }
}

impl Default for AtomicF32 {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// An `f64` stored as its bit pattern in an [`AtomicU64`].
#[derive(Debug)]
pub struct AtomicF64(AtomicU64);

impl AtomicF64 {
    /// Create a new cell holding `value`.
    pub const fn new(value: f64) -> Self {
        Self(AtomicU64::new(value.to_bits()))
    }

    /// Read the current value.
    #[inline]
    pub fn load(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Acquire))
    }

    /// Replace the current value.
    #[inline]
    pub fn store(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Release);
    }
}

impl Default for AtomicF64 {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f32_preserves_bits() {
        let cell = AtomicF32::new(1.5);
        assert_eq!(cell.load(), 1.5);

        cell.store(-0.0);
        assert!(cell.load().is_sign_negative());

        cell.store(f32::NAN);
        assert!(cell.load().is_nan());
    }

    #[test]
    fn test_f64_preserves_bits() {
        let cell = AtomicF64::new(0.1);
        assert_eq!(cell.load(), 0.1);

        cell.store(f64::MIN_POSITIVE);
        assert_eq!(cell.load(), f64::MIN_POSITIVE);
    }
}
