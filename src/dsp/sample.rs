//! Sample precision abstraction.
//!
//! Hosts hand us either 32-bit or 64-bit floating point buffers. The crusher
//! math is written once against [`Sample`] and monomorphized for both widths,
//! so the two paths can never drift apart.

use num_traits::Float;

/// A floating point sample type the processor can run on.
///
/// Implemented for `f32` and `f64` only.
pub trait Sample: Float + Copy + Send + Sync + 'static {
    fn from_f32(value: f32) -> Self;
    fn from_f64(value: f64) -> Self;
}

impl Sample for f32 {
    #[inline]
    fn from_f32(value: f32) -> Self {
        value
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

impl Sample for f64 {
    #[inline]
    fn from_f32(value: f32) -> Self {
        value as f64
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }
}
