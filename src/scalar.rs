//! Floating-point element bound shared by every numeric stage.
//!
//! Filters, spectra and matrices are generic over `T: Real`. The trait is only
//! implemented for `f32` and `f64`, so integer element types are rejected at
//! compile time.
use nalgebra::RealField;
use rustfft::FftNum;

pub trait Real: RealField + FftNum + Copy {
    /// Widen into `f64` (exact for both implementors).
    fn as_f64(self) -> f64;
}

impl Real for f32 {
    #[inline]
    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl Real for f64 {
    #[inline]
    fn as_f64(self) -> f64 {
        self
    }
}

/// Lossless-or-rounding conversion from `f64` into the element type.
#[inline]
pub fn cast<T: Real>(v: f64) -> T {
    nalgebra::convert(v)
}

/// Convert a count into the element type.
#[inline]
pub fn from_usize<T: Real>(n: usize) -> T {
    nalgebra::convert(n as f64)
}

/// Widen an element into `f64`.
#[inline]
pub fn to_f64<T: Real>(v: T) -> f64 {
    v.as_f64()
}
