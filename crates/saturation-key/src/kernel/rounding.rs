//! Rounding policies for converting normalised values back to integers.

/// Strategy used to round a scaled channel value before clamping.
pub trait Rounding: Send + Sync + 'static {
    fn round(value: f64) -> f64;
}

/// Round half away from zero (`2.5 -> 3`, `-2.5 -> -3`).
///
/// This is the default policy and matches C's `round()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HalfAwayFromZero;

impl Rounding for HalfAwayFromZero {
    #[inline]
    fn round(value: f64) -> f64 {
        value.round()
    }
}

/// Round half to even (`2.5 -> 2`, `3.5 -> 4`).
#[derive(Debug, Clone, Copy, Default)]
pub struct HalfToEven;

impl Rounding for HalfToEven {
    #[inline]
    fn round(value: f64) -> f64 {
        value.round_ties_even()
    }
}
