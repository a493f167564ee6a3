//! The saturation key: black out pixels at or below a saturation threshold.

use std::marker::PhantomData;

use super::pixel::{Pixel, Rgba8};
use super::rounding::{HalfAwayFromZero, Rounding};
use super::PixelKernel;

/// Saturation threshold.
///
/// Pixels whose saturation is less than or equal to the threshold are keyed
/// to black. Any finite value is accepted as given: below 0 nothing is keyed,
/// at 1 or above everything is.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Threshold(f64);

impl Threshold {
    /// Threshold used when no parameter value is supplied.
    pub const DEFAULT: Threshold = Threshold(0.02);

    /// Create a threshold. Returns `None` for NaN and infinities.
    pub fn new(value: f64) -> Option<Self> {
        value.is_finite().then_some(Self(value))
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// HSV-style saturation of normalised channels.
///
/// `(max - min) / max`, defined as 0 when `max` is 0 (black). The result is
/// always in `[0, 1]` for inputs in `[0, 1]`.
#[inline]
pub fn saturation(r: f64, g: f64, b: f64) -> f64 {
    let mx = r.max(g).max(b);
    let mn = r.min(g).min(b);
    if mx == 0.0 {
        0.0
    } else {
        (mx - mn) / mx
    }
}

/// Per-pixel saturation key over 8-bit RGBA.
///
/// For each pixel the colour channels are normalised to `[0, 1]` and the
/// saturation is computed. At or below the threshold, r/g/b become 0;
/// above it, each channel is scaled back by 255, rounded with `R` and
/// clamped to `[0, 255]` (round first, then clamp).
///
/// The output alpha is always the source alpha. A missing source sample is
/// treated as transparent black, which keys to `(0, 0, 0, 0)`.
#[derive(Debug, Clone, Copy)]
pub struct SaturationKernel<R = HalfAwayFromZero> {
    threshold: Threshold,
    rounding: PhantomData<fn() -> R>,
}

impl SaturationKernel {
    /// Kernel using [`HalfAwayFromZero`] rounding.
    pub fn new(threshold: Threshold) -> Self {
        Self::with_rounding(threshold)
    }
}

impl<R: Rounding> SaturationKernel<R> {
    /// Kernel using the rounding policy `R`.
    pub fn with_rounding(threshold: Threshold) -> Self {
        Self {
            threshold,
            rounding: PhantomData,
        }
    }

    #[inline]
    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    #[inline]
    fn quantize(value: f64) -> u8 {
        R::round(value * 255.0).clamp(0.0, 255.0) as u8
    }
}

impl<R: Rounding> PixelKernel<Rgba8> for SaturationKernel<R> {
    #[inline]
    fn apply(&self, source: Option<Rgba8>) -> Rgba8 {
        let src = source.unwrap_or(Rgba8::TRANSPARENT);

        let r = src.r as f64 / 255.0;
        let g = src.g as f64 / 255.0;
        let b = src.b as f64 / 255.0;

        if saturation(r, g, b) <= self.threshold.value() {
            return Rgba8::new(0, 0, 0, src.a);
        }

        Rgba8::new(
            Self::quantize(r),
            Self::quantize(g),
            Self::quantize(b),
            src.a,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::HalfToEven;

    fn key(pixel: Rgba8, threshold: f64) -> Rgba8 {
        SaturationKernel::new(Threshold::new(threshold).unwrap()).apply(Some(pixel))
    }

    #[test]
    fn test_saturation_of_primaries_and_greys() {
        assert_eq!(saturation(1.0, 0.0, 0.0), 1.0);
        assert_eq!(saturation(0.5, 0.5, 0.5), 0.0);
        assert_eq!(saturation(0.0, 0.0, 0.0), 0.0);
        assert!((saturation(1.0, 0.5, 0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_pure_red_passes_through() {
        assert_eq!(key(Rgba8::opaque(255, 0, 0), 0.5), Rgba8::opaque(255, 0, 0));
    }

    #[test]
    fn test_mid_grey_is_keyed_to_black() {
        assert_eq!(key(Rgba8::opaque(128, 128, 128), 0.02), Rgba8::opaque(0, 0, 0));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let pixel = Rgba8::opaque(255, 128, 128);
        let sat = saturation(1.0, 128.0 / 255.0, 128.0 / 255.0);
        assert_eq!(key(pixel, sat), Rgba8::opaque(0, 0, 0));
        assert_eq!(key(pixel, sat - 1e-9), pixel);
    }

    #[test]
    fn test_channels_survive_unchanged_above_threshold() {
        for v in [0u8, 1, 17, 127, 128, 200, 254, 255] {
            let pixel = Rgba8::opaque(255, v, 0);
            assert_eq!(key(pixel, 0.0), pixel, "channel value {v}");
        }
    }

    #[test]
    fn test_alpha_follows_source() {
        assert_eq!(key(Rgba8::new(10, 10, 10, 77), 0.5).a, 77);
        assert_eq!(key(Rgba8::new(255, 0, 0, 33), 0.5), Rgba8::new(255, 0, 0, 33));
    }

    #[test]
    fn test_missing_source_is_transparent_black() {
        let kernel = SaturationKernel::new(Threshold::DEFAULT);
        assert_eq!(kernel.apply(None), Rgba8::new(0, 0, 0, 0));
    }

    #[test]
    fn test_threshold_one_blackens_everything() {
        for pixel in [
            Rgba8::opaque(255, 0, 0),
            Rgba8::opaque(0, 255, 0),
            Rgba8::opaque(3, 200, 90),
            Rgba8::opaque(255, 255, 255),
        ] {
            assert_eq!(key(pixel, 1.0), Rgba8::opaque(0, 0, 0));
        }
    }

    #[test]
    fn test_threshold_zero_only_blackens_achromatic() {
        assert_eq!(key(Rgba8::opaque(255, 255, 255), 0.0), Rgba8::opaque(0, 0, 0));
        assert_eq!(key(Rgba8::opaque(40, 40, 40), 0.0), Rgba8::opaque(0, 0, 0));
        assert_eq!(key(Rgba8::opaque(40, 40, 41), 0.0), Rgba8::opaque(40, 40, 41));
    }

    #[test]
    fn test_threshold_rejects_non_finite() {
        assert!(Threshold::new(f64::NAN).is_none());
        assert!(Threshold::new(f64::INFINITY).is_none());
        assert!(Threshold::new(f64::NEG_INFINITY).is_none());
    }

    #[test]
    fn test_threshold_keeps_out_of_range_values() {
        assert_eq!(Threshold::new(-0.5).unwrap().value(), -0.5);
        assert_eq!(Threshold::new(3.0).unwrap().value(), 3.0);
    }

    #[test]
    fn test_negative_threshold_keys_nothing() {
        let grey = Rgba8::opaque(128, 128, 128);
        assert_eq!(key(grey, -0.5), grey);
        assert_eq!(key(Rgba8::opaque(0, 0, 0), -0.5), Rgba8::opaque(0, 0, 0));
        assert_eq!(key(Rgba8::opaque(255, 255, 255), -1e-9), Rgba8::opaque(255, 255, 255));
    }

    #[test]
    fn test_threshold_above_one_keys_everything() {
        assert_eq!(key(Rgba8::opaque(255, 0, 0), 3.0), Rgba8::opaque(0, 0, 0));
    }

    #[test]
    fn test_rounding_policies_agree_on_integral_channels() {
        let away = SaturationKernel::new(Threshold::DEFAULT);
        let even = SaturationKernel::<HalfToEven>::with_rounding(Threshold::DEFAULT);
        for v in 0..=255u8 {
            let pixel = Rgba8::opaque(255, v, 0);
            assert_eq!(away.apply(Some(pixel)), even.apply(Some(pixel)));
        }
    }
}
