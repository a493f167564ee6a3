//! Per-pixel transforms.
//!
//! A kernel maps one (possibly missing) source pixel to one destination
//! pixel. Kernels are generic over the pixel type, which fixes the memory
//! format they accept, so a kernel for [`Rgba8`] can never be run over a
//! 16-bit or float buffer.
//!
//! # Example
//!
//! ```
//! use saturation_key::kernel::{PixelKernel, Rgba8, SaturationKernel, Threshold};
//!
//! let kernel = SaturationKernel::new(Threshold::new(0.5).unwrap());
//! assert_eq!(kernel.apply(Some(Rgba8::opaque(255, 0, 0))), Rgba8::opaque(255, 0, 0));
//! assert_eq!(kernel.apply(Some(Rgba8::opaque(128, 128, 128))), Rgba8::opaque(0, 0, 0));
//! ```

mod pixel;
mod rounding;
mod saturation;

pub use pixel::{Pixel, Rgba8};
pub use rounding::{HalfAwayFromZero, HalfToEven, Rounding};
pub use saturation::{saturation, SaturationKernel, Threshold};

/// A per-pixel transform shared by all workers of a render.
///
/// Implementations must be pure: the output depends only on the source
/// pixel and the kernel's own immutable state.
pub trait PixelKernel<P: Pixel>: Sync {
    /// Produce the destination pixel for `source`.
    ///
    /// `source` is `None` when the destination pixel has no counterpart in
    /// the source image (the source bounds are smaller than the window).
    fn apply(&self, source: Option<P>) -> P;
}
