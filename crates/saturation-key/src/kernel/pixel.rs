//! Typed pixels read from and written to raw view bytes.

use crate::image::PixelFormat;

/// A pixel type with a fixed in-memory format.
///
/// Kernels operate on decoded pixels; the scheduler converts between view
/// bytes and `Self` with [`read`](Pixel::read) and [`write`](Pixel::write).
/// Both receive exactly `FORMAT.bytes_per_pixel()` bytes.
pub trait Pixel: Copy + Send + Sync + 'static {
    /// Memory format this pixel type reads and writes.
    const FORMAT: PixelFormat;

    /// Value used when a pixel has no source sample.
    const TRANSPARENT: Self;

    fn read(bytes: &[u8]) -> Self;

    fn write(self, bytes: &mut [u8]);
}

/// 8-bit RGBA pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque pixel from its colour channels.
    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Pixel for Rgba8 {
    const FORMAT: PixelFormat = PixelFormat::RGBA8;
    const TRANSPARENT: Self = Rgba8::new(0, 0, 0, 0);

    #[inline]
    fn read(bytes: &[u8]) -> Self {
        Rgba8::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    #[inline]
    fn write(self, bytes: &mut [u8]) {
        bytes[..4].copy_from_slice(&self.to_array());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_write_channel_order() {
        let mut bytes = [0u8; 4];
        Rgba8::new(1, 2, 3, 4).write(&mut bytes);
        assert_eq!(bytes, [1, 2, 3, 4]);
        assert_eq!(Rgba8::read(&[10, 20, 30, 40]), Rgba8::new(10, 20, 30, 40));
    }

    #[test]
    fn test_format_matches_size() {
        assert_eq!(Rgba8::FORMAT.bytes_per_pixel(), std::mem::size_of::<Rgba8>());
    }
}
