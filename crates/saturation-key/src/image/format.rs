//! Pixel format descriptors.

use std::fmt;

/// Storage type of a single channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitDepth {
    /// 8-bit unsigned integer
    U8,
    /// 16-bit unsigned integer
    U16,
    /// 32-bit float
    F32,
}

impl BitDepth {
    /// Bytes used by one channel.
    #[inline]
    pub const fn byte_size(self) -> usize {
        match self {
            BitDepth::U8 => 1,
            BitDepth::U16 => 2,
            BitDepth::F32 => 4,
        }
    }

    /// Bits per channel.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.byte_size() as u32 * 8
    }
}

/// Channel layout of a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Components {
    /// Red, green, blue, alpha
    Rgba,
    /// Red, green, blue
    Rgb,
    /// Single alpha channel
    Alpha,
}

impl Components {
    /// Number of channels.
    #[inline]
    pub const fn channels(self) -> usize {
        match self {
            Components::Rgba => 4,
            Components::Rgb => 3,
            Components::Alpha => 1,
        }
    }
}

/// Pixel format of an image buffer: channel depth and layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelFormat {
    pub depth: BitDepth,
    pub components: Components,
}

impl PixelFormat {
    /// 8 bits per channel, RGBA order.
    pub const RGBA8: Self = Self::new(BitDepth::U8, Components::Rgba);

    pub const fn new(depth: BitDepth, components: Components) -> Self {
        Self { depth, components }
    }

    /// Bytes occupied by one pixel.
    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        self.depth.byte_size() * self.components.channels()
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layout = match self.components {
            Components::Rgba => "RGBA",
            Components::Rgb => "RGB",
            Components::Alpha => "A",
        };
        match self.depth {
            BitDepth::F32 => write!(f, "{layout} float"),
            depth => write!(f, "{layout} {}-bit", depth.bits()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_per_pixel() {
        assert_eq!(PixelFormat::RGBA8.bytes_per_pixel(), 4);
        assert_eq!(
            PixelFormat::new(BitDepth::U16, Components::Rgba).bytes_per_pixel(),
            8
        );
        assert_eq!(
            PixelFormat::new(BitDepth::F32, Components::Alpha).bytes_per_pixel(),
            4
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(PixelFormat::RGBA8.to_string(), "RGBA 8-bit");
        assert_eq!(
            PixelFormat::new(BitDepth::U16, Components::Rgb).to_string(),
            "RGB 16-bit"
        );
        assert_eq!(
            PixelFormat::new(BitDepth::F32, Components::Rgba).to_string(),
            "RGBA float"
        );
    }
}
