use saturation_key::{
    HostError, ImageView, ImageViewMut, OutputClip, PixelFormat, Rect, SourceClip,
};

use crate::error::ImageError;

/// An owned, tightly packed image that can act as either clip of a render.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
    format: PixelFormat,
}

impl FrameBuffer {
    /// Wrap packed pixel data. `data` must hold exactly `width * height`
    /// pixels of `format`.
    pub fn new(
        data: Vec<u8>,
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> Result<Self, ImageError> {
        let expected = checked_len(width, height, format)?;
        if data.len() != expected {
            return Err(ImageError::Decode(format!(
                "pixel data is {} bytes, expected {expected} for {width}x{height} {format}",
                data.len()
            )));
        }
        Ok(Self {
            data,
            width,
            height,
            format,
        })
    }

    /// A transparent black frame.
    pub fn blank(width: u32, height: u32, format: PixelFormat) -> Result<Self, ImageError> {
        let len = checked_len(width, height, format)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| ImageError::Allocation)?;
        data.resize(len, 0);
        Ok(Self {
            data,
            width,
            height,
            format,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Bytes per row (no padding).
    pub fn stride(&self) -> usize {
        self.width as usize * self.format.bytes_per_pixel()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// The pixel at `(x, y)`, if inside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let bpp = self.format.bytes_per_pixel();
        let offset = y as usize * self.stride() + x as usize * bpp;
        self.data.get(offset..offset + bpp)
    }
}

fn checked_len(width: u32, height: u32, format: PixelFormat) -> Result<usize, ImageError> {
    let unsupported = || ImageError::UnsupportedDimensions { width, height };
    if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(unsupported());
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(format.bytes_per_pixel()))
        .ok_or_else(unsupported)
}

impl SourceClip for FrameBuffer {
    fn source_image(&self, _time: f64) -> Result<Option<ImageView<'_>>, HostError> {
        ImageView::new(&self.data, self.bounds(), self.stride(), self.format)
            .map(Some)
            .map_err(|e| HostError::Failed(e.to_string()))
    }
}

impl OutputClip for FrameBuffer {
    fn output_image(&mut self, _time: f64) -> Result<Option<ImageViewMut<'_>>, HostError> {
        let bounds = self.bounds();
        let stride = self.stride();
        ImageViewMut::new(&mut self.data, bounds, stride, self.format)
            .map(Some)
            .map_err(|e| HostError::Failed(e.to_string()))
    }
}
