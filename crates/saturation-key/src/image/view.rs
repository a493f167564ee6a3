//! Borrowed, bounds-checked views over strided pixel memory.
//!
//! A view pairs a byte slice with the rectangle it covers, the distance in
//! bytes between rows and the pixel format. Views never own memory: they
//! borrow it from whoever provided the image for the duration of one render.
//!
//! All pixel access goes through [`pixel_offset`], which returns `None` for
//! coordinates outside the view's bounds. On top of that, the slice accessors
//! refuse offsets past the end of the borrowed memory, so no coordinate can
//! reach memory the view does not own.

use std::collections::TryReserveError;
use std::fmt;
use std::ops::Range;

use super::format::PixelFormat;
use super::rect::Rect;

/// Byte offset of pixel `(x, y)` inside a buffer covering `bounds`.
///
/// Returns `None` when the pixel lies outside `bounds` (half-open on both
/// axes) or the offset does not fit in `usize`. The offset is
/// `(y - y1) * stride + (x - x1) * pixel_size`.
#[inline]
pub fn pixel_offset(
    bounds: &Rect,
    stride: usize,
    pixel_size: usize,
    x: i32,
    y: i32,
) -> Option<usize> {
    if !bounds.contains(x, y) {
        return None;
    }
    let row = (y as i64 - bounds.y1 as i64) as usize;
    let col = (x as i64 - bounds.x1 as i64) as usize;
    row.checked_mul(stride)?.checked_add(col.checked_mul(pixel_size)?)
}

/// Error returned when a buffer cannot back the layout it claims.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// Stride shorter than one row of pixels
    StrideTooSmall {
        /// Stride given by the provider
        stride: usize,
        /// Bytes needed for one row
        min: usize,
    },
    /// Slice shorter than the last addressable byte
    BufferTooSmall {
        /// Length of the provided slice
        len: usize,
        /// Bytes needed to cover the bounds
        required: usize,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::StrideTooSmall { stride, min } => {
                write!(f, "stride of {} bytes is below one row ({} bytes)", stride, min)
            }
            LayoutError::BufferTooSmall { len, required } => {
                write!(
                    f,
                    "buffer of {} bytes cannot hold the image ({} bytes required)",
                    len, required
                )
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// Bytes needed to address every pixel in `bounds`, `None` on overflow.
fn required_len(bounds: &Rect, stride: usize, format: PixelFormat) -> Option<usize> {
    if bounds.is_empty() {
        return Some(0);
    }
    let row = row_len(bounds, format)?;
    (bounds.height() as usize - 1).checked_mul(stride)?.checked_add(row)
}

fn row_len(bounds: &Rect, format: PixelFormat) -> Option<usize> {
    (bounds.width() as usize).checked_mul(format.bytes_per_pixel())
}

fn check_layout(
    len: usize,
    bounds: &Rect,
    stride: usize,
    format: PixelFormat,
) -> Result<(), LayoutError> {
    let min = row_len(bounds, format).unwrap_or(usize::MAX);
    if stride < min {
        return Err(LayoutError::StrideTooSmall { stride, min });
    }
    let required = required_len(bounds, stride, format).unwrap_or(usize::MAX);
    if len < required {
        return Err(LayoutError::BufferTooSmall { len, required });
    }
    Ok(())
}

/// Read-only view of an image buffer.
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a> {
    data: &'a [u8],
    bounds: Rect,
    stride: usize,
    format: PixelFormat,
}

impl<'a> ImageView<'a> {
    /// Wrap `data` as an image covering `bounds`.
    ///
    /// `data` starts at pixel `(bounds.x1, bounds.y1)`; consecutive rows are
    /// `stride` bytes apart.
    pub fn new(
        data: &'a [u8],
        bounds: Rect,
        stride: usize,
        format: PixelFormat,
    ) -> Result<Self, LayoutError> {
        check_layout(data.len(), &bounds, stride, format)?;
        Ok(Self {
            data,
            bounds,
            stride,
            format,
        })
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Bytes of pixel `(x, y)`, or `None` outside the bounds.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<&'a [u8]> {
        let size = self.format.bytes_per_pixel();
        let offset = pixel_offset(&self.bounds, self.stride, size, x, y)?;
        self.data.get(offset..offset.checked_add(size)?)
    }
}

/// Writable view of an image buffer.
#[derive(Debug)]
pub struct ImageViewMut<'a> {
    data: &'a mut [u8],
    bounds: Rect,
    stride: usize,
    format: PixelFormat,
}

impl<'a> ImageViewMut<'a> {
    /// Wrap `data` as a writable image covering `bounds`.
    pub fn new(
        data: &'a mut [u8],
        bounds: Rect,
        stride: usize,
        format: PixelFormat,
    ) -> Result<Self, LayoutError> {
        check_layout(data.len(), &bounds, stride, format)?;
        Ok(Self {
            data,
            bounds,
            stride,
            format,
        })
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Read-only reborrow of this view.
    #[inline]
    pub fn as_view(&self) -> ImageView<'_> {
        ImageView {
            data: &*self.data,
            bounds: self.bounds,
            stride: self.stride,
            format: self.format,
        }
    }

    /// Mutable bytes of pixel `(x, y)`, or `None` outside the bounds.
    #[inline]
    pub fn pixel_mut(&mut self, x: i32, y: i32) -> Option<&mut [u8]> {
        let size = self.format.bytes_per_pixel();
        let offset = pixel_offset(&self.bounds, self.stride, size, x, y)?;
        self.data.get_mut(offset..offset.checked_add(size)?)
    }

    /// Split the view into disjoint views, one per row range.
    ///
    /// Ranges must be ascending and non-overlapping; each range is clipped to
    /// the view's rows and to the end of the previous range, so the returned
    /// views never alias. Every input range yields exactly one view (possibly
    /// empty), in order.
    pub fn split_rows<I>(self, ranges: I) -> Result<Vec<ImageViewMut<'a>>, TryReserveError>
    where
        I: ExactSizeIterator<Item = Range<i32>>,
    {
        let mut bands = Vec::new();
        bands.try_reserve_exact(ranges.len())?;

        let ImageViewMut {
            data,
            bounds,
            stride,
            format,
        } = self;

        // `rest` always starts at row `cursor`
        let mut rest: &'a mut [u8] = data;
        let mut cursor = bounds.y1;

        for rows in ranges {
            let y1 = rows.start.clamp(cursor, bounds.y2.max(cursor));
            let y2 = rows.end.clamp(y1, bounds.y2.max(y1));

            let remaining = std::mem::take(&mut rest);
            let skip = ((y1 - cursor) as usize).saturating_mul(stride).min(remaining.len());
            let (_, remaining) = remaining.split_at_mut(skip);

            let take = ((y2 - y1) as usize).saturating_mul(stride).min(remaining.len());
            let (head, tail) = remaining.split_at_mut(take);
            rest = tail;
            cursor = y2;

            bands.push(ImageViewMut {
                data: head,
                bounds: bounds.with_rows(y1, y2),
                stride,
                format,
            });
        }

        Ok(bands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba_buffer(width: u32, height: u32) -> (Vec<u8>, usize) {
        let stride = width as usize * 4;
        (vec![0u8; stride * height as usize], stride)
    }

    #[test]
    fn test_pixel_offset_inside() {
        let bounds = Rect::new(10, 20, 14, 23);
        assert_eq!(pixel_offset(&bounds, 16, 4, 10, 20), Some(0));
        assert_eq!(pixel_offset(&bounds, 16, 4, 11, 20), Some(4));
        assert_eq!(pixel_offset(&bounds, 16, 4, 10, 21), Some(16));
        assert_eq!(pixel_offset(&bounds, 16, 4, 13, 22), Some(2 * 16 + 3 * 4));
    }

    #[test]
    fn test_pixel_offset_outside_returns_none() {
        let bounds = Rect::new(10, 20, 14, 23);
        assert_eq!(pixel_offset(&bounds, 16, 4, 9, 20), None);
        assert_eq!(pixel_offset(&bounds, 16, 4, 14, 20), None);
        assert_eq!(pixel_offset(&bounds, 16, 4, 10, 19), None);
        // Bottom edge is exclusive, same as the right edge
        assert_eq!(pixel_offset(&bounds, 16, 4, 10, 23), None);
    }

    #[test]
    fn test_padded_stride_addresses_rows() {
        let bounds = Rect::from_size(2, 2);
        let mut data = vec![0u8; 12 + 8];
        data[12..16].copy_from_slice(&[1, 2, 3, 4]);
        let view = ImageView::new(&data, bounds, 12, PixelFormat::RGBA8).unwrap();
        assert_eq!(view.pixel(0, 1), Some(&[1u8, 2, 3, 4][..]));
    }

    #[test]
    fn test_new_rejects_short_stride() {
        let data = vec![0u8; 64];
        let err = ImageView::new(&data, Rect::from_size(4, 2), 8, PixelFormat::RGBA8).unwrap_err();
        assert_eq!(err, LayoutError::StrideTooSmall { stride: 8, min: 16 });
    }

    #[test]
    fn test_new_rejects_short_buffer() {
        let data = vec![0u8; 20];
        let err = ImageView::new(&data, Rect::from_size(4, 2), 16, PixelFormat::RGBA8).unwrap_err();
        assert_eq!(
            err,
            LayoutError::BufferTooSmall {
                len: 20,
                required: 32
            }
        );
    }

    #[test]
    fn test_new_rejects_overflowing_stride() {
        let data = vec![0u8; 64];
        let stride = usize::MAX / 2 + 1;
        let err = ImageView::new(&data, Rect::from_size(1, 3), stride, PixelFormat::RGBA8)
            .unwrap_err();
        assert_eq!(
            err,
            LayoutError::BufferTooSmall {
                len: 64,
                required: usize::MAX
            }
        );

        let mut data = vec![0u8; 64];
        let view = ImageViewMut::new(&mut data, Rect::from_size(1, 3), usize::MAX, PixelFormat::RGBA8);
        assert!(view.is_err());
    }

    #[test]
    fn test_pixel_offset_overflow_returns_none() {
        let bounds = Rect::from_size(2, 3);
        assert_eq!(pixel_offset(&bounds, usize::MAX, 4, 0, 2), None);
        assert_eq!(pixel_offset(&bounds, 8, usize::MAX, 1, 1), None);
        assert_eq!(pixel_offset(&bounds, usize::MAX, 4, 1, 0), Some(4));
    }

    #[test]
    fn test_last_row_may_omit_padding() {
        // 2 rows, stride 12, last row only needs 8 bytes
        let data = vec![0u8; 20];
        assert!(ImageView::new(&data, Rect::from_size(2, 2), 12, PixelFormat::RGBA8).is_ok());
    }

    #[test]
    fn test_split_rows_produces_disjoint_bands() {
        let (mut data, stride) = rgba_buffer(3, 6);
        let view = ImageViewMut::new(&mut data, Rect::from_size(3, 6), stride, PixelFormat::RGBA8)
            .unwrap();
        let bands = view
            .split_rows([0..2, 2..2, 2..5, 5..6].into_iter())
            .unwrap();
        assert_eq!(bands.len(), 4);
        assert_eq!(bands[0].bounds(), Rect::new(0, 0, 3, 2));
        assert!(bands[1].bounds().is_empty());
        assert_eq!(bands[2].bounds(), Rect::new(0, 2, 3, 5));
        assert_eq!(bands[3].bounds(), Rect::new(0, 5, 3, 6));
    }

    #[test]
    fn test_split_rows_writes_land_in_parent() {
        let (mut data, stride) = rgba_buffer(2, 4);
        {
            let view =
                ImageViewMut::new(&mut data, Rect::new(5, 10, 7, 14), stride, PixelFormat::RGBA8)
                    .unwrap();
            let mut bands = view.split_rows([10..12, 12..14].into_iter()).unwrap();
            bands[1].pixel_mut(6, 13).unwrap().copy_from_slice(&[9, 9, 9, 9]);
            // Row 13 does not belong to the first band
            assert!(bands[0].pixel_mut(6, 13).is_none());
        }
        assert_eq!(&data[3 * stride + 4..3 * stride + 8], &[9, 9, 9, 9]);
    }

    #[test]
    fn test_split_rows_skips_rows_outside_ranges() {
        let (mut data, stride) = rgba_buffer(1, 5);
        let view =
            ImageViewMut::new(&mut data, Rect::from_size(1, 5), stride, PixelFormat::RGBA8).unwrap();
        let mut bands = view.split_rows([2..4].into_iter()).unwrap();
        bands[0].pixel_mut(0, 2).unwrap()[0] = 7;
        drop(bands);
        assert_eq!(data[2 * stride], 7);
        assert_eq!(data[0], 0);
    }

    #[test]
    fn test_split_rows_clamps_overlap() {
        let (mut data, stride) = rgba_buffer(1, 4);
        let view =
            ImageViewMut::new(&mut data, Rect::from_size(1, 4), stride, PixelFormat::RGBA8).unwrap();
        let bands = view.split_rows([0..3, 1..4].into_iter()).unwrap();
        assert_eq!(bands[0].bounds().y2, 3);
        assert_eq!(bands[1].bounds().y1, 3);
    }
}
