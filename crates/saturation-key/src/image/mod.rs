//! Image geometry, pixel formats and bounds-checked buffer views.
//!
//! Nothing outside this module computes raw buffer offsets: kernels and the
//! scheduler read and write pixels through [`ImageView::pixel`] and
//! [`ImageViewMut::pixel_mut`], both of which go through [`pixel_offset`].

mod format;
mod rect;
mod view;

pub use format::{BitDepth, Components, PixelFormat};
pub use rect::Rect;
pub use view::{pixel_offset, ImageView, ImageViewMut, LayoutError};
