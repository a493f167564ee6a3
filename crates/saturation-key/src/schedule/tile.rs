//! Row-band partitioning of a render window.

use std::ops::Range;

use crate::image::Rect;

/// A horizontal band of window rows owned by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// Index of the worker that owns this band
    pub index: usize,
    /// First row (inclusive)
    pub y1: i32,
    /// Last row (exclusive)
    pub y2: i32,
}

impl Tile {
    #[inline]
    pub fn rows(&self) -> Range<i32> {
        self.y1..self.y2
    }

    #[inline]
    pub fn height(&self) -> u32 {
        (self.y2 - self.y1).max(0) as u32
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.y2 <= self.y1
    }
}

/// Band `index` of `count` for `window`.
///
/// With `dy = window.height()`, band `i` covers
/// `[y1 + i*dy/count, y1 + min((i+1)*dy/count, dy))` using integer division.
/// The arithmetic is widened to `u64` so large windows and worker counts
/// cannot overflow. A `count` of 0 is treated as 1.
pub fn tile_for(window: &Rect, index: usize, count: usize) -> Tile {
    let dy = window.height() as u64;
    let n = count.max(1) as u64;
    let i = index as u64;

    let start = (i * dy / n).min(dy);
    let end = ((i + 1) * dy / n).min(dy);

    Tile {
        index,
        y1: window.y1 + start as i32,
        y2: window.y1 + end as i32,
    }
}

/// All `count` bands of `window`, in worker order.
///
/// The bands are contiguous, ascending and disjoint, and their union is the
/// window's full row range. When `count` exceeds the window height some
/// bands are empty.
pub fn tiles(window: Rect, count: usize) -> impl ExactSizeIterator<Item = Tile> {
    let count = count.max(1);
    (0..count).map(move |index| tile_for(&window, index, count))
}
