//! Integer pixel rectangles.

/// An integer rectangle in pixel coordinates.
///
/// Both axes are half-open: a pixel `(x, y)` is inside when
/// `x1 <= x < x2` and `y1 <= y < y2`. A rectangle with `x2 <= x1` or
/// `y2 <= y1` is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left edge (inclusive)
    pub x1: i32,
    /// Top edge (inclusive)
    pub y1: i32,
    /// Right edge (exclusive)
    pub x2: i32,
    /// Bottom edge (exclusive)
    pub y2: i32,
}

impl Rect {
    /// Create a rectangle from its corners.
    #[inline]
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Rectangle anchored at the origin with the given size.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width as i32, height as i32)
    }

    /// Width in pixels (0 for inverted rectangles).
    #[inline]
    pub fn width(&self) -> u32 {
        (self.x2 as i64 - self.x1 as i64).max(0) as u32
    }

    /// Height in pixels (0 for inverted rectangles).
    #[inline]
    pub fn height(&self) -> u32 {
        (self.y2 as i64 - self.y1 as i64).max(0) as u32
    }

    /// Whether the rectangle covers no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Whether `(x, y)` lies inside the rectangle.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x1 && x < self.x2 && y >= self.y1 && y < self.y2
    }

    /// Intersection of two rectangles.
    ///
    /// Disjoint rectangles produce an empty rectangle whose far edges are
    /// pulled back onto the near edges, so `width()`/`height()` are 0.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x1 = self.x1.max(other.x1);
        let y1 = self.y1.max(other.y1);
        let x2 = self.x2.min(other.x2).max(x1);
        let y2 = self.y2.min(other.y2).max(y1);
        Rect { x1, y1, x2, y2 }
    }

    /// Same horizontal extent, restricted to rows `[y1, y2)`.
    #[inline]
    pub fn with_rows(&self, y1: i32, y2: i32) -> Rect {
        Rect { y1, y2, ..*self }
    }

    /// Number of pixels covered.
    #[inline]
    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})..({}, {})", self.x1, self.y1, self.x2, self.y2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_half_open_on_both_axes() {
        let r = Rect::new(0, 0, 4, 3);
        assert!(r.contains(0, 0));
        assert!(r.contains(3, 2));
        assert!(!r.contains(4, 0));
        assert!(!r.contains(0, 3));
        assert!(!r.contains(-1, 0));
    }

    #[test]
    fn test_intersect_overlapping() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, -3, 20, 4);
        assert_eq!(a.intersect(&b), Rect::new(5, 0, 10, 4));
    }

    #[test]
    fn test_intersect_disjoint_is_empty() {
        let a = Rect::new(0, 0, 4, 4);
        let b = Rect::new(10, 10, 12, 12);
        let i = a.intersect(&b);
        assert!(i.is_empty());
        assert_eq!(i.area(), 0);
    }

    #[test]
    fn test_inverted_rect_has_zero_size() {
        let r = Rect::new(5, 5, 2, 1);
        assert_eq!(r.width(), 0);
        assert_eq!(r.height(), 0);
        assert!(r.is_empty());
    }
}
