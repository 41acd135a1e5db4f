#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Grid math works on two coordinate systems: *units* (block widths and
//! positions inside a row) and *pixels* (scroll offsets reported by the
//! viewport). Both use the same half-open [`Span`] and [`Rect`] types.

/// A half-open 1-D interval `[start, start + len)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// First covered coordinate (inclusive).
    pub start: u32,
    /// Number of covered coordinates.
    pub len: u32,
}

impl Span {
    /// Create a new span.
    #[inline]
    pub const fn new(start: u32, len: u32) -> Self {
        Self { start, len }
    }

    /// Create a span from inclusive start and exclusive end.
    ///
    /// An `end` before `start` yields an empty span at `start`.
    #[inline]
    pub const fn from_bounds(start: u32, end: u32) -> Self {
        Self::new(start, end.saturating_sub(start))
    }

    /// End coordinate (exclusive).
    #[inline]
    pub const fn end(&self) -> u32 {
        self.start.saturating_add(self.len)
    }

    /// Check if the span covers nothing.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if `point` lies inside the span.
    #[inline]
    pub const fn contains(&self, point: u32) -> bool {
        point >= self.start && point < self.end()
    }

    /// Check if `other` lies entirely inside this span.
    ///
    /// Empty spans are contained wherever their start is within bounds.
    #[inline]
    pub const fn contains_span(&self, other: &Span) -> bool {
        other.start >= self.start && other.end() <= self.end()
    }

    /// Check if the two spans share at least one coordinate.
    #[inline]
    pub const fn intersects(&self, other: &Span) -> bool {
        !self.is_empty() && !other.is_empty() && self.start < other.end() && other.start < self.end()
    }

    /// Compute the overlap with another span, or `None` if disjoint.
    #[inline]
    pub fn intersection(&self, other: &Span) -> Option<Span> {
        let start = self.start.max(other.start);
        let end = self.end().min(other.end());
        (start < end).then(|| Span::from_bounds(start, end))
    }

    /// Scale both ends by `factor` (unit → pixel conversion).
    #[inline]
    pub const fn scaled(&self, factor: u32) -> Span {
        Span::new(
            self.start.saturating_mul(factor),
            self.len.saturating_mul(factor),
        )
    }
}

/// An axis-aligned rectangle (origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u32,
    /// Top edge (inclusive).
    pub y: u32,
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle from its horizontal and vertical projections.
    #[inline]
    pub const fn from_spans(horizontal: Span, vertical: Span) -> Self {
        Self::new(horizontal.start, vertical.start, horizontal.len, vertical.len)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Horizontal projection.
    #[inline]
    pub const fn horizontal(&self) -> Span {
        Span::new(self.x, self.width)
    }

    /// Vertical projection.
    #[inline]
    pub const fn vertical(&self) -> Span {
        Span::new(self.y, self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if `other` lies entirely inside this rectangle.
    #[inline]
    pub const fn contains_rect(&self, other: &Rect) -> bool {
        self.horizontal().contains_span(&other.horizontal())
            && self.vertical().contains_span(&other.vertical())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_end_saturates() {
        let span = Span::new(u32::MAX - 1, 10);
        assert_eq!(span.end(), u32::MAX);
    }

    #[test]
    fn span_contains_is_half_open() {
        let span = Span::new(3, 2);
        assert!(!span.contains(2));
        assert!(span.contains(3));
        assert!(span.contains(4));
        assert!(!span.contains(5));
    }

    #[test]
    fn span_contains_span_edges() {
        let outer = Span::new(10, 10);
        assert!(outer.contains_span(&Span::new(10, 10)));
        assert!(outer.contains_span(&Span::new(12, 3)));
        assert!(!outer.contains_span(&Span::new(9, 3)));
        assert!(!outer.contains_span(&Span::new(18, 3)));
    }

    #[test]
    fn span_intersection() {
        let a = Span::new(0, 5);
        let b = Span::new(3, 5);
        assert_eq!(a.intersection(&b), Some(Span::new(3, 2)));
        assert!(a.intersects(&b));
        let c = Span::new(5, 1);
        assert_eq!(a.intersection(&c), None);
        assert!(!a.intersects(&c));
    }

    #[test]
    fn empty_span_never_intersects() {
        let empty = Span::new(2, 0);
        assert!(!empty.intersects(&Span::new(0, 10)));
    }

    #[test]
    fn from_bounds_handles_inverted_input() {
        assert_eq!(Span::from_bounds(7, 3), Span::new(7, 0));
    }

    #[test]
    fn scaled_span_converts_units() {
        assert_eq!(Span::new(3, 2).scaled(40), Span::new(120, 80));
    }

    #[test]
    fn rect_projections_roundtrip() {
        let rect = Rect::new(4, 8, 16, 32);
        assert_eq!(Rect::from_spans(rect.horizontal(), rect.vertical()), rect);
        assert_eq!(rect.right(), 20);
        assert_eq!(rect.bottom(), 40);
    }

    #[test]
    fn rect_contains_rect() {
        let viewport = Rect::new(0, 100, 800, 300);
        assert!(viewport.contains_rect(&Rect::new(10, 100, 50, 40)));
        assert!(!viewport.contains_rect(&Rect::new(10, 380, 50, 40)));
        assert!(!viewport.contains_rect(&Rect::new(790, 120, 50, 40)));
    }
}
