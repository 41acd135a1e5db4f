#![forbid(unsafe_code)]

//! Viewport abstraction and scroll-into-view.
//!
//! The navigator never owns scroll position: it reads [`ViewportMetrics`]
//! fresh on every event (an auto-scroller may have moved it) and reports
//! [`ScrollRequest`]s back through [`Viewport::scroll_to`].
//!
//! Grid coordinates map to content pixels through [`GridMetrics`]: layout row
//! `r` spans `[r * row_height, (r + 1) * row_height)`, unit `u` spans
//! `[u * unit_width, (u + 1) * unit_width)`.

use vibeguide_core::geometry::{Rect, Span};

use crate::index::IndexCell;

/// Current scroll state, in content pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ViewportMetrics {
    pub scroll_top: u32,
    pub scroll_left: u32,
    pub viewport_height: u32,
    pub viewport_width: u32,
}

impl ViewportMetrics {
    #[must_use]
    pub const fn new(
        scroll_top: u32,
        scroll_left: u32,
        viewport_height: u32,
        viewport_width: u32,
    ) -> Self {
        Self {
            scroll_top,
            scroll_left,
            viewport_height,
            viewport_width,
        }
    }

    /// Visible vertical range.
    #[must_use]
    pub const fn vertical(&self) -> Span {
        Span::new(self.scroll_top, self.viewport_height)
    }

    /// Visible horizontal range.
    #[must_use]
    pub const fn horizontal(&self) -> Span {
        Span::new(self.scroll_left, self.viewport_width)
    }
}

/// A scroll command. `None` leaves that axis alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScrollRequest {
    pub top: Option<u32>,
    pub left: Option<u32>,
    pub smooth: bool,
}

impl ScrollRequest {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.left.is_none()
    }
}

/// External scroll controller.
pub trait Viewport {
    /// Current scroll offsets and size.
    fn metrics(&self) -> ViewportMetrics;

    /// Request a scroll. Implementations may animate when `smooth` is set.
    fn scroll_to(&mut self, request: ScrollRequest);
}

impl<V: Viewport + ?Sized> Viewport for &mut V {
    fn metrics(&self) -> ViewportMetrics {
        (**self).metrics()
    }

    fn scroll_to(&mut self, request: ScrollRequest) {
        (**self).scroll_to(request);
    }
}

/// Pixel geometry of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridMetrics {
    /// Height of one layout row.
    pub row_height: u32,
    /// Width of one grid unit.
    pub unit_width: u32,
    /// Vertical scroll snaps to multiples of this many rows.
    pub snap_rows: u32,
    /// Horizontal scroll snaps to multiples of this many units.
    pub snap_columns: u32,
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self {
            row_height: 64,
            unit_width: 32,
            snap_rows: 4,
            snap_columns: 4,
        }
    }
}

impl GridMetrics {
    /// Set the row height.
    #[must_use]
    pub fn row_height(mut self, row_height: u32) -> Self {
        self.row_height = row_height;
        self
    }

    /// Set the unit width.
    #[must_use]
    pub fn unit_width(mut self, unit_width: u32) -> Self {
        self.unit_width = unit_width;
        self
    }

    /// Set both snap intervals.
    #[must_use]
    pub fn snap(mut self, rows: u32, columns: u32) -> Self {
        self.snap_rows = rows;
        self.snap_columns = columns;
        self
    }

    /// Pixel span of layout row `actual_row_index`.
    #[must_use]
    pub fn row_span(&self, actual_row_index: usize) -> Span {
        Span::new(
            (actual_row_index as u32).saturating_mul(self.row_height),
            self.row_height,
        )
    }

    /// Pixel span of a unit range.
    #[must_use]
    pub fn column_span(&self, position: u16, width: u16) -> Span {
        Span::new(u32::from(position), u32::from(width)).scaled(self.unit_width)
    }

    /// Pixel rectangle of a cell.
    #[must_use]
    pub fn cell_rect(&self, cell: &IndexCell) -> Rect {
        Rect::from_spans(
            self.column_span(cell.position, cell.width),
            self.row_span(cell.actual_row_index),
        )
    }

    /// Layout row under content pixel `y`.
    #[must_use]
    pub fn row_at(&self, y: u32) -> Option<usize> {
        (self.row_height > 0).then(|| (y / self.row_height) as usize)
    }

    /// Grid unit under content pixel `x`, saturating at `u16::MAX`.
    #[must_use]
    pub fn unit_at(&self, x: u32) -> Option<u16> {
        (self.unit_width > 0).then(|| u16::try_from(x / self.unit_width).unwrap_or(u16::MAX))
    }

    /// Scroll needed to bring `cell` fully into view, if any.
    ///
    /// Each axis snaps to its own boundary: scrolling back lands on the
    /// boundary at or before the cell, scrolling forward on the first boundary
    /// that shows the whole cell (never past the cell's own start boundary).
    #[must_use]
    pub fn scroll_into_view(
        &self,
        cell: &IndexCell,
        viewport: &ViewportMetrics,
        smooth: bool,
    ) -> Option<ScrollRequest> {
        let rect = self.cell_rect(cell);
        let request = ScrollRequest {
            top: snap_axis(
                rect.vertical(),
                viewport.vertical(),
                self.row_height.saturating_mul(self.snap_rows),
            ),
            left: snap_axis(
                rect.horizontal(),
                viewport.horizontal(),
                self.unit_width.saturating_mul(self.snap_columns),
            ),
            smooth,
        };
        (!request.is_empty()).then_some(request)
    }
}

/// New offset on one axis, `None` if `target` is already fully visible.
///
/// Prefers a multiple of `step` that shows the whole target. When the
/// viewport is too short for any such boundary, falls back to an unsnapped
/// offset: the smallest forward scroll that shows the target, or its start
/// when scrolling back or when the target is longer than the viewport.
fn snap_axis(target: Span, visible: Span, step: u32) -> Option<u32> {
    if visible.contains_span(&target) {
        return None;
    }
    let step = step.max(1);
    let floor = target.start / step * step;
    let backward = target.start < visible.start;
    let needed = target.end().saturating_sub(visible.len);

    if backward {
        if floor.saturating_add(visible.len) >= target.end() {
            return Some(floor);
        }
    } else {
        let forward = needed.div_ceil(step).saturating_mul(step);
        if forward <= floor {
            return Some(forward);
        }
    }

    if target.len > visible.len {
        return Some(if floor.saturating_add(visible.len) > target.start {
            floor
        } else {
            target.start
        });
    }
    Some(if backward { target.start } else { needed })
}

/// A viewport with no rendering behind it. Applies requests immediately and
/// records them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeadlessViewport {
    metrics: ViewportMetrics,
    requests: Vec<ScrollRequest>,
}

impl HeadlessViewport {
    #[must_use]
    pub fn new(viewport_width: u32, viewport_height: u32) -> Self {
        Self {
            metrics: ViewportMetrics::new(0, 0, viewport_height, viewport_width),
            requests: Vec::new(),
        }
    }

    /// Move the viewport without recording a request, as an auto-scroller would.
    pub fn set_scroll(&mut self, top: u32, left: u32) {
        self.metrics.scroll_top = top;
        self.metrics.scroll_left = left;
    }

    /// Requests received so far.
    #[must_use]
    pub fn requests(&self) -> &[ScrollRequest] {
        &self.requests
    }
}

impl Viewport for HeadlessViewport {
    fn metrics(&self) -> ViewportMetrics {
        self.metrics
    }

    fn scroll_to(&mut self, request: ScrollRequest) {
        if let Some(top) = request.top {
            self.metrics.scroll_top = top;
        }
        if let Some(left) = request.left {
            self.metrics.scroll_left = left;
        }
        self.requests.push(request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vibeguide_catalog::Category;

    fn cell(row: usize, position: u16, width: u16) -> IndexCell {
        IndexCell {
            actual_row_index: row,
            block_index: 0,
            position,
            width,
            stream_index: Some(0),
            category_index: 0,
            has_stream: false,
            stream: None,
            category: Category::default(),
        }
    }

    fn grid() -> GridMetrics {
        GridMetrics::default().row_height(10).unit_width(10)
    }

    #[test]
    fn visible_cell_needs_no_scroll() {
        let viewport = ViewportMetrics::new(0, 0, 100, 100);
        assert_eq!(grid().scroll_into_view(&cell(3, 2, 3), &viewport, true), None);
    }

    #[test]
    fn scrolling_up_snaps_to_boundary_at_or_before_row() {
        // rows 20..30 visible, target row 9 → boundary row 8
        let viewport = ViewportMetrics::new(200, 0, 100, 100);
        let request = grid().scroll_into_view(&cell(9, 0, 3), &viewport, false).unwrap();
        assert_eq!(request.top, Some(80));
        assert_eq!(request.left, None);
        assert!(!request.smooth);
    }

    #[test]
    fn scrolling_down_uses_first_boundary_showing_row() {
        // rows 0..10 visible, target row 13 needs top >= 40 → boundary 40
        let viewport = ViewportMetrics::new(0, 0, 100, 100);
        let request = grid().scroll_into_view(&cell(13, 0, 3), &viewport, true).unwrap();
        assert_eq!(request.top, Some(40));
        assert!(request.smooth);
    }

    #[test]
    fn forward_scroll_never_passes_cell_boundary() {
        // viewport shorter than a snap step: row 5 needs top >= 35, next boundary is 40
        let viewport = ViewportMetrics::new(0, 0, 25, 100);
        let request = grid().scroll_into_view(&cell(5, 0, 3), &viewport, true).unwrap();
        assert_eq!(request.top, Some(40));
    }

    #[test]
    fn horizontal_scroll_snaps_to_columns() {
        // units 0..10 visible, cell [9,12) needs left >= 20, next 4-unit boundary is 40
        let viewport = ViewportMetrics::new(0, 0, 100, 100);
        let request = grid().scroll_into_view(&cell(0, 9, 3), &viewport, true).unwrap();
        assert_eq!(request.left, Some(40));
        assert_eq!(request.top, None);

        let scrolled = ViewportMetrics::new(0, 200, 100, 100);
        let request = grid().scroll_into_view(&cell(0, 5, 3), &scrolled, true).unwrap();
        assert_eq!(request.left, Some(40));
    }

    #[test]
    fn short_viewport_falls_back_to_unsnapped_offset() {
        // row 3 is [30,40); no multiple of 40 shows it in a 25px viewport
        let viewport = ViewportMetrics::new(0, 0, 25, 100);
        let request = grid().scroll_into_view(&cell(3, 0, 3), &viewport, true).unwrap();
        assert_eq!(request.top, Some(15));

        // scrolling back lands the row at the top
        let below = ViewportMetrics::new(60, 0, 25, 100);
        let request = grid().scroll_into_view(&cell(3, 0, 3), &below, true).unwrap();
        assert_eq!(request.top, Some(30));
    }

    #[test]
    fn cell_longer_than_viewport_shows_its_start() {
        // cell [0,9) is 90px wide in a 50px viewport scrolled to 200
        let viewport = ViewportMetrics::new(0, 200, 100, 50);
        let request = grid().scroll_into_view(&cell(0, 0, 9), &viewport, true).unwrap();
        assert_eq!(request.left, Some(0));

        // cell [60,150): boundary 40 still shows the start in 50px
        let cell = cell(0, 6, 9);
        let request = grid()
            .scroll_into_view(&cell, &ViewportMetrics::new(0, 0, 100, 50), true)
            .unwrap();
        assert_eq!(request.left, Some(40));
        // but not in 15px
        let request = grid()
            .scroll_into_view(&cell, &ViewportMetrics::new(0, 0, 100, 15), true)
            .unwrap();
        assert_eq!(request.left, Some(60));
    }

    #[test]
    fn partially_visible_row_scrolls() {
        let viewport = ViewportMetrics::new(15, 0, 100, 100);
        let request = grid().scroll_into_view(&cell(1, 0, 3), &viewport, true).unwrap();
        assert_eq!(request.top, Some(0));
    }

    #[test]
    fn pixel_lookups() {
        let metrics = grid();
        assert_eq!(metrics.row_at(35), Some(3));
        assert_eq!(metrics.unit_at(99), Some(9));
        let zero = GridMetrics::default().row_height(0).unit_width(0);
        assert_eq!(zero.row_at(35), None);
        assert_eq!(zero.unit_at(35), None);
    }

    #[test]
    fn headless_viewport_applies_requests() {
        let mut viewport = HeadlessViewport::new(100, 100);
        viewport.scroll_to(ScrollRequest {
            top: Some(40),
            left: None,
            smooth: true,
        });
        assert_eq!(viewport.metrics().scroll_top, 40);
        assert_eq!(viewport.metrics().scroll_left, 0);
        assert_eq!(viewport.requests().len(), 1);
        viewport.set_scroll(0, 0);
        assert_eq!(viewport.requests().len(), 1);
    }
}
