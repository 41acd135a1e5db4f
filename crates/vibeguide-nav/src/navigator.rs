#![forbid(unsafe_code)]

//! Focus state machine over a [`GridIndex`].
//!
//! The navigator owns only the focused cell. The index, viewport, and
//! featured sink are passed in per call, so a rebuilt index or an externally
//! scrolled viewport is always seen as-is.
//!
//! # Drift
//!
//! A navigation key while focus is empty, stale, or on a row scrolled fully
//! out of view re-anchors focus to the top-left visible cell and does nothing
//! else. Only the following key moves relative to it.

use vibeguide_core::event::{Event, KeyCode, KeyEvent, PointerEvent};
use vibeguide_core::geometry::Span;

use crate::index::{GridIndex, IndexCell};
use crate::resolve::{Direction, FocusedCell, resolve_move};
use crate::sink::FeaturedSink;
use crate::viewport::{GridMetrics, Viewport, ViewportMetrics};

/// What an event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavOutcome {
    /// Not a navigation event, or nothing to act on.
    Ignored,
    /// Focus was re-anchored instead of moving.
    Anchored(FocusedCell),
    /// Focus moved.
    Moved(FocusedCell),
    /// Move hit a grid edge; focus unchanged.
    Blocked(FocusedCell),
    /// Focus cleared.
    Cleared,
    /// The sink received a featured selection.
    Activated(FocusedCell),
    /// Activation target has no stream.
    NoStream(FocusedCell),
}

/// Keyboard/pointer navigation over a grid index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    focus: Option<FocusedCell>,
    grid: GridMetrics,
    smooth_scroll: bool,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(GridMetrics::default())
    }
}

impl Navigator {
    #[must_use]
    pub fn new(grid: GridMetrics) -> Self {
        Self {
            focus: None,
            grid,
            smooth_scroll: true,
        }
    }

    /// Whether scroll requests ask for animation.
    #[must_use]
    pub fn with_smooth_scroll(mut self, smooth: bool) -> Self {
        self.smooth_scroll = smooth;
        self
    }

    #[must_use]
    pub fn focus(&self) -> Option<FocusedCell> {
        self.focus
    }

    #[must_use]
    pub fn grid(&self) -> &GridMetrics {
        &self.grid
    }

    /// Focus `cell` if it exists in `index`. Returns whether focus was set.
    pub fn set_focus(&mut self, index: &GridIndex, cell: FocusedCell) -> bool {
        if index.contains(cell) {
            self.focus = Some(cell);
            true
        } else {
            false
        }
    }

    /// Drop focus, returning what was focused.
    pub fn clear_focus(&mut self) -> Option<FocusedCell> {
        self.focus.take()
    }

    /// Clear focus if it no longer refers to a cell of `index`. Returns
    /// whether a focus survived.
    pub fn revalidate(&mut self, index: &GridIndex) -> bool {
        match self.focus {
            Some(cell) if index.contains(cell) => true,
            Some(cell) => {
                vibeguide_core::debug!(
                    row = cell.row_index,
                    block = cell.block_index,
                    "dropping stale focus"
                );
                self.focus = None;
                false
            }
            None => false,
        }
    }

    /// Currently focused cell, resolved against `index`.
    #[must_use]
    pub fn focused_cell<'a>(&self, index: &'a GridIndex) -> Option<&'a IndexCell> {
        self.focus.and_then(|cell| index.cell(cell))
    }

    /// Whether focus must be re-anchored before the next move.
    #[must_use]
    pub fn has_drifted(&self, index: &GridIndex, metrics: &ViewportMetrics) -> bool {
        match self.focused_cell(index) {
            Some(cell) => !self
                .grid
                .row_span(cell.actual_row_index)
                .intersects(&metrics.vertical()),
            None => true,
        }
    }

    /// Top-left visible cell. Prefers fully visible rows and cells, then
    /// partially visible ones, then the nearest in scroll direction.
    #[must_use]
    pub fn anchor(&self, index: &GridIndex, metrics: &ViewportMetrics) -> Option<FocusedCell> {
        let row_spans: Vec<Span> = index
            .rows()
            .iter()
            .map(|row| self.grid.row_span(row.actual_row_index))
            .collect();
        let row_index = pick_visible(&row_spans, metrics.vertical())?;
        let row = index.row(row_index)?;
        let cell_spans: Vec<Span> = row
            .cells
            .iter()
            .map(|cell| self.grid.column_span(cell.position, cell.width))
            .collect();
        let block_index = pick_visible(&cell_spans, metrics.horizontal())?;
        Some(FocusedCell::new(row_index, block_index))
    }

    /// Move focus in `direction`, scrolling the target into view.
    pub fn navigate<V: Viewport + ?Sized>(
        &mut self,
        index: &GridIndex,
        direction: Direction,
        viewport: &mut V,
    ) -> NavOutcome {
        if index.is_empty() {
            self.focus = None;
            return NavOutcome::Ignored;
        }
        let metrics = viewport.metrics();

        let current = match self.focus {
            Some(cell) if !self.has_drifted(index, &metrics) => cell,
            _ => {
                let Some(anchor) = self.anchor(index, &metrics) else {
                    self.focus = None;
                    return NavOutcome::Ignored;
                };
                vibeguide_core::debug!(
                    row = anchor.row_index,
                    block = anchor.block_index,
                    "re-anchored focus"
                );
                self.focus = Some(anchor);
                return NavOutcome::Anchored(anchor);
            }
        };

        let next = resolve_move(index, current, direction);
        if next == current {
            return NavOutcome::Blocked(current);
        }
        self.focus = Some(next);

        if let Some(cell) = index.cell(next)
            && let Some(request) = self.grid.scroll_into_view(cell, &metrics, self.smooth_scroll)
        {
            vibeguide_core::trace!(top = ?request.top, left = ?request.left, "scroll into view");
            viewport.scroll_to(request);
        }
        NavOutcome::Moved(next)
    }

    /// Activate the focused cell.
    pub fn activate<S: FeaturedSink + ?Sized>(&self, index: &GridIndex, sink: &mut S) -> NavOutcome {
        match self.focus {
            Some(cell) => activate_cell(index, cell, sink),
            None => NavOutcome::Ignored,
        }
    }

    /// Pointer activation: clears keyboard focus, then activates the cell
    /// under the pointer (viewport-relative pixels).
    pub fn activate_at<V, S>(
        &mut self,
        index: &GridIndex,
        pointer: PointerEvent,
        viewport: &V,
        sink: &mut S,
    ) -> NavOutcome
    where
        V: Viewport + ?Sized,
        S: FeaturedSink + ?Sized,
    {
        self.focus = None;
        match self.hit_test(index, pointer, &viewport.metrics()) {
            Some(cell) => activate_cell(index, cell, sink),
            None => NavOutcome::Cleared,
        }
    }

    /// Cell under a viewport-relative pointer position.
    #[must_use]
    pub fn hit_test(
        &self,
        index: &GridIndex,
        pointer: PointerEvent,
        metrics: &ViewportMetrics,
    ) -> Option<FocusedCell> {
        let actual = self
            .grid
            .row_at(pointer.y.saturating_add(metrics.scroll_top))?;
        let unit = self
            .grid
            .unit_at(pointer.x.saturating_add(metrics.scroll_left))?;
        let row_index = index.index_row_for_actual(actual)?;
        let block_index = index
            .row(row_index)?
            .cells
            .iter()
            .position(|cell| cell.contains(unit))?;
        Some(FocusedCell::new(row_index, block_index))
    }

    /// Dispatch a key. Chords and releases are ignored.
    pub fn handle_key<V, S>(
        &mut self,
        key: &KeyEvent,
        index: &GridIndex,
        viewport: &mut V,
        sink: &mut S,
    ) -> NavOutcome
    where
        V: Viewport + ?Sized,
        S: FeaturedSink + ?Sized,
    {
        if !key.is_press() || key.is_chord() {
            return NavOutcome::Ignored;
        }
        let direction = match key.code {
            KeyCode::Up => Direction::Up,
            KeyCode::Down => Direction::Down,
            KeyCode::Left => Direction::Left,
            KeyCode::Right => Direction::Right,
            KeyCode::Home => Direction::Home,
            KeyCode::End => Direction::End,
            KeyCode::Enter => return self.activate(index, sink),
            KeyCode::Escape => {
                return match self.clear_focus() {
                    Some(_) => NavOutcome::Cleared,
                    None => NavOutcome::Ignored,
                };
            }
            _ => return NavOutcome::Ignored,
        };
        self.navigate(index, direction, viewport)
    }

    /// Dispatch any input event.
    pub fn handle_event<V, S>(
        &mut self,
        event: &Event,
        index: &GridIndex,
        viewport: &mut V,
        sink: &mut S,
    ) -> NavOutcome
    where
        V: Viewport + ?Sized,
        S: FeaturedSink + ?Sized,
    {
        match event {
            Event::Key(key) => self.handle_key(key, index, viewport, sink),
            Event::Pointer(pointer) => self.activate_at(index, *pointer, viewport, sink),
            Event::Resize { .. } | Event::Tick => NavOutcome::Ignored,
        }
    }
}

fn activate_cell<S: FeaturedSink + ?Sized>(
    index: &GridIndex,
    focus: FocusedCell,
    sink: &mut S,
) -> NavOutcome {
    let Some(cell) = index.cell(focus) else {
        return NavOutcome::Ignored;
    };
    let Some(stream) = cell.stream.as_ref().filter(|_| cell.has_stream) else {
        return NavOutcome::NoStream(focus);
    };
    vibeguide_core::info!(
        user = %stream.user_login,
        category = %cell.category.name,
        rank = cell.rank(),
        "featured stream selected"
    );
    sink.set_featured_selection(stream, &cell.category, cell.rank());
    sink.set_auto_rotate_enabled(false);
    NavOutcome::Activated(focus)
}

/// First fully visible span, else first partially visible, else the first
/// past the visible start, else the last.
fn pick_visible(spans: &[Span], visible: Span) -> Option<usize> {
    spans
        .iter()
        .position(|span| !span.is_empty() && visible.contains_span(span))
        .or_else(|| spans.iter().position(|span| span.intersects(&visible)))
        .or_else(|| spans.iter().position(|span| span.start >= visible.start))
        .or_else(|| spans.len().checked_sub(1))
}
