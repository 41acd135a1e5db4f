//! Featured-stream state with tick-driven auto-rotation.
//!
//! While auto-rotation is on, every `interval_ticks` ticks the featured slot
//! advances to the next distinct stream in grid order, wrapping at the end.
//! Any explicit selection restarts the countdown; activation through the
//! navigator also turns rotation off.

use std::collections::HashSet;

use vibeguide_catalog::{Category, Stream};
use vibeguide_nav::{FeaturedSink, GridIndex};

/// The stream in the featured area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Featured {
    pub stream: Stream,
    pub category: Category,
    /// Channel number ("CH n").
    pub rank: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeaturedState {
    current: Option<Featured>,
    auto_rotate: bool,
    interval_ticks: u32,
    ticks: u32,
    cursor: Option<usize>,
}

impl Default for FeaturedState {
    fn default() -> Self {
        Self::new(10)
    }
}

impl FeaturedState {
    /// Rotation on, advancing every `interval_ticks` ticks (0 never advances).
    #[must_use]
    pub fn new(interval_ticks: u32) -> Self {
        Self {
            current: None,
            auto_rotate: true,
            interval_ticks,
            ticks: 0,
            cursor: None,
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&Featured> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn auto_rotate_enabled(&self) -> bool {
        self.auto_rotate
    }

    /// Feature the first stream in `index` if nothing is featured yet.
    pub fn ensure_featured(&mut self, index: &GridIndex) -> bool {
        if self.current.is_some() {
            return false;
        }
        self.advance(index)
    }

    /// Count a tick; rotate when the interval elapses. Returns whether the
    /// featured stream changed.
    pub fn on_tick(&mut self, index: &GridIndex) -> bool {
        if !self.auto_rotate || self.interval_ticks == 0 {
            return false;
        }
        self.ticks += 1;
        if self.ticks < self.interval_ticks {
            return false;
        }
        self.ticks = 0;
        self.advance(index)
    }

    fn advance(&mut self, index: &GridIndex) -> bool {
        let candidates = rotation_order(index);
        if candidates.is_empty() {
            return false;
        }
        let next = self.cursor.map_or(0, |c| (c + 1) % candidates.len());
        let cell = candidates[next];
        let Some(stream) = cell.stream.clone() else {
            return false;
        };
        tracing::debug!(user = %stream.user_login, rank = cell.rank(), "rotated featured stream");
        self.cursor = Some(next);
        self.current = Some(Featured {
            stream,
            category: cell.category.clone(),
            rank: cell.rank(),
        });
        true
    }
}

/// Distinct stream cells in grid order.
fn rotation_order(index: &GridIndex) -> Vec<&vibeguide_nav::IndexCell> {
    let mut seen = HashSet::new();
    index
        .rows()
        .iter()
        .flat_map(|row| row.cells.iter())
        .filter(|cell| cell.has_stream)
        .filter(|cell| seen.insert((cell.category_index, cell.stream_index)))
        .collect()
}

impl FeaturedSink for FeaturedState {
    fn set_featured_selection(&mut self, stream: &Stream, category: &Category, rank: usize) {
        self.current = Some(Featured {
            stream: stream.clone(),
            category: category.clone(),
            rank,
        });
        self.ticks = 0;
    }

    fn set_auto_rotate_enabled(&mut self, enabled: bool) {
        if self.auto_rotate != enabled {
            tracing::debug!(enabled, "featured auto-rotation toggled");
        }
        self.auto_rotate = enabled;
        self.ticks = 0;
    }
}
