#![forbid(unsafe_code)]

//! Directional move resolution.
//!
//! [`resolve_move`] is a pure function of `(index, focus, direction)`.
//!
//! Horizontal moves stay in the row and clamp at both ends. Vertical moves go
//! to the adjacent index row and pick, in order:
//!
//! 1. the block whose span contains the current block's left edge;
//! 2. otherwise the block nearest to that edge, measured as the gap between the
//!    edge and the block's span, ties going to the leftmost.
//!
//! Vertical moves from the first/last row are no-ops.

use crate::index::{GridIndex, IndexRow};

/// Keyboard-selected cell, in index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FocusedCell {
    pub row_index: usize,
    pub block_index: usize,
}

impl FocusedCell {
    #[must_use]
    pub const fn new(row_index: usize, block_index: usize) -> Self {
        Self {
            row_index,
            block_index,
        }
    }
}

/// A navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    /// First block of the row.
    Home,
    /// Last block of the row.
    End,
}

impl Direction {
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }
}

/// Resolve a move from `focus` in `direction`.
///
/// A `focus` that does not exist in `index` is returned unchanged; callers are
/// expected to validate focus first.
#[must_use]
pub fn resolve_move(index: &GridIndex, focus: FocusedCell, direction: Direction) -> FocusedCell {
    let Some(row) = index.row(focus.row_index) else {
        return focus;
    };
    let Some(current) = row.cells.get(focus.block_index) else {
        return focus;
    };
    let last_block = row.cells.len() - 1;

    match direction {
        Direction::Left => FocusedCell::new(focus.row_index, focus.block_index.saturating_sub(1)),
        Direction::Right => {
            FocusedCell::new(focus.row_index, (focus.block_index + 1).min(last_block))
        }
        Direction::Home => FocusedCell::new(focus.row_index, 0),
        Direction::End => FocusedCell::new(focus.row_index, last_block),
        Direction::Up | Direction::Down => {
            let target_row_index = if direction == Direction::Up {
                focus.row_index.checked_sub(1)
            } else {
                Some(focus.row_index + 1).filter(|&r| r < index.len())
            };
            let target = target_row_index
                .and_then(|r| index.row(r).map(|row| (r, row)))
                .and_then(|(r, row)| vertical_target(row, current.position).map(|b| (r, b)));
            match target {
                Some((row_index, block_index)) => FocusedCell::new(row_index, block_index),
                None => focus,
            }
        }
    }
}

/// Block in `row` to land on when arriving from a block starting at `position`.
#[must_use]
pub fn vertical_target(row: &IndexRow, position: u16) -> Option<usize> {
    if let Some(containing) = row.cells.iter().position(|cell| cell.contains(position)) {
        return Some(containing);
    }
    // min_by_key keeps the first minimum, and cells are in position order
    row.cells
        .iter()
        .enumerate()
        .min_by_key(|(_, cell)| gap(cell.position, cell.end(), position))
        .map(|(i, _)| i)
}

/// Distance from `unit` to the span `[start, end)`, with `end` as the right edge.
fn gap(start: u16, end: u16, unit: u16) -> u16 {
    if unit < start {
        start - unit
    } else {
        unit.saturating_sub(end)
    }
}
