#![forbid(unsafe_code)]

//! Navigable grid index.
//!
//! A derived view over a [`Layout`] plus the [`Catalog`] it was generated
//! from. Blank rows are dropped; every remaining block becomes an
//! [`IndexCell`] carrying its resolved category and stream.
//!
//! # Invariants
//!
//! 1. Index rows preserve layout row order (`actual_row_index` is strictly
//!    increasing).
//! 2. One cell per block of every non-blank row, none for blank rows.
//! 3. Building twice from the same inputs yields equal indexes.

use vibeguide_catalog::{Catalog, Category, Stream};
use vibeguide_layout::Layout;

use crate::resolve::FocusedCell;

/// One navigable cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexCell {
    /// Row in layout space.
    pub actual_row_index: usize,
    pub block_index: usize,
    pub position: u16,
    pub width: u16,
    pub stream_index: Option<usize>,
    pub category_index: usize,
    pub has_stream: bool,
    pub stream: Option<Stream>,
    pub category: Category,
}

impl IndexCell {
    /// Exclusive end offset in grid units.
    #[must_use]
    pub fn end(&self) -> u16 {
        self.position.saturating_add(self.width)
    }

    /// Whether `unit` falls inside `[position, position + width)`.
    #[must_use]
    pub fn contains(&self, unit: u16) -> bool {
        unit >= self.position && unit < self.end()
    }

    /// Channel rank shown for this cell ("CH n").
    #[must_use]
    pub fn rank(&self) -> usize {
        self.category_index + 1
    }
}

/// One non-blank layout row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRow {
    pub actual_row_index: usize,
    pub category_index: usize,
    pub cells: Vec<IndexCell>,
}

/// Ordered index rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GridIndex {
    rows: Vec<IndexRow>,
}

impl GridIndex {
    /// Build the index. A row whose category is missing from `catalog` still
    /// gets cells, bound to a placeholder category and no streams.
    #[must_use]
    pub fn build(layout: &Layout, catalog: &Catalog) -> Self {
        let leading = layout.leading_blank_rows();
        let mut rows = Vec::with_capacity(layout.content_row_count());

        for (actual_row_index, row) in layout.rows().iter().enumerate() {
            if row.is_blank() {
                continue;
            }
            let category_index = row
                .category_index()
                .unwrap_or_else(|| actual_row_index.saturating_sub(leading));
            let category = catalog.category(category_index).cloned().unwrap_or_default();
            let streams = catalog.streams_at(category_index);

            let cells = row
                .blocks
                .iter()
                .enumerate()
                .map(|(block_index, block)| {
                    let stream = block
                        .stream_index
                        .and_then(|i| streams.get(i))
                        .cloned();
                    IndexCell {
                        actual_row_index,
                        block_index,
                        position: block.position,
                        width: block.width,
                        stream_index: block.stream_index,
                        category_index,
                        has_stream: stream.is_some(),
                        stream,
                        category: category.clone(),
                    }
                })
                .collect();

            rows.push(IndexRow {
                actual_row_index,
                category_index,
                cells,
            });
        }

        vibeguide_core::debug!(rows = rows.len(), "built grid index");
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[IndexRow] {
        &self.rows
    }

    #[must_use]
    pub fn row(&self, row_index: usize) -> Option<&IndexRow> {
        self.rows.get(row_index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(|row| row.cells.len()).sum()
    }

    /// Resolve a focused cell, `None` if it no longer exists.
    #[must_use]
    pub fn cell(&self, focus: FocusedCell) -> Option<&IndexCell> {
        self.rows.get(focus.row_index)?.cells.get(focus.block_index)
    }

    /// Whether `focus` refers to an existing cell.
    #[must_use]
    pub fn contains(&self, focus: FocusedCell) -> bool {
        self.cell(focus).is_some()
    }

    /// Index row for a layout row, `None` for blank or out-of-range rows.
    #[must_use]
    pub fn index_row_for_actual(&self, actual_row_index: usize) -> Option<usize> {
        self.rows
            .binary_search_by_key(&actual_row_index, |row| row.actual_row_index)
            .ok()
    }

    /// First cell of the first row.
    #[must_use]
    pub fn first(&self) -> Option<FocusedCell> {
        self.rows
            .iter()
            .position(|row| !row.cells.is_empty())
            .map(|row_index| FocusedCell::new(row_index, 0))
    }
}
