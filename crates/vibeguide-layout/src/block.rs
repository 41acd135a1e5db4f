#![forbid(unsafe_code)]

//! Blocks, rows, and the full layout.
//!
//! # Invariants
//!
//! 1. Within a row, blocks are contiguous and non-overlapping: block `n`
//!    starts at the sum of the widths of blocks `0..n`.
//! 2. Every row's widths sum to exactly the layout's `max_width`.
//! 3. No block has zero width.
//! 4. A blank row is a single full-width block with `is_blank` set.

use std::fmt;

use vibeguide_core::geometry::Span;

/// Stable identity of a block: its layout row and slot within that row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId {
    pub row: u32,
    pub slot: u32,
}

impl BlockId {
    #[must_use]
    pub const fn new(row: u32, slot: u32) -> Self {
        Self { row, slot }
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}-b{}", self.row, self.slot)
    }
}

/// One cell-span within a grid row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    pub id: BlockId,
    /// Width in grid units.
    pub width: u16,
    /// Starting grid-unit offset within the row.
    pub position: u16,
    /// Index into the row's stream list; `None` for blank blocks.
    pub stream_index: Option<usize>,
    pub is_blank: bool,
}

impl Block {
    /// A content block bound to stream slot `stream_index`.
    #[must_use]
    pub const fn content(id: BlockId, position: u16, width: u16, stream_index: usize) -> Self {
        Self {
            id,
            width,
            position,
            stream_index: Some(stream_index),
            is_blank: false,
        }
    }

    /// A blank filler block.
    #[must_use]
    pub const fn blank(id: BlockId, position: u16, width: u16) -> Self {
        Self {
            id,
            width,
            position,
            stream_index: None,
            is_blank: true,
        }
    }

    /// Exclusive end offset.
    #[must_use]
    pub const fn end(&self) -> u16 {
        self.position.saturating_add(self.width)
    }

    /// Unit span `[position, position + width)`.
    #[must_use]
    pub const fn span(&self) -> Span {
        Span::new(self.position as u32, self.width as u32)
    }
}

/// What a row is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKind {
    /// Padding / loop boundary.
    Blank,
    /// Bound to the category at this rank position.
    Content { category_index: usize },
}

/// An ordered list of blocks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Row {
    pub kind: RowKind,
    pub blocks: Vec<Block>,
}

impl Row {
    /// A full-width blank row.
    #[must_use]
    pub fn blank(row: u32, max_width: u16) -> Self {
        Self {
            kind: RowKind::Blank,
            blocks: vec![Block::blank(BlockId::new(row, 0), 0, max_width)],
        }
    }

    /// A content row for `category_index`.
    #[must_use]
    pub fn content(category_index: usize, blocks: Vec<Block>) -> Self {
        Self {
            kind: RowKind::Content { category_index },
            blocks,
        }
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self.kind, RowKind::Blank)
    }

    /// Category bound to this row, if any.
    #[must_use]
    pub fn category_index(&self) -> Option<usize> {
        match self.kind {
            RowKind::Content { category_index } => Some(category_index),
            RowKind::Blank => None,
        }
    }

    /// Sum of block widths.
    #[must_use]
    pub fn total_width(&self) -> u32 {
        self.blocks.iter().map(|b| u32::from(b.width)).sum()
    }

    /// `(position, width)` pairs, the row's shape without bindings.
    #[must_use]
    pub fn shape(&self) -> Vec<(u16, u16)> {
        self.blocks.iter().map(|b| (b.position, b.width)).collect()
    }
}

/// A broken structural invariant, reported by [`Layout::verify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutDefect {
    /// Widths do not sum to `max_width`.
    RowWidth { row: usize, total: u32 },
    /// Block does not start where its predecessor ends.
    Gap { row: usize, block: usize },
    ZeroWidth { row: usize, block: usize },
    /// Wide block starting off an alignment boundary.
    Misaligned { row: usize, block: usize },
    /// Blank row with anything but one blank block.
    MalformedBlankRow { row: usize },
}

impl fmt::Display for LayoutDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RowWidth { row, total } => write!(f, "row {row} sums to {total}"),
            Self::Gap { row, block } => write!(f, "row {row} block {block} is not contiguous"),
            Self::ZeroWidth { row, block } => write!(f, "row {row} block {block} has zero width"),
            Self::Misaligned { row, block } => {
                write!(f, "row {row} block {block} is wide but off-boundary")
            }
            Self::MalformedBlankRow { row } => write!(f, "blank row {row} is malformed"),
        }
    }
}

impl std::error::Error for LayoutDefect {}

/// The full ordered list of rows for one session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Layout {
    rows: Vec<Row>,
    leading_blank_rows: usize,
    max_width: u16,
}

impl Layout {
    /// Assemble a layout. Callers are expected to uphold the module invariants;
    /// [`Layout::verify`] checks them.
    #[must_use]
    pub fn new(rows: Vec<Row>, leading_blank_rows: usize, max_width: u16) -> Self {
        Self {
            rows,
            leading_blank_rows,
            max_width,
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of blank rows before the first content row.
    #[must_use]
    pub fn leading_blank_rows(&self) -> usize {
        self.leading_blank_rows
    }

    #[must_use]
    pub fn max_width(&self) -> u16 {
        self.max_width
    }

    /// Number of content rows.
    #[must_use]
    pub fn content_row_count(&self) -> usize {
        self.rows.iter().filter(|row| !row.is_blank()).count()
    }

    /// Check the structural invariants against `alignment`.
    pub fn verify(&self, alignment: u16) -> Result<(), LayoutDefect> {
        let alignment = alignment.max(1);
        for (r, row) in self.rows.iter().enumerate() {
            if row.is_blank() {
                let well_formed = matches!(
                    row.blocks.as_slice(),
                    [block] if block.is_blank && block.position == 0 && block.width == self.max_width
                );
                if !well_formed {
                    return Err(LayoutDefect::MalformedBlankRow { row: r });
                }
                continue;
            }
            let mut expected = 0u16;
            for (b, block) in row.blocks.iter().enumerate() {
                if block.width == 0 {
                    return Err(LayoutDefect::ZeroWidth { row: r, block: b });
                }
                if block.position != expected {
                    return Err(LayoutDefect::Gap { row: r, block: b });
                }
                if block.width > 1 && block.position % alignment != 0 {
                    return Err(LayoutDefect::Misaligned { row: r, block: b });
                }
                expected = block.end();
            }
            let total = row.total_width();
            if total != u32::from(self.max_width) {
                return Err(LayoutDefect::RowWidth { row: r, total });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_of(widths: &[u16]) -> Row {
        let mut position = 0;
        let blocks = widths
            .iter()
            .enumerate()
            .map(|(i, &w)| {
                let block = Block::content(BlockId::new(0, i as u32), position, w, i);
                position += w;
                block
            })
            .collect();
        Row::content(0, blocks)
    }

    #[test]
    fn blank_row_shape() {
        let row = Row::blank(2, 45);
        assert!(row.is_blank());
        assert_eq!(row.category_index(), None);
        assert_eq!(row.shape(), vec![(0, 45)]);
        assert_eq!(row.blocks[0].stream_index, None);
    }

    #[test]
    fn block_span_and_id_display() {
        let block = Block::content(BlockId::new(3, 1), 6, 3, 1);
        assert_eq!(block.span(), Span::new(6, 3));
        assert_eq!(block.end(), 9);
        assert_eq!(block.id.to_string(), "r3-b1");
    }

    #[test]
    fn verify_accepts_valid_layout() {
        let layout = Layout::new(vec![Row::blank(0, 9), row_of(&[3, 1, 1, 1, 3])], 1, 9);
        assert_eq!(layout.verify(3), Ok(()));
        assert_eq!(layout.content_row_count(), 1);
    }

    #[test]
    fn verify_reports_short_row() {
        let layout = Layout::new(vec![row_of(&[3, 3])], 0, 9);
        assert_eq!(
            layout.verify(3),
            Err(LayoutDefect::RowWidth { row: 0, total: 6 })
        );
    }

    #[test]
    fn verify_reports_misaligned_wide_block() {
        let layout = Layout::new(vec![row_of(&[1, 2, 6])], 0, 9);
        assert_eq!(
            layout.verify(3),
            Err(LayoutDefect::Misaligned { row: 0, block: 1 })
        );
    }

    #[test]
    fn verify_reports_gap() {
        let mut row = row_of(&[3, 3, 3]);
        row.blocks[1].position = 4;
        let layout = Layout::new(vec![row], 0, 9);
        assert_eq!(layout.verify(3), Err(LayoutDefect::Gap { row: 0, block: 1 }));
    }

    #[test]
    fn verify_reports_malformed_blank_row() {
        let layout = Layout::new(vec![Row::blank(0, 6)], 0, 9);
        assert_eq!(
            layout.verify(3),
            Err(LayoutDefect::MalformedBlankRow { row: 0 })
        );
    }
}
