#![forbid(unsafe_code)]

//! Row and layout generation.
//!
//! # Row algorithm
//!
//! Walk the row left to right, placing one block per slot until the row is
//! full:
//!
//! - Off an alignment boundary the block is forced to width 1, so wide blocks
//!   only ever start on multiples of `alignment` (and in particular never one
//!   unit before a boundary).
//! - On a boundary the width comes from the slot's item (content mode) or from
//!   the random source (random mode). Random rolls are only drawn on
//!   boundaries, so scripted rolls map one-to-one onto aligned blocks.
//! - The final block is clipped so the row sums to exactly `max_width`.
//!
//! # Layout algorithm
//!
//! `[leading blanks] + one row per category + [trailing blanks]`. Every
//! `repeat_interval`-th content row (except the first) reuses the previous
//! row's shape with sequential stream slots, unless the previous row is blank.

use vibeguide_catalog::Catalog;
use vibeguide_core::rng::RandomSource;

use crate::block::{Block, BlockId, Layout, Row};
use crate::config::{LayoutOptions, RowConfig};
use crate::weight::Weighted;

/// Generate the blocks of one content row.
///
/// With a non-empty `items`, slot `n` is bound to item `n % items.len()` and
/// sized by its weight. With an empty `items`, widths are drawn from
/// `config.random_widths` and slots are numbered sequentially.
pub fn generate_row_blocks<W, R>(
    row: u32,
    items: &[W],
    config: &RowConfig,
    rng: &mut R,
) -> Vec<Block>
where
    W: Weighted,
    R: RandomSource + ?Sized,
{
    let max_width = config.max_width;
    let alignment = config.alignment.max(1);
    let mut blocks = Vec::new();
    let mut position: u16 = 0;
    let mut slot: usize = 0;

    while position < max_width {
        let remaining = max_width - position;
        let stream_index = if items.is_empty() {
            slot
        } else {
            slot % items.len()
        };
        let preferred = if position % alignment != 0 {
            1
        } else if items.is_empty() {
            random_width(config, rng)
        } else {
            config.tiers.width_for(items[stream_index].weight())
        };
        let width = preferred.clamp(1, remaining);

        blocks.push(Block::content(
            BlockId::new(row, slot as u32),
            position,
            width,
            stream_index,
        ));
        position += width;
        slot += 1;
    }

    vibeguide_core::trace!(
        row,
        blocks = blocks.len(),
        content = !items.is_empty(),
        "generated row"
    );
    blocks
}

fn random_width<R: RandomSource + ?Sized>(config: &RowConfig, rng: &mut R) -> u16 {
    if config.random_widths.is_empty() {
        return config.alignment.max(1);
    }
    config.random_widths[rng.pick_index(config.random_widths.len())]
}

/// Copy `previous`'s shape into a new row with sequential stream slots.
fn repeat_row_blocks(row: u32, previous: &Row) -> Vec<Block> {
    previous
        .blocks
        .iter()
        .enumerate()
        .map(|(slot, block)| {
            Block::content(
                BlockId::new(row, slot as u32),
                block.position,
                block.width,
                slot,
            )
        })
        .collect()
}

/// Generate the full layout for `catalog`.
///
/// Each category's row is sized by its streams; a category without streams
/// gets a random-width row whose cells resolve to "no stream".
pub fn generate_layout<R>(catalog: &Catalog, options: &LayoutOptions, rng: &mut R) -> Layout
where
    R: RandomSource + ?Sized,
{
    let max_width = options.row.max_width;
    let leading = if options.include_leading_blank_rows {
        options.blank_row_count
    } else {
        0
    };
    let mut rows: Vec<Row> =
        Vec::with_capacity(leading + catalog.len() + options.blank_row_count);

    for _ in 0..leading {
        let id = rows.len() as u32;
        rows.push(Row::blank(id, max_width));
    }

    for (category_index, category) in catalog.categories().iter().enumerate() {
        let id = rows.len() as u32;
        let repeat = options.repeat_interval > 0
            && category_index > 0
            && category_index % options.repeat_interval == 0;
        let blocks = match rows.last() {
            Some(previous) if repeat && !previous.is_blank() => repeat_row_blocks(id, previous),
            _ => generate_row_blocks(id, catalog.streams_for(&category.id), &options.row, rng),
        };
        rows.push(Row::content(category_index, blocks));
    }

    for _ in 0..options.blank_row_count {
        let id = rows.len() as u32;
        rows.push(Row::blank(id, max_width));
    }

    vibeguide_core::debug!(
        rows = rows.len(),
        categories = catalog.len(),
        leading,
        "generated layout"
    );
    Layout::new(rows, leading, max_width)
}
