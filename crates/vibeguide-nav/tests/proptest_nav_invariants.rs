//! Property-based invariant tests for the grid index and move resolution.
//!
//! 1. The index holds exactly one cell per non-blank block, in row order.
//! 2. Rebuilding from the same inputs is idempotent.
//! 3. Moves are pure and always land on an existing cell.
//! 4. Edge moves clamp.
//! 5. Vertical moves prefer the block containing the source's left edge.
//! 6. Scroll requests make the target fully visible.
//! 7. Viewports shorter than a snap step still reveal the target.

use proptest::prelude::*;
use vibeguide_catalog::{Catalog, Category, Stream};
use vibeguide_core::rng::XorShift64;
use vibeguide_layout::{Layout, LayoutOptions, generate_layout};
use vibeguide_nav::{
    Direction, FocusedCell, GridIndex, GridMetrics, ViewportMetrics, resolve_move,
};

// ── Helpers ─────────────────────────────────────────────────────────────

fn catalog_strategy() -> impl Strategy<Value = Catalog> {
    prop::collection::vec(prop::collection::vec("[a-z]{1,16}", 0..5), 1..10).prop_map(|rows| {
        let categories = (0..rows.len())
            .map(|i| Category::new(i.to_string(), format!("Game {i}")))
            .collect();
        let mut catalog = Catalog::with_categories(categories);
        for (i, names) in rows.into_iter().enumerate() {
            let streams = names.iter().map(|n| Stream::new(n.as_str(), n.as_str())).collect();
            catalog.set_streams(i.to_string(), streams);
        }
        catalog
    })
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
        Just(Direction::Home),
        Just(Direction::End),
    ]
}

fn build(catalog: &Catalog, seed: u64, leading: bool) -> (Layout, GridIndex) {
    let options = LayoutOptions::default().leading_blank_rows(leading);
    let layout = generate_layout(catalog, &options, &mut XorShift64::new(seed));
    let index = GridIndex::build(&layout, catalog);
    (layout, index)
}

/// Any existing cell, chosen by two raw picks.
fn pick(index: &GridIndex, row: usize, block: usize) -> FocusedCell {
    let row_index = row % index.len();
    let cells = index.rows()[row_index].cells.len();
    FocusedCell::new(row_index, block % cells)
}

// ═════════════════════════════════════════════════════════════════════════
// 1-2. Completeness and idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn index_is_complete(catalog in catalog_strategy(), seed in any::<u64>(), leading in any::<bool>()) {
        let (layout, index) = build(&catalog, seed, leading);
        let content: Vec<_> = layout
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| !row.is_blank())
            .collect();
        prop_assert_eq!(index.len(), content.len());
        for (index_row, (actual, row)) in index.rows().iter().zip(content) {
            prop_assert_eq!(index_row.actual_row_index, actual);
            prop_assert_eq!(index_row.cells.len(), row.blocks.len());
            prop_assert_eq!(index.index_row_for_actual(actual).map(|r| &index.rows()[r]), Some(index_row));
            for (cell, block) in index_row.cells.iter().zip(&row.blocks) {
                prop_assert_eq!(cell.position, block.position);
                prop_assert_eq!(cell.width, block.width);
                prop_assert_eq!(cell.has_stream, cell.stream.is_some());
            }
        }
    }

    #[test]
    fn rebuild_is_idempotent(catalog in catalog_strategy(), seed in any::<u64>()) {
        let (layout, index) = build(&catalog, seed, true);
        prop_assert_eq!(GridIndex::build(&layout, &catalog), index);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3-5. Moves
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn moves_are_pure_and_land_on_cells(
        catalog in catalog_strategy(),
        seed in any::<u64>(),
        row in any::<usize>(),
        block in any::<usize>(),
        direction in direction_strategy(),
    ) {
        let (_, index) = build(&catalog, seed, false);
        let focus = pick(&index, row, block);
        let a = resolve_move(&index, focus, direction);
        let b = resolve_move(&index, focus, direction);
        prop_assert_eq!(a, b);
        prop_assert!(index.contains(a));
        if !direction.is_vertical() {
            prop_assert_eq!(a.row_index, focus.row_index);
        }
    }

    #[test]
    fn edges_clamp(catalog in catalog_strategy(), seed in any::<u64>(), row in any::<usize>()) {
        let (_, index) = build(&catalog, seed, false);
        let first = pick(&index, row, 0);
        prop_assert_eq!(resolve_move(&index, first, Direction::Left), first);
        let last = FocusedCell::new(first.row_index, index.rows()[first.row_index].cells.len() - 1);
        prop_assert_eq!(resolve_move(&index, last, Direction::Right), last);

        let top = pick(&index, 0, row);
        prop_assert_eq!(resolve_move(&index, top, Direction::Up), top);
        let bottom = pick(&index, index.len() - 1, row);
        prop_assert_eq!(resolve_move(&index, bottom, Direction::Down), bottom);
    }

    #[test]
    fn vertical_moves_prefer_containment(
        catalog in catalog_strategy(),
        seed in any::<u64>(),
        row in any::<usize>(),
        block in any::<usize>(),
    ) {
        let (_, index) = build(&catalog, seed, false);
        prop_assume!(index.len() > 1);
        let focus = pick(&index, row, block);
        let source = index.cell(focus).unwrap().position;
        let moved = if focus.row_index + 1 < index.len() {
            resolve_move(&index, focus, Direction::Down)
        } else {
            resolve_move(&index, focus, Direction::Up)
        };
        // rows all span the full width, so some block always contains the edge
        prop_assert!(index.cell(moved).unwrap().contains(source));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Scroll into view
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn scroll_request_reveals_cell(
        catalog in catalog_strategy(),
        seed in any::<u64>(),
        row in any::<usize>(),
        block in any::<usize>(),
        scroll_top in 0u32..2000,
        scroll_left in 0u32..2000,
    ) {
        let (_, index) = build(&catalog, seed, true);
        let grid = GridMetrics::default().row_height(20).unit_width(8);
        // viewport at least one snap step on each axis
        let viewport = ViewportMetrics::new(scroll_top, scroll_left, 160, 400);
        let cell = index.cell(pick(&index, row, block)).unwrap();
        let after = match grid.scroll_into_view(cell, &viewport, true) {
            Some(request) => ViewportMetrics::new(
                request.top.unwrap_or(scroll_top),
                request.left.unwrap_or(scroll_left),
                160,
                400,
            ),
            None => viewport,
        };
        let rect = grid.cell_rect(cell);
        prop_assert!(after.vertical().contains_span(&rect.vertical()));
        prop_assert!(after.horizontal().contains_span(&rect.horizontal()));
        if let Some(request) = grid.scroll_into_view(cell, &viewport, true) {
            if let Some(top) = request.top {
                prop_assert_eq!(top % (20 * 4), 0);
            }
            if let Some(left) = request.left {
                prop_assert_eq!(left % (8 * 4), 0);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Short viewports
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn short_viewport_still_reveals_cell(
        catalog in catalog_strategy(),
        seed in any::<u64>(),
        row in any::<usize>(),
        block in any::<usize>(),
        scroll_top in 0u32..2000,
        scroll_left in 0u32..2000,
        height in 1u32..80,
        width in 1u32..128,
    ) {
        let (_, index) = build(&catalog, seed, true);
        let grid = GridMetrics::default().row_height(20).unit_width(8);
        let viewport = ViewportMetrics::new(scroll_top, scroll_left, height, width);
        let cell = index.cell(pick(&index, row, block)).unwrap();
        let after = match grid.scroll_into_view(cell, &viewport, true) {
            Some(request) => ViewportMetrics::new(
                request.top.unwrap_or(scroll_top),
                request.left.unwrap_or(scroll_left),
                height,
                width,
            ),
            None => viewport,
        };
        let rect = grid.cell_rect(cell);
        for (target, visible) in [
            (rect.vertical(), after.vertical()),
            (rect.horizontal(), after.horizontal()),
        ] {
            if target.len <= visible.len {
                prop_assert!(visible.contains_span(&target), "{:?} hidden in {:?}", target, visible);
            } else {
                prop_assert!(visible.contains(target.start), "start of {:?} hidden in {:?}", target, visible);
            }
        }
    }
}
