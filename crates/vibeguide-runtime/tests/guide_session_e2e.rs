//! Guide end-to-end tests.
//!
//! ```sh
//! cargo test -p vibeguide-runtime --test guide_session_e2e
//! ```
//!
//! # Invariants
//!
//! 1. **Replay**: a snapshot file drives the same grid as the live catalog
//! 2. **Idempotent rebuild**: same seed + same data → same layout and index
//! 3. **Last write wins**: superseded fetches never change the grid
//! 4. **Focus safety**: focus never points at a missing cell after a reload
//! 5. **Session flags**: a toggle persisted in one session shapes the next

#![cfg(test)]

use std::sync::Arc;

use proptest::prelude::*;
use tempfile::TempDir;
use vibeguide_catalog::{Catalog, Category, ResilientSource, Snapshot, SnapshotSource, Stream};
use vibeguide_core::event::{Event, KeyCode, KeyEvent};
use vibeguide_nav::{GridIndex, HeadlessViewport};
use vibeguide_runtime::{Guide, GuideConfig, MemoryStorage, SessionFlags, SessionStore};

// ============================================================================
// Fixtures
// ============================================================================

fn catalog(categories: usize) -> Catalog {
    let list = (0..categories)
        .map(|i| Category::new(format!("{}", 1000 + i), format!("Game {i}")))
        .collect();
    let mut catalog = Catalog::with_categories(list);
    for i in 0..categories {
        let streams = (0..(i % 4))
            .map(|s| Stream::new(format!("user{i}_{s}"), format!("User {i}.{s}")).with_viewers(s as u64))
            .collect();
        catalog.set_streams(format!("{}", 1000 + i), streams);
    }
    catalog
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code))
}

// ============================================================================
// 1. Replay
// ============================================================================

#[test]
fn snapshot_replay_matches_live_catalog() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("snapshot.json");
    let live = catalog(6);
    Snapshot::from_catalog(&live).save(&path).unwrap();

    let config = GuideConfig::default().seed(42);
    let mut replayed = Guide::new(config.clone(), SessionFlags::default()).unwrap();
    replayed.load(&ResilientSource::new(SnapshotSource::open(&path).unwrap()));

    let mut direct = Guide::new(config, SessionFlags::default()).unwrap();
    let ticket = direct.begin_fetch();
    direct.apply_categories(ticket, live.categories().to_vec());
    let batch = live
        .categories()
        .iter()
        .map(|c| {
            let mut streams = live.streams_for(&c.id).to_vec();
            streams.sort_by(|a, b| b.viewer_count.cmp(&a.viewer_count));
            (c.id.clone(), streams)
        })
        .collect();
    direct.apply_stream_batch(ticket, batch);

    assert_eq!(replayed.layout(), direct.layout());
    assert_eq!(replayed.index(), direct.index());
}

// ============================================================================
// 3-4. Ordering and focus
// ============================================================================

#[test]
fn superseded_fetch_cannot_overwrite() {
    let mut guide = Guide::new(GuideConfig::default().seed(7), SessionFlags::default()).unwrap();
    let slow = guide.begin_fetch();
    let fast = guide.begin_fetch();

    assert!(guide.apply_categories(fast, catalog(3).categories().to_vec()));
    let before = guide.index().clone();
    assert!(!guide.apply_categories(slow, catalog(9).categories().to_vec()));
    assert_eq!(guide.index(), &before);
}

#[test]
fn navigation_survives_shrinking_reload() {
    let mut guide = Guide::new(GuideConfig::default().seed(1), SessionFlags::default()).unwrap();
    guide.load(&ResilientSource::new(SnapshotSource::from_snapshot(
        Snapshot::from_catalog(&catalog(8)),
    )));
    let mut viewport = HeadlessViewport::new(4000, 4000);
    for _ in 0..8 {
        guide.handle_event(&key(KeyCode::Down), &mut viewport);
    }
    assert_eq!(guide.navigator().focus().map(|f| f.row_index), Some(7));

    guide.load(&ResilientSource::new(SnapshotSource::from_snapshot(
        Snapshot::from_catalog(&catalog(2)),
    )));
    assert_eq!(guide.navigator().focus(), None);

    // next key re-anchors instead of moving
    guide.handle_event(&key(KeyCode::Right), &mut viewport);
    assert_eq!(guide.navigator().focus().map(|f| (f.row_index, f.block_index)), Some((0, 0)));
}

// ============================================================================
// 5. Session flags
// ============================================================================

#[test]
fn toggle_persists_across_sessions() {
    let backend = Arc::new(MemoryStorage::new());
    let store = || SessionStore::new(Box::new(Arc::clone(&backend)));

    let mut first = Guide::from_session(GuideConfig::default().seed(0), store()).unwrap();
    assert!(!first.flags().include_leading_blank_rows);
    first.set_include_leading_blank_rows(true);
    drop(first);

    let second = Guide::from_session(GuideConfig::default().seed(0), store()).unwrap();
    assert!(second.flags().include_leading_blank_rows);
    assert_eq!(second.layout().leading_blank_rows(), 4);
}

// ============================================================================
// 2. Idempotent rebuild
// ============================================================================

proptest! {
    #[test]
    fn same_seed_same_grid(categories in 0usize..12, seed in any::<u64>(), leading in any::<bool>()) {
        let flags = SessionFlags { include_leading_blank_rows: leading, hide_mature: false };
        let source = Snapshot::from_catalog(&catalog(categories));
        let build = || {
            let mut guide = Guide::new(GuideConfig::default().seed(seed), flags).unwrap();
            guide.load(&ResilientSource::new(SnapshotSource::from_snapshot(source.clone())));
            guide
        };
        let (a, b) = (build(), build());
        prop_assert_eq!(a.layout(), b.layout());
        prop_assert_eq!(a.index(), b.index());
        prop_assert_eq!(GridIndex::build(a.layout(), a.catalog()), a.index().clone());
        prop_assert_eq!(a.index().len(), categories);
    }
}
