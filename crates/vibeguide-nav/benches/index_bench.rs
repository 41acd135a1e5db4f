//! Benchmarks for grid index builds and move resolution.
//!
//! Run with: cargo bench -p vibeguide-nav --bench index_bench

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use vibeguide_catalog::{Catalog, Category, Stream};
use vibeguide_core::rng::XorShift64;
use vibeguide_layout::{LayoutOptions, generate_layout};
use vibeguide_nav::{Direction, FocusedCell, GridIndex, resolve_move};

fn make_catalog(categories: usize) -> Catalog {
    let list = (0..categories)
        .map(|i| Category::new(i.to_string(), format!("Game {i}")))
        .collect();
    let mut catalog = Catalog::with_categories(list);
    for i in 0..categories {
        let streams = (0..20)
            .map(|s| Stream::new(format!("user{s}"), format!("Streamer_{}", "x".repeat(s % 14))))
            .collect();
        catalog.set_streams(i.to_string(), streams);
    }
    catalog
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index/build");
    let options = LayoutOptions::default().leading_blank_rows(true);
    for categories in [20usize, 100] {
        let catalog = make_catalog(categories);
        let layout = generate_layout(&catalog, &options, &mut XorShift64::new(1));
        group.throughput(Throughput::Elements(categories as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(categories),
            &(layout, catalog),
            |b, (layout, catalog)| b.iter(|| black_box(GridIndex::build(layout, catalog))),
        );
    }
    group.finish();
}

fn bench_moves(c: &mut Criterion) {
    let catalog = make_catalog(100);
    let layout = generate_layout(&catalog, &LayoutOptions::default(), &mut XorShift64::new(1));
    let index = GridIndex::build(&layout, &catalog);

    c.bench_function("index/walk_down", |b| {
        b.iter(|| {
            let mut focus = FocusedCell::new(0, 3);
            for _ in 0..index.len() {
                focus = resolve_move(&index, focus, Direction::Down);
            }
            black_box(focus)
        });
    });
}

criterion_group!(benches, bench_build, bench_moves);
criterion_main!(benches);
