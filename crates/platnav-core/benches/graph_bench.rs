//! # Graph Benchmarks
//!
//! Performance benchmarks for segmentation, graph construction and selection.
//!
//! Run with: `cargo bench -p platnav-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use platnav_core::{
    Coordinate, GraphBuilder, MoveSelector, Platform, PlatformId, PlatformKind, SegmentStore,
    StreamSegmenter, TerrainConfig,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;

/// Rows of ledges stacked 15px apart, each row offset by half a ledge.
fn create_tower(size: usize) -> SegmentStore {
    let mut store = SegmentStore::new();
    for i in 0..size {
        let row = (i / 8) as i32;
        let col = (i % 8) as i32;
        let x = col * 50 + (row % 2) * 25;
        let y = 2000 - row * 15;
        let platform = Platform::new(Coordinate::new(x, y), Coordinate::new(x + 40, y))
            .expect("platform");
        store.insert_platform(PlatformKind::Ordinary, platform);
    }
    store
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_segmentation(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmentation");

    for size in [1_000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let mut segmenter =
                    StreamSegmenter::new(TerrainConfig::default()).expect("segmenter");
                for i in 0..size {
                    let i = i as i32;
                    // 40px walks separated by 10px climbs
                    segmenter.observe(i % 40, (i / 40) * 10);
                }
                black_box(segmenter.finish())
            });
        });
    }

    group.finish();
}

fn bench_graph_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_build");

    for size in [50, 200, 800].iter() {
        let store = create_tower(*size);
        let builder = GraphBuilder::new(TerrainConfig::default());
        group.bench_with_input(BenchmarkId::from_parameter(size), &store, |b, store| {
            b.iter(|| black_box(builder.build(store)));
        });
    }

    group.finish();
}

fn bench_selection(c: &mut Criterion) {
    let store = create_tower(200);
    let graph = GraphBuilder::new(TerrainConfig::default()).build(&store);
    let mut selector = MoveSelector::new(graph, ChaCha8Rng::seed_from_u64(0));

    c.bench_function("select_and_mark", |b| {
        let mut current = PlatformId(0);
        b.iter(|| {
            if let Ok(edge) = selector.select(current) {
                selector.mark_visited(current, edge.to);
                current = edge.to;
            }
            black_box(current)
        });
    });
}

criterion_group!(
    benches,
    bench_segmentation,
    bench_graph_build,
    bench_selection
);
criterion_main!(benches);
