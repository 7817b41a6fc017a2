//! Criterion micro-benchmarks for the free-list allocator.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use mnemo_arena::{Arena, ArenaConfig};
use mnemo_bench::element_size;

/// Build a 1 MiB arena.
fn make_arena() -> Arena {
    Arena::new(&ArenaConfig::default()).unwrap()
}

/// Benchmark: first-fit allocation of 1K blocks into an empty arena.
fn bench_allocate_1k(c: &mut Criterion) {
    c.bench_function("arena_allocate_1k", |b| {
        b.iter(|| {
            let mut arena = make_arena();
            for i in 0..1_000 {
                black_box(arena.allocate_block(element_size(i)).unwrap());
            }
        });
    });
}

/// Benchmark: release 1K blocks in reverse order, coalescing each time.
fn bench_release_coalesce_1k(c: &mut Criterion) {
    c.bench_function("arena_release_coalesce_1k", |b| {
        b.iter(|| {
            let mut arena = make_arena();
            let blocks: Vec<(usize, usize)> = (0..1_000)
                .map(|i| (arena.allocate_block(element_size(i)).unwrap(), element_size(i)))
                .collect();
            for (offset, size) in blocks.into_iter().rev() {
                arena.destroy_block(offset, size).unwrap();
            }
            black_box(arena.free_blocks().len());
        });
    });
}

/// Benchmark: first-fit search past a fragmented prefix.
fn bench_first_fit_fragmented(c: &mut Criterion) {
    let mut arena = make_arena();
    let blocks: Vec<usize> = (0..2_000).map(|_| arena.allocate_block(16).unwrap()).collect();
    for offset in blocks.iter().step_by(2) {
        arena.destroy_block(*offset, 16).unwrap();
    }
    c.bench_function("arena_first_fit_fragmented", |b| {
        b.iter(|| {
            let offset = arena.allocate_block(black_box(64)).unwrap();
            arena.destroy_block(offset, 64).unwrap();
        });
    });
}

criterion_group!(
    benches,
    bench_allocate_1k,
    bench_release_coalesce_1k,
    bench_first_fit_fragmented
);
criterion_main!(benches);
