//! Benchmark for the lazy container shapes vs. eager standard collections.
//!
//! Measures the cost of realization from a deferred source, lazy pipelines
//! against eager loops, and the realized set algebra.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use lazy_collections::prelude::*;
use std::hint::black_box;

// =============================================================================
// Realization Benchmark
// =============================================================================

fn benchmark_realization(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("realization");

    for size in [100, 1_000, 10_000] {
        // Deferred construction + forced realization
        group.bench_with_input(
            BenchmarkId::new("Sequence::from_source", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let sequence = Sequence::from_source(Source::named("bench", 0..size));
                    black_box(sequence.len())
                });
            },
        );

        // Eager construction from a collected Vec
        group.bench_with_input(
            BenchmarkId::new("Sequence::from_elements", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let sequence = Sequence::from_elements((0..size).collect());
                    black_box(sequence.len())
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// Pipeline Benchmark
// =============================================================================

fn benchmark_pipeline(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("map_filter_pipeline");

    for size in [100, 1_000, 10_000] {
        group.bench_with_input(
            BenchmarkId::new("Sequence", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let result = Sequence::from_source(Source::named("bench", 0..size))
                        .map(|x| x * 2)
                        .filter(|x| x % 3 != 0);
                    black_box(result.to_vec())
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let result: Vec<i32> =
                    (0..size).map(|x| x * 2).filter(|x| x % 3 != 0).collect();
                black_box(result)
            });
        });
    }

    group.finish();
}

// =============================================================================
// Set Algebra Benchmark
// =============================================================================

fn benchmark_set_algebra(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("set_algebra");

    for size in [100, 1_000, 10_000] {
        let left: UniqueSet<i32> = (0..size).collect();
        let right: UniqueSet<i32> = (size / 2..size + size / 2).collect();

        group.bench_with_input(
            BenchmarkId::new("union", size),
            &(&left, &right),
            |bencher, (left, right)| {
                bencher.iter(|| black_box(left.union(right)));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("intersect", size),
            &(&left, &right),
            |bencher, (left, right)| {
                bencher.iter(|| black_box(left.intersect(right)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_realization,
    benchmark_pipeline,
    benchmark_set_algebra
);
criterion_main!(benches);
