//! Criterion benchmarks for both rankers.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package lunchpick-scorer
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use lunchpick_scorer::RankingMode;

mod bench_support;

use bench_support::{BENCHMARK_SEED, generate_catalog, generate_preferences};

/// Catalog sizes to benchmark.
const CATALOG_SIZES: &[usize] = &[10, 100, 1_000];

fn bench_rankers(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");
    let preferences = generate_preferences(BENCHMARK_SEED);

    for &size in CATALOG_SIZES {
        let catalog = generate_catalog(size, BENCHMARK_SEED);
        group.throughput(Throughput::Elements(size as u64));
        for mode in [RankingMode::Weighted, RankingMode::Directional] {
            group.bench_with_input(
                BenchmarkId::new(format!("{mode:?}"), size),
                &catalog,
                |b, catalog| {
                    b.iter(|| {
                        mode.rank(catalog, &preferences)
                            .unwrap_or_else(|err| panic!("benchmark ranking failed: {err}"))
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_rankers);
criterion_main!(benches);
