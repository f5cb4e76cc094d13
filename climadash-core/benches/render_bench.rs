//! Criterion benchmarks for the load and render paths.
//!
//! Benchmarks:
//! 1. Ingest of the synthetic payload (CSV parse + category filter)
//! 2. Render over several year-range widths

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use climadash_core::data::{parse_table, DatasetSource, SyntheticSource};
use climadash_core::view::{render_range, YearRange};

fn bench_ingest(c: &mut Criterion) {
    let raw = SyntheticSource::new(42).fetch().expect("synthetic payload");
    c.bench_function("ingest_synthetic", |b| {
        b.iter(|| parse_table(black_box(&raw), "World").expect("parse"))
    });
}

fn bench_render(c: &mut Criterion) {
    let raw = SyntheticSource::new(42).fetch().expect("synthetic payload");
    let table = parse_table(&raw, "World").expect("parse");

    let mut group = c.benchmark_group("render");
    for width in [10, 120, 270] {
        let range = YearRange::new(2020 - width, 2020);
        group.bench_with_input(BenchmarkId::from_parameter(width), &range, |b, range| {
            b.iter(|| render_range(black_box(&table), *range))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_ingest, bench_render);
criterion_main!(benches);
