//! Criterion benchmarks for the TradeTrack pipeline.
//!
//! Benchmarks:
//! 1. Timestamp grammar (single cell)
//! 2. Full parse (normalize + sequence + project) over growing ledgers

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use tradetrack_core::datetime::parse_combined;
use tradetrack_core::{parse, RawRow};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_rows(n: usize) -> Vec<RawRow> {
    (0..n)
        .map(|i| {
            // Reverse-chronological input so the sort has real work to do.
            let day = 28 - (i % 28) as u32;
            let month = 12 - ((i / 28) % 12) as u32;
            let hour = 1 + (i % 12) as u32;
            let period = if i % 2 == 0 { "AM" } else { "PM" };
            RawRow::new()
                .with("SYMBOL", format!("SYM{}", i % 50))
                .with("DateTime", format!("{month}/{day}/24 {hour}:{:02} {period}", i % 60))
                .with("value", (i as f64 * 0.37).sin() * 250.0)
        })
        .collect()
}

// ── 1. Timestamp Grammar ─────────────────────────────────────────────

fn bench_timestamp(c: &mut Criterion) {
    c.bench_function("parse_combined_timestamp", |b| {
        b.iter(|| parse_combined(black_box("12/31/24 11:59 PM")))
    });
}

// ── 2. Full Parse ────────────────────────────────────────────────────

fn bench_full_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_parse");

    for &row_count in &[100, 1_000, 10_000] {
        let rows = make_rows(row_count);
        group.bench_with_input(BenchmarkId::new("rows", row_count), &rows, |b, rows| {
            b.iter(|| parse(black_box(rows), black_box(10_000.0)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_timestamp, bench_full_parse);
criterion_main!(benches);
