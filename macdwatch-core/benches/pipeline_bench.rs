//! Criterion benchmarks for the scan hot path.
//!
//! Benchmarks:
//! 1. MACD line from closes
//! 2. Signal line construction (one EMA per output position)
//! 3. Full inversion analysis (signal line + detection + classification)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use macdwatch_core::domain::MacdParams;
use macdwatch_core::indicators::macd_line;
use macdwatch_core::signal::{analyze, build_signal_line, InversionParams, SignalLineParams};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_closes(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0 + i as f64 * 0.02)
        .collect()
}

fn make_oscillator(n: usize) -> Vec<f64> {
    (0..n).map(|i| (i as f64 * 0.15).sin() * 2.0).collect()
}

// ── 1. MACD line ─────────────────────────────────────────────────────

fn bench_macd_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("macd_line");
    let standard = MacdParams::new(5, 35, 5);
    let weekly = MacdParams::new(60, 130, 45);

    for &len in &[252, 1260, 5000] {
        let closes = make_closes(len);
        group.bench_with_input(BenchmarkId::new("standard", len), &len, |b, _| {
            b.iter(|| macd_line(black_box(&closes), black_box(&standard)));
        });
        group.bench_with_input(BenchmarkId::new("weekly", len), &len, |b, _| {
            b.iter(|| macd_line(black_box(&closes), black_box(&weekly)));
        });
    }

    group.finish();
}

// ── 2. Signal line ───────────────────────────────────────────────────

fn bench_signal_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("signal_line");
    let params = SignalLineParams::default();

    for &len in &[200, 1260, 5000] {
        let osc = make_oscillator(len);
        group.bench_with_input(BenchmarkId::new("default", len), &len, |b, _| {
            b.iter(|| build_signal_line(black_box(&osc), black_box(&params)));
        });
    }

    group.finish();
}

// ── 3. Full analysis ─────────────────────────────────────────────────

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    let params = InversionParams::default();

    for &len in &[200, 1260, 5000] {
        let osc = make_oscillator(len);
        group.bench_with_input(BenchmarkId::new("default", len), &len, |b, _| {
            b.iter(|| analyze(black_box(&osc), black_box(&params)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_macd_line, bench_signal_line, bench_analyze);
criterion_main!(benches);
