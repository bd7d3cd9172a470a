//! Criterion benchmarks for bankshot-payout hot paths.
//!
//! Covers: structure resolution, weight allocation, and full schedule computation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use bankshot_core::constants::{DOLLAR, MIN_PLAYERS};
use bankshot_core::traits::PayoutCalculator;
use bankshot_core::types::PayoutRequest;
use bankshot_payout::allocate::allocate;
use bankshot_payout::engine::PayoutEngine;
use bankshot_payout::structure::resolve;

fn bench_resolve(c: &mut Criterion) {
    c.bench_function("resolve_structure", |b| {
        b.iter(|| resolve(black_box(600), black_box(MIN_PLAYERS)))
    });
}

fn bench_allocate(c: &mut Criterion) {
    // Largest structure: all 15 tie groups.
    let groups = resolve(600, MIN_PLAYERS);
    let pool = 600 * 25 * DOLLAR;

    c.bench_function("allocate_weights", |b| {
        b.iter(|| allocate(black_box(&groups), black_box(pool), black_box(500)))
    });
}

fn bench_compute_small(c: &mut Criterion) {
    let engine = PayoutEngine::new();
    let request = PayoutRequest::new(20 * DOLLAR, 20);

    c.bench_function("compute_payouts_20_players", |b| {
        b.iter(|| engine.compute(black_box(&request)))
    });
}

fn bench_compute_large(c: &mut Criterion) {
    let engine = PayoutEngine::new();
    let request = PayoutRequest::new(25 * DOLLAR, 600).with_added_money(1_000 * DOLLAR);

    c.bench_function("compute_payouts_600_players", |b| {
        b.iter(|| engine.compute(black_box(&request)))
    });
}

criterion_group!(
    benches,
    bench_resolve,
    bench_allocate,
    bench_compute_small,
    bench_compute_large,
);
criterion_main!(benches);
