//! # Measurement Benchmarks
//!
//! Collapse is O(2^n) per call; shot sampling builds the cumulative
//! distribution once and pays O(n) per shot.
//!
//! Run: `cargo bench --bench measure_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qm_engine::StateEngine;
use qm_gates::Gate;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn uniform(n: usize) -> StateEngine {
    let mut engine = StateEngine::new(n).unwrap();
    for q in 0..n {
        engine.apply_gate(&Gate::h(), &[q]).unwrap();
    }
    engine
}

/// Benchmark destructive measurement (clone + collapse)
fn bench_measure(c: &mut Criterion) {
    let mut group = c.benchmark_group("measure");
    let mut rng = StdRng::seed_from_u64(42);

    for n in [8usize, 12, 16] {
        let engine = uniform(n);

        group.bench_with_input(BenchmarkId::new("one_qubit", n), &engine, |b, e| {
            b.iter(|| {
                let mut e = e.clone();
                black_box(e.measure(&[0], &mut rng).unwrap())
            })
        });
        group.bench_with_input(BenchmarkId::new("all_qubits", n), &engine, |b, e| {
            b.iter(|| {
                let mut e = e.clone();
                black_box(e.measure_all(&mut rng).unwrap())
            })
        });
    }

    group.finish();
}

/// Benchmark non-destructive shot sampling
fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample_counts");
    let mut rng = StdRng::seed_from_u64(7);

    for shots in [100usize, 1_000, 10_000] {
        let engine = uniform(12);
        group.bench_with_input(BenchmarkId::new("12q", shots), &shots, |b, &shots| {
            b.iter(|| black_box(engine.sample_counts(shots, &mut rng).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark read-only accessors
fn bench_readout(c: &mut Criterion) {
    let mut group = c.benchmark_group("readout");

    for n in [8usize, 16] {
        let engine = uniform(n);
        group.bench_with_input(BenchmarkId::new("probabilities", n), &engine, |b, e| {
            b.iter(|| black_box(e.probabilities()))
        });
        group.bench_with_input(BenchmarkId::new("bloch_vector", n), &engine, |b, e| {
            b.iter(|| black_box(e.bloch_vector(0).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_measure, bench_sampling, bench_readout);

criterion_main!(benches);
