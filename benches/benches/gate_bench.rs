//! # Gate Application Benchmarks
//!
//! Measures the block kernel: O(2^n · 2^k) per gate, so doubling the
//! register should roughly double the time for every arity.
//!
//! Run: `cargo bench --bench gate_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use qm_engine::StateEngine;
use qm_gates::Gate;

/// Registro em superposição uniforme (todas as amplitudes não nulas)
fn uniform(n: usize) -> StateEngine {
    let mut engine = StateEngine::new(n).unwrap();
    for q in 0..n {
        engine.apply_gate(&Gate::h(), &[q]).unwrap();
    }
    engine
}

/// Benchmark single-qubit gates across register sizes
fn bench_single_qubit(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_qubit");
    let rx = Gate::rx(0.3).unwrap();

    for n in [8usize, 12, 16, 20] {
        group.throughput(Throughput::Elements(1u64 << n));
        let mut engine = uniform(n);

        group.bench_with_input(BenchmarkId::new("h_low", n), &n, |b, _| {
            b.iter(|| engine.apply_gate(black_box(&Gate::h()), &[0]).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("h_high", n), &n, |b, &n| {
            b.iter(|| engine.apply_gate(black_box(&Gate::h()), &[n - 1]).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("rx", n), &n, |b, &n| {
            b.iter(|| engine.apply_gate(black_box(&rx), &[n / 2]).unwrap())
        });
    }

    group.finish();
}

/// Benchmark two- and three-qubit gates
fn bench_multi_qubit(c: &mut Criterion) {
    let mut group = c.benchmark_group("multi_qubit");
    let cphase = Gate::cphase(0.7).unwrap();

    for n in [8usize, 12, 16, 20] {
        group.throughput(Throughput::Elements(1u64 << n));
        let mut engine = uniform(n);

        group.bench_with_input(BenchmarkId::new("cnot", n), &n, |b, &n| {
            b.iter(|| engine.apply_gate(black_box(&Gate::cnot()), &[0, n - 1]).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("cphase", n), &n, |b, &n| {
            b.iter(|| engine.apply_gate(black_box(&cphase), &[n - 1, 1]).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("toffoli", n), &n, |b, &n| {
            b.iter(|| engine.apply_gate(black_box(&Gate::toffoli()), &[0, n / 2, n - 1]).unwrap())
        });
    }

    group.finish();
}

/// Benchmark the custom-gate path (unitarity re-check on every application)
fn bench_custom_gate(c: &mut Criterion) {
    let mut group = c.benchmark_group("custom_gate");
    let custom = Gate::custom("my_h", Gate::h().matrix(), 1e-10).unwrap();

    for n in [8usize, 16] {
        let mut engine = uniform(n);
        group.bench_with_input(BenchmarkId::new("custom_h", n), &n, |b, _| {
            b.iter(|| engine.apply_gate(black_box(&custom), &[0]).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("standard_h", n), &n, |b, _| {
            b.iter(|| engine.apply_gate(black_box(&Gate::h()), &[0]).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_qubit, bench_multi_qubit, bench_custom_gate);

criterion_main!(benches);
