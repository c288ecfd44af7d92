//! # Circuit Benchmarks
//!
//! End-to-end runs of the built-in templates, including record parsing.
//!
//! Run: `cargo bench --bench circuit_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qm_circuit::{ghz, qft, CircuitRecord};
use qm_engine::StateEngine;

/// Benchmark template circuits
fn bench_templates(c: &mut Criterion) {
    let mut group = c.benchmark_group("templates");

    for n in [4usize, 8, 12] {
        let ghz_circuit = ghz(n).unwrap();
        let qft_circuit = qft(n).unwrap();

        group.bench_with_input(BenchmarkId::new("ghz", n), &ghz_circuit, |b, circuit| {
            b.iter(|| {
                let mut engine = StateEngine::new(n).unwrap();
                circuit.run(&mut engine).unwrap();
                black_box(engine)
            })
        });
        group.bench_with_input(BenchmarkId::new("qft", n), &qft_circuit, |b, circuit| {
            b.iter(|| {
                let mut engine = StateEngine::new(n).unwrap();
                circuit.run(&mut engine).unwrap();
                black_box(engine)
            })
        });
    }

    group.finish();
}

/// Benchmark record parsing and conversion
fn bench_records(c: &mut Criterion) {
    let mut group = c.benchmark_group("records");
    let record = CircuitRecord::from_circuit(&qft(8).unwrap(), 8);
    let json = record.to_json_string().unwrap();
    let toml = record.to_toml_string().unwrap();

    group.bench_function("parse_json", |b| {
        b.iter(|| black_box(CircuitRecord::from_json_str(&json).unwrap()))
    });
    group.bench_function("parse_toml", |b| {
        b.iter(|| black_box(CircuitRecord::from_toml_str(&toml).unwrap()))
    });
    group.bench_function("to_circuit", |b| {
        b.iter(|| black_box(record.to_circuit().unwrap()))
    });

    group.finish();
}

criterion_group!(benches, bench_templates, bench_records);

criterion_main!(benches);
