//! Benchmarks for circuit scheduling, compilation, and execution.
//!
//! Run with: cargo bench -p braid-circuit

use braid_circuit::{Circuit, gates};
use braid_pauli::{CliffordMap, StabilizerState};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Benchmark greedy layering while appending nearest-neighbour gates.
fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("append");

    for n in &[8usize, 32, 128] {
        group.bench_with_input(BenchmarkId::new("brickwall", n), n, |b, &n| {
            b.iter(|| gates::brickwall_rcc(black_box(n), black_box(8)));
        });
    }

    group.finish();
}

/// Benchmark compiling a unitary circuit into a single Clifford map.
fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");

    for n in &[8usize, 16, 32] {
        group.bench_with_input(BenchmarkId::new("brickwall_d8", n), n, |b, &n| {
            let mut rng = StdRng::seed_from_u64(0);
            let mut circ = gates::brickwall_rcc(n, 8);
            // pin the random gates so the circuit has a fixed unitary
            let mut state = StabilizerState::zero_state(n);
            circ.forward(&mut state, &mut rng).unwrap();
            b.iter(|| {
                let mut fresh = circ.clone();
                fresh.compile(black_box(n)).unwrap();
            });
        });
    }

    group.finish();
}

/// Benchmark running a circuit over a stabilizer state.
fn bench_forward(c: &mut Criterion) {
    let mut group = c.benchmark_group("forward");

    for n in &[8usize, 16, 32] {
        group.bench_with_input(BenchmarkId::new("state_elementwise", n), n, |b, &n| {
            let mut rng = StdRng::seed_from_u64(1);
            let mut circ = gates::brickwall_rcc(n, 8);
            let mut pin = StabilizerState::zero_state(n);
            circ.forward(&mut pin, &mut rng).unwrap();
            b.iter(|| {
                let mut state = StabilizerState::zero_state(n);
                circ.forward(&mut state, &mut rng).unwrap();
                black_box(state)
            });
        });

        group.bench_with_input(BenchmarkId::new("state_compiled", n), n, |b, &n| {
            let mut rng = StdRng::seed_from_u64(2);
            let mut circ = gates::brickwall_rcc(n, 8);
            let mut pin = StabilizerState::zero_state(n);
            circ.forward(&mut pin, &mut rng).unwrap();
            circ.compile(n).unwrap();
            b.iter(|| {
                let mut state = StabilizerState::zero_state(n);
                circ.forward(&mut state, &mut rng).unwrap();
                black_box(state)
            });
        });
    }

    group.finish();
}

/// Benchmark sampling uniform random Clifford maps.
fn bench_random_clifford(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_clifford");

    for n in &[2usize, 4, 8] {
        group.bench_with_input(BenchmarkId::new("sample", n), n, |b, &n| {
            let mut rng = StdRng::seed_from_u64(3);
            b.iter(|| black_box(CliffordMap::random(n, &mut rng)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_append,
    bench_compile,
    bench_forward,
    bench_random_clifford
);
criterion_main!(benches);
