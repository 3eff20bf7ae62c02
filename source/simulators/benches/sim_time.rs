// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use criterion::{Criterion, criterion_group, criterion_main};
use qreg_simulators::{
    BitValue, BitstringSimulator, SingleQubit, SwapSimulator, TomographySimulator,
};
use std::hint::black_box;

const SEED: u64 = 1000;

fn bitstring_growth(c: &mut Criterion) {
    c.bench_function("grow 8 bits", |b| {
        b.iter(|| {
            let mut simulator = BitstringSimulator::with_seed(SEED);
            for _ in 0..7 {
                simulator.add_bit(BitValue::Superposed);
                simulator.random_controlled_flip();
            }
            black_box(simulator.remove_all_uncorrelated_bits());
        });
    });
}

fn tomography_round(c: &mut Criterion) {
    c.bench_function("tomography round", |b| {
        b.iter(|| {
            let mut simulator = TomographySimulator::with_seed(4, 1000, SEED)
                .expect("simulator should be built");
            simulator.allocate(100).expect("copies should be available");
            simulator
                .rotate(black_box(2), black_box(0.3))
                .expect("rotation should succeed");
            black_box(simulator.measure(100).expect("measurement should succeed"));
        });
    });
}

fn swap_across_register(c: &mut Criterion) {
    c.bench_function("swap -3 and 3", |b| {
        b.iter(|| {
            let mut simulator = SwapSimulator::default_register();
            black_box(simulator.swap(black_box(-3), black_box(3)))
        });
    });
}

fn single_qubit_measure(c: &mut Criterion) {
    c.bench_function("single qubit 10k shots", |b| {
        b.iter(|| {
            let mut qubit = SingleQubit::with_seed(0.4, SEED).expect("angle should be valid");
            black_box(qubit.measure(black_box(10_000)))
        });
    });
}

criterion_group!(
    benches,
    bitstring_growth,
    tomography_round,
    swap_across_register,
    single_qubit_measure
);
criterion_main!(benches);
