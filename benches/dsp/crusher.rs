//! Benchmarks for the bit-crusher at both precisions.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_crush::dsp::BitCrusher;

use crate::BLOCK_SIZES;

pub fn bench_crusher(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/crusher");

    for &size in BLOCK_SIZES {
        let signal: Vec<f32> = (0..size).map(|i| (i as f32 * 0.05).sin()).collect();
        let wide: Vec<f64> = signal.iter().map(|&s| s as f64).collect();

        // Fixed resolution, no modulation
        let mut fixed = BitCrusher::new();
        fixed.set_amount(0.6);
        let mut buffer = signal.clone();
        group.bench_with_input(BenchmarkId::new("fixed_f32", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&signal);
                fixed.process_buffer(black_box(&mut buffer), 48_000.0);
            })
        });

        // LFO sweeping the resolution every sample
        let mut modulated = BitCrusher::new();
        modulated.set_amount(0.5);
        modulated.set_lfo(0.7, 1.0);
        group.bench_with_input(BenchmarkId::new("modulated_f32", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&signal);
                modulated.process_buffer(black_box(&mut buffer), 48_000.0);
            })
        });

        let mut wide_buffer = wide.clone();
        group.bench_with_input(BenchmarkId::new("modulated_f64", size), &size, |b, _| {
            b.iter(|| {
                wide_buffer.copy_from_slice(&wide);
                modulated.process_buffer(black_box(&mut wide_buffer), 48_000.0);
            })
        });
    }

    group.finish();
}
