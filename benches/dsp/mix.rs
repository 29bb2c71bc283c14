//! Benchmarks for dry/wet blending.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_crush::dsp::mix;

use crate::BLOCK_SIZES;

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/mix");

    for &size in BLOCK_SIZES {
        let dry: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();
        let wet_source: Vec<f32> = (0..size).map(|i| (i as f32 * 0.15).cos()).collect();
        let mut wet = wet_source.clone();

        group.bench_with_input(BenchmarkId::new("additive", size), &size, |b, _| {
            b.iter(|| {
                wet.copy_from_slice(&wet_source);
                mix::apply_additive(
                    black_box(&dry),
                    black_box(&mut wet),
                    black_box(0.3),
                    black_box(0.7),
                );
            })
        });
    }

    group.finish();
}
