//! Benchmarks for the modulation LFO.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_crush::dsp::Lfo;

use crate::BLOCK_SIZES;

pub fn bench_lfo(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/lfo");

    for &size in BLOCK_SIZES {
        let mut lfo = Lfo::new();
        lfo.set_rate(5.0);
        let mut buffer = vec![0.0f32; size];

        group.bench_with_input(BenchmarkId::new("triangle", size), &size, |b, _| {
            b.iter(|| {
                for out in buffer.iter_mut() {
                    *out = lfo.step(black_box(48_000.0));
                }
                black_box(&buffer);
            })
        });
    }

    group.finish();
}
