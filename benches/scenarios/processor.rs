//! Benchmarks for complete processor blocks.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_crush::{AudioBlock, CrushParams, CrushProcessor, ProcessContext, ProcessSetup};

use crate::BLOCK_SIZES;

fn modulated() -> CrushParams {
    CrushParams::new()
        .with_resolution(0.4)
        .with_lfo(0.5, 0.8)
        .with_mix(0.2, 0.8)
}

pub fn bench_processor(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/processor");

    for &size in BLOCK_SIZES {
        let left: Vec<f32> = (0..size).map(|i| (i as f32 * 0.03).sin()).collect();
        let right: Vec<f32> = (0..size).map(|i| (i as f32 * 0.04).cos()).collect();
        let ctx = ProcessContext::new(size);

        // === STEREO f32, separate buffers ===
        let mut processor = CrushProcessor::new(ProcessSetup::new(48_000.0, 2));
        processor.set_params(modulated());
        let mut out_l = vec![0.0f32; size];
        let mut out_r = vec![0.0f32; size];

        group.bench_with_input(BenchmarkId::new("stereo_f32", size), &size, |b, _| {
            b.iter(|| {
                processor.process_f32(
                    AudioBlock::Separate {
                        inputs: &[left.as_slice(), right.as_slice()],
                        outputs: &mut [out_l.as_mut_slice(), out_r.as_mut_slice()],
                    },
                    black_box(&ctx),
                );
            })
        });

        // === STEREO f64, in place ===
        let wide_l: Vec<f64> = left.iter().map(|&s| s as f64).collect();
        let wide_r: Vec<f64> = right.iter().map(|&s| s as f64).collect();
        let mut buf_l = wide_l.clone();
        let mut buf_r = wide_r.clone();

        group.bench_with_input(BenchmarkId::new("stereo_f64_in_place", size), &size, |b, _| {
            b.iter(|| {
                buf_l.copy_from_slice(&wide_l);
                buf_r.copy_from_slice(&wide_r);
                processor.process_f64(
                    AudioBlock::InPlace(&mut [buf_l.as_mut_slice(), buf_r.as_mut_slice()]),
                    black_box(&ctx),
                );
            })
        });

        // === BYPASS: copy-through cost ===
        let mut bypassed = CrushProcessor::new(ProcessSetup::new(48_000.0, 2));
        bypassed.set_params(modulated().with_bypass(true));

        group.bench_with_input(BenchmarkId::new("stereo_bypass", size), &size, |b, _| {
            b.iter(|| {
                bypassed.process_f32(
                    AudioBlock::Separate {
                        inputs: &[left.as_slice(), right.as_slice()],
                        outputs: &mut [out_l.as_mut_slice(), out_r.as_mut_slice()],
                    },
                    black_box(&ctx),
                );
            })
        });
    }

    group.finish();
}
