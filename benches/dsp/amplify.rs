//! Benchmarks for gain and panning.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use keyclack::dsp::amplify;

use crate::BLOCK_SIZES;

pub fn bench_amplify(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/amplify");

    for &size in BLOCK_SIZES {
        let signal: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();
        let mut signal_copy = signal.clone();

        group.bench_with_input(BenchmarkId::new("apply_gain", size), &size, |b, _| {
            b.iter(|| {
                signal_copy.copy_from_slice(&signal);
                amplify::apply_gain(black_box(&mut signal_copy), black_box(0.5))
            })
        });
    }

    // One call per keystroke; sweep the whole pan range
    let pans: Vec<f32> = (0..64).map(|i| i as f32 / 31.5 - 1.0).collect();
    group.bench_function("stereo_gains", |b| {
        b.iter(|| {
            for &pan in &pans {
                black_box(amplify::stereo_gains(black_box(0.8), pan));
            }
        })
    });

    group.finish();
}
