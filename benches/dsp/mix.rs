//! Benchmarks for bus summing and output conversion.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use keyclack::dsp::mix;

use crate::BLOCK_SIZES;

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/mix");

    for &size in BLOCK_SIZES {
        let voice: Vec<f32> = (0..size).map(|i| (i as f32 * 0.01).sin()).collect();
        let mut bus = vec![0.0f32; size];

        group.bench_with_input(BenchmarkId::new("sum_in_place", size), &size, |b, _| {
            b.iter(|| {
                bus.fill(0.0);
                mix::sum_in_place(black_box(&mut bus), black_box(&voice))
            })
        });

        let loud: Vec<f32> = voice.iter().map(|s| s * 2.0).collect();
        let mut clipped = loud.clone();
        group.bench_with_input(BenchmarkId::new("hard_clip", size), &size, |b, _| {
            b.iter(|| {
                clipped.copy_from_slice(&loud);
                mix::hard_clip(black_box(&mut clipped), black_box(1.0))
            })
        });

        let mut out = vec![0.0f32; size * 2];
        group.bench_with_input(BenchmarkId::new("interleave", size), &size, |b, _| {
            b.iter(|| {
                mix::interleave(
                    black_box(&voice),
                    black_box(&voice),
                    black_box(&mut out),
                    2,
                )
            })
        });
    }

    group.finish();
}
