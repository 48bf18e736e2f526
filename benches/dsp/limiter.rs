//! Benchmarks for the keystroke limiter.

use std::hint::black_box;

use criterion::Criterion;
use keyclack::{config::LimiterConfig, dsp::Limiter};

pub fn bench_limiter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/limiter");
    let config = LimiterConfig::default();

    // A burst of loud requests keeps the limiter in its attack branch
    let mut limiter = Limiter::new(&config);
    group.bench_function("attack", |b| {
        b.iter(|| black_box(limiter.process(black_box(1.0))))
    });

    let mut limiter = Limiter::new(&config);
    group.bench_function("release", |b| {
        b.iter(|| black_box(limiter.process(black_box(0.2))))
    });

    group.finish();
}
