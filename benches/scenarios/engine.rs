//! Benchmarks for per-keystroke dispatch.
//!
//! Uses a backend that accepts every trigger and does nothing, so the
//! numbers cover shaping, routing and allocation only.

use std::hint::black_box;

use criterion::Criterion;
use keyclack::{
    config::{EngineConfig, HumanizeConfig},
    engine::{Engine, PlaybackBackend},
    io::{AssetBank, KeyEvent, SoundAsset},
};
use rand::{rngs::StdRng, SeedableRng};

struct NullBackend;

impl PlaybackBackend for NullBackend {
    type Channel = ();

    fn allocate_channel(&self) -> Option<()> {
        Some(())
    }

    fn set_channel_gains(&self, _channel: &(), _left: f32, _right: f32) {}

    fn play(&self, _channel: (), _asset: &SoundAsset, _pitch_offset: f32) {}
}

fn bank() -> AssetBank {
    let pool = (0..24)
        .map(|i| SoundAsset::new(&format!("key{i}"), vec![0.0; 64], 1, 44_100))
        .collect();
    AssetBank::new(Default::default(), pool)
}

pub fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/engine");

    // Jitter off so every dispatch triggers inline instead of spawning
    let config = EngineConfig {
        humanize: HumanizeConfig {
            timing_range: 0.0,
            ..HumanizeConfig::default()
        },
        ..EngineConfig::default()
    };
    let engine = match Engine::with_rng(&config, bank(), NullBackend, StdRng::seed_from_u64(7)) {
        Ok(engine) => engine,
        Err(e) => panic!("bench engine: {e}"),
    };

    let text: Vec<KeyEvent> = "the quick brown fox jumps over the lazy dog"
        .chars()
        .map(|c| {
            if c == ' ' {
                KeyEvent::new(Some(' '), "space")
            } else {
                KeyEvent::char(c)
            }
        })
        .collect();

    let mut now = 0.0;
    group.bench_function("shape", |b| {
        b.iter(|| {
            now += 0.08;
            black_box(engine.shape(black_box(&text[0]), now))
        })
    });

    group.bench_function("dispatch_sentence", |b| {
        b.iter(|| {
            for key in &text {
                now += 0.08;
                black_box(engine.dispatch_at(key, now));
            }
        })
    });

    group.finish();
}
