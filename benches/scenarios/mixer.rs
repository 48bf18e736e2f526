//! Benchmarks for the audio callback.
//!
//! Measures rendering cost as the number of overlapping keystroke sounds
//! grows, up to a full channel pool.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use keyclack::{
    engine::PlaybackBackend,
    io::SoundAsset,
    mixer::Mixer,
};

use crate::BLOCK_SIZES;

const VOICE_COUNTS: &[usize] = &[1, 8, 32, 64];

pub fn bench_mixer(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/mixer");

    let samples: Vec<f32> = (0..96_000).map(|i| (i as f32 * 0.05).sin() * 0.3).collect();
    let asset = SoundAsset::new("click", samples, 2, 48_000);

    for &voices in VOICE_COUNTS {
        for &size in BLOCK_SIZES {
            let (mut mixer, handle) = Mixer::new(64, 44_100);
            let mut out = vec![0.0f32; size * 2];

            group.bench_with_input(
                BenchmarkId::new(format!("{voices}_voices"), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        // Retrigger finished sounds so the voice count holds
                        for i in handle.pool().active()..voices {
                            if let Some(channel) = handle.allocate_channel() {
                                let pan = i as f32 / voices as f32;
                                handle.set_channel_gains(&channel, 1.0 - pan, pan);
                                handle.play(channel, &asset, 0.01);
                            }
                        }
                        mixer.render(black_box(&mut out), 2)
                    })
                },
            );
        }
    }

    group.finish();
}
