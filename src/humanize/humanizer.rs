use rand::Rng;

use crate::{config::HumanizeConfig, dsp::amplify::clamp01};

/// Shaping parameters for one keystroke before limiting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Humanized {
    /// Requested volume in [0, 1]
    pub volume: f32,
    /// Stereo position in [-1, 1]
    pub pan: f32,
    /// Advisory playback-rate deviation, e.g. 0.01 plays 1% faster
    pub pitch_offset: f32,
    /// Delay before triggering, in seconds
    pub timing_jitter: f32,
}

/// Turns a velocity and pan into randomized, bounded playback parameters.
///
/// The random source is passed in so callers decide between a seeded
/// generator (tests, reproducible sessions) and an entropy-seeded one.
#[derive(Debug, Clone)]
pub struct Humanizer {
    config: HumanizeConfig,
}

impl Humanizer {
    pub fn new(config: HumanizeConfig) -> Self {
        Self { config }
    }

    /// Shape one event.
    ///
    /// volume = clamp01(base × velocity + U(-volume_range, volume_range))
    pub fn shape<R: Rng>(&self, velocity: f32, pan: f32, rng: &mut R) -> Humanized {
        let c = &self.config;

        let variation = symmetric(rng, c.volume_range);
        let volume = clamp01(c.base_volume * clamp01(velocity) + variation);
        let pitch_offset = symmetric(rng, c.pitch_range);
        let timing_jitter = upto(rng, c.timing_range);

        Humanized {
            volume,
            pan,
            pitch_offset,
            timing_jitter,
        }
    }
}

impl Default for Humanizer {
    fn default() -> Self {
        Self::new(HumanizeConfig::default())
    }
}

/// Uniform draw from [-range, range]; zero when the range is empty.
fn symmetric<R: Rng>(rng: &mut R, range: f32) -> f32 {
    if range > 0.0 {
        rng.gen_range(-range..=range)
    } else {
        0.0
    }
}

/// Uniform draw from [0, range]; zero when the range is empty.
fn upto<R: Rng>(rng: &mut R, range: f32) -> f32 {
    if range > 0.0 {
        rng.gen_range(0.0..=range)
    } else {
        0.0
    }
}
