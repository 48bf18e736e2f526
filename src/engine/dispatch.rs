//! Per-keystroke orchestration.
//!
//! keystroke → velocity → humanize → limiter → stereo gains → asset →
//! channel → (timing delay on a worker thread) → play
//!
//! Everything up to channel allocation runs on the caller's thread, in
//! arrival order. Only the timing delay and the trigger move to a worker,
//! so the capture loop never sleeps.

use std::{
    sync::Arc,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use parking_lot::Mutex;
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    config::EngineConfig,
    dsp::amplify::{clamp01, stereo_gains},
    engine::{backend::PlaybackBackend, limiter::LimiterState, router::SoundRouter},
    humanize::{Humanizer, PanMap, VelocityEstimator},
    io::{assets::AssetBank, keyboard::KeyEvent},
    Result,
};

/// Final playback parameters for one keystroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapedEvent {
    /// Typing speed estimate in [0, 1]
    pub velocity: f32,
    /// Stereo position in [-1, 1]
    pub pan: f32,
    /// Volume after limiting, in [0, 1]
    pub volume: f32,
    pub left_gain: f32,
    pub right_gain: f32,
    /// Advisory playback-rate deviation
    pub pitch_offset: f32,
    /// Delay before triggering, in seconds
    pub timing_jitter: f32,
}

/// What happened to a dispatched keystroke's audio.
#[derive(Debug)]
pub enum Outcome {
    /// Triggered immediately (no timing delay)
    Played,
    /// Handed to a worker that waits out the delay, then triggers
    Scheduled(JoinHandle<()>),
    /// No special sound for the key and an empty pool
    NoAsset,
    /// Every backend channel busy; the sound is dropped
    NoChannel,
    /// The worker thread could not be started; the sound is dropped
    SpawnFailed,
}

/// Result of dispatching one keystroke.
#[derive(Debug)]
pub struct Dispatch {
    pub shaped: ShapedEvent,
    pub outcome: Outcome,
}

/// The keystroke sound engine.
///
/// Shared across threads by reference or `Arc`; all mutable state sits
/// behind its own lock.
pub struct Engine<B: PlaybackBackend> {
    pan_map: PanMap,
    humanizer: Humanizer,
    router: SoundRouter,
    velocity: Mutex<VelocityEstimator>,
    limiter: LimiterState,
    rng: Mutex<StdRng>,
    backend: Arc<B>,
    clock: Instant,
}

impl<B: PlaybackBackend> Engine<B> {
    /// Build an engine with an entropy-seeded random source.
    ///
    /// Fails on invalid configuration, including malformed pan rows.
    pub fn new(config: &EngineConfig, assets: AssetBank, backend: B) -> Result<Self> {
        Self::with_rng(config, assets, backend, StdRng::from_entropy())
    }

    /// Build an engine around a caller-supplied random source.
    pub fn with_rng(
        config: &EngineConfig,
        assets: AssetBank,
        backend: B,
        rng: StdRng,
    ) -> Result<Self> {
        config.validate()?;
        let pan_map = PanMap::new(&config.pan_rows)?;

        Ok(Self {
            pan_map,
            humanizer: Humanizer::new(config.humanize.clone()),
            router: SoundRouter::new(assets),
            velocity: Mutex::new(VelocityEstimator::new(&config.velocity)),
            limiter: LimiterState::new(&config.limiter),
            rng: Mutex::new(rng),
            backend: Arc::new(backend),
            clock: Instant::now(),
        })
    }

    /// Seconds since the engine was built.
    pub fn now(&self) -> f64 {
        self.clock.elapsed().as_secs_f64()
    }

    /// Handle a keystroke happening now.
    ///
    /// The clock is read under the velocity lock so recorded timestamps
    /// follow arrival order across threads.
    pub fn dispatch(&self, event: &KeyEvent) -> Dispatch {
        let velocity = {
            let mut estimator = self.velocity.lock();
            estimator.record_and_estimate(self.now())
        };
        self.trigger(event, self.shape_with(event, velocity))
    }

    /// Handle a keystroke at an explicit timestamp (seconds).
    pub fn dispatch_at(&self, event: &KeyEvent, now: f64) -> Dispatch {
        self.trigger(event, self.shape(event, now))
    }

    fn trigger(&self, event: &KeyEvent, shaped: ShapedEvent) -> Dispatch {
        let asset = {
            let mut rng = self.rng.lock();
            self.router.resolve(&event.name, &mut *rng).cloned()
        };
        let Some(asset) = asset else {
            log::trace!("no sound for key {:?}", event.name);
            return Dispatch {
                shaped,
                outcome: Outcome::NoAsset,
            };
        };

        let Some(channel) = self.backend.allocate_channel() else {
            log::debug!("all channels busy, dropping {:?}", event.name);
            return Dispatch {
                shaped,
                outcome: Outcome::NoChannel,
            };
        };

        let ShapedEvent {
            left_gain,
            right_gain,
            pitch_offset,
            timing_jitter,
            ..
        } = shaped;

        if timing_jitter <= 0.0 {
            self.backend.set_channel_gains(&channel, left_gain, right_gain);
            self.backend.play(channel, &asset, pitch_offset);
            return Dispatch {
                shaped,
                outcome: Outcome::Played,
            };
        }

        let backend = Arc::clone(&self.backend);
        let spawned = thread::Builder::new()
            .name("keyclack-trigger".into())
            .spawn(move || {
                thread::sleep(Duration::from_secs_f32(timing_jitter));
                backend.set_channel_gains(&channel, left_gain, right_gain);
                backend.play(channel, &asset, pitch_offset);
            });

        let outcome = match spawned {
            Ok(handle) => Outcome::Scheduled(handle),
            Err(e) => {
                log::warn!("failed to start trigger thread: {e}");
                Outcome::SpawnFailed
            }
        };

        Dispatch { shaped, outcome }
    }

    /// Record the keystroke and compute its playback parameters.
    ///
    /// Updates velocity history and limiter gain even when nothing ends up
    /// playing.
    pub fn shape(&self, event: &KeyEvent, now: f64) -> ShapedEvent {
        let velocity = self.velocity.lock().record_and_estimate(now);
        self.shape_with(event, velocity)
    }

    /// Shape a keystroke with a known velocity, skipping the estimator.
    pub fn shape_with(&self, event: &KeyEvent, velocity: f32) -> ShapedEvent {
        let pan = event.symbol.map_or(0.0, |c| self.pan_map.pan(c));

        let humanized = {
            let mut rng = self.rng.lock();
            self.humanizer.shape(velocity, pan, &mut *rng)
        };

        let volume = clamp01(self.limiter.apply(humanized.volume));
        let (left_gain, right_gain) = stereo_gains(volume, pan);

        ShapedEvent {
            velocity,
            pan,
            volume,
            left_gain,
            right_gain,
            pitch_offset: humanized.pitch_offset,
            timing_jitter: humanized.timing_jitter,
        }
    }

    pub fn limiter_gain(&self) -> f64 {
        self.limiter.gain()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::HumanizeConfig, io::assets::SoundAsset};
    use std::sync::Barrier;

    struct NullBackend;

    impl PlaybackBackend for NullBackend {
        type Channel = ();

        fn allocate_channel(&self) -> Option<()> {
            Some(())
        }

        fn set_channel_gains(&self, _channel: &(), _left: f32, _right: f32) {}

        fn play(&self, _channel: (), _asset: &SoundAsset, _pitch_offset: f32) {}
    }

    #[test]
    fn concurrent_dispatch_records_timestamps_in_arrival_order() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 5_000;

        let mut config = EngineConfig {
            humanize: HumanizeConfig::deterministic(),
            ..EngineConfig::default()
        };
        config.velocity.history_size = THREADS * PER_THREAD;
        let engine = Arc::new(
            Engine::with_rng(&config, AssetBank::empty(), NullBackend, StdRng::seed_from_u64(3))
                .unwrap(),
        );
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let engine = Arc::clone(&engine);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for _ in 0..PER_THREAD {
                        engine.dispatch(&KeyEvent::char('a'));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let velocity = engine.velocity.lock();
        let timestamps: Vec<f64> = velocity.timestamps().collect();
        assert_eq!(timestamps.len(), THREADS * PER_THREAD);
        let backwards = timestamps.windows(2).filter(|w| w[1] < w[0]).count();
        assert_eq!(backwards, 0);
    }
}
