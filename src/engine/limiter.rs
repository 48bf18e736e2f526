use parking_lot::Mutex;

use crate::{config::LimiterConfig, dsp::Limiter};

/// Limiter gain shared by every playback event.
///
/// Each update is a read-modify-write of one scalar, done under a single
/// lock so concurrent events never lose an update. The result of N
/// concurrent calls is always that of some sequential ordering of them.
#[derive(Debug)]
pub struct LimiterState {
    inner: Mutex<Limiter>,
}

impl LimiterState {
    pub fn new(config: &LimiterConfig) -> Self {
        Self {
            inner: Mutex::new(Limiter::new(config)),
        }
    }

    /// Apply the limiter to one requested volume and return the result.
    ///
    /// The output is at most `requested`; it is not clamped further.
    pub fn apply(&self, requested: f32) -> f32 {
        self.inner.lock().process(requested)
    }

    /// Current gain in [floor, 1].
    pub fn gain(&self) -> f64 {
        self.inner.lock().gain()
    }
}

impl Default for LimiterState {
    fn default() -> Self {
        Self::new(&LimiterConfig::default())
    }
}
