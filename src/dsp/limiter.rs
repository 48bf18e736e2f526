//! Per-event gain limiter.

/*
Event-Level Limiting
====================

A conventional limiter watches the audio waveform sample by sample. This one
watches *events*: each keystroke asks for a volume, and the limiter decides
how much of that request to grant. Bursts of loud, fast typing progressively
pull the gain down; calm typing lets it drift back to unity.

Vocabulary
----------

  gain        The multiplier applied to every requested volume. Starts at 1.0
              (unity) and lives in [floor, 1.0].

  threshold   The requested volume above which an event counts as an
              overload. Requests at or below it are "quiet".

  attack      Multiplier applied to gain once per overload event. 0.9 means
              every loud keystroke takes 10% off the current gain.

  release     Fraction of the remaining distance to unity recovered per quiet
              event. 0.01 means 1% of the gap closes each time.

  floor       Lowest gain the limiter will settle at. Without it, a long
              overload burst decays geometrically toward zero and the output
              would take hundreds of quiet events to become audible again.


The Recurrence
--------------

For every event with requested volume v:

    if v > threshold:   gain = max(gain × attack, floor)
    else:               gain = gain + (1 - gain) × release

    output = v × gain

  Gain
    1.0 ─┐               ________-------------
         │╲         ____/
         │ ╲     __/
         │  ╲__ /        release: exponential approach to 1.0
    floor└─────────────────────────────────→ events
          attack: geometric drop, one step per loud event

Both branches are single-pole filters driven by events rather than time, so
the cost is one multiply-add per keystroke.

Gain never exceeds 1.0, so the output never exceeds the request. The output
is not clamped here; callers clamp the final channel gains.
*/

use crate::config::LimiterConfig;

/// Single-pole, event-driven gain reducer.
///
/// Gain is tracked in `f64` so the release branch keeps making progress as
/// gain approaches unity.
#[derive(Debug, Clone)]
pub struct Limiter {
    gain: f64,
    threshold: f32,
    attack: f64,
    release: f64,
    floor: f64,
}

impl Limiter {
    pub fn new(config: &LimiterConfig) -> Self {
        Self {
            gain: 1.0,
            threshold: config.threshold,
            attack: config.attack,
            release: config.release,
            floor: config.floor.clamp(f64::MIN_POSITIVE, 1.0),
        }
    }

    /// Update gain for one event and return the limited volume.
    #[inline]
    pub fn process(&mut self, requested: f32) -> f32 {
        if requested > self.threshold {
            self.gain = (self.gain * self.attack).max(self.floor);
        } else {
            self.gain += (1.0 - self.gain) * self.release;
        }
        self.gain = self.gain.min(1.0);

        (requested as f64 * self.gain) as f32
    }

    pub fn gain(&self) -> f64 {
        self.gain
    }
}

impl Default for Limiter {
    fn default() -> Self {
        Self::new(&LimiterConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_event_at_unity_passes_through() {
        let mut limiter = Limiter::default();
        assert_eq!(limiter.process(0.9), 0.9);
        assert_eq!(limiter.gain(), 1.0);
    }

    #[test]
    fn overload_strictly_decreases_gain_until_floor() {
        let mut limiter = Limiter::default();
        let mut previous = limiter.gain();

        // 0.9^65 ≈ 1.07e-3, still above the 1e-3 floor
        for _ in 0..65 {
            limiter.process(1.0);
            assert!(limiter.gain() < previous, "gain must drop on every overload");
            assert!(limiter.gain() > 0.0);
            previous = limiter.gain();
        }

        for _ in 0..1_000 {
            limiter.process(1.0);
        }
        assert_eq!(limiter.gain(), 1e-3);
    }

    #[test]
    fn release_recovers_to_unity() {
        let mut limiter = Limiter::default();
        for _ in 0..100 {
            limiter.process(1.0);
        }

        let mut previous = limiter.gain();
        let mut steps = 0;
        while 1.0 - limiter.gain() > 1e-6 {
            limiter.process(0.0);
            assert!(limiter.gain() > previous, "gain must rise on every quiet event");
            previous = limiter.gain();
            steps += 1;
            assert!(steps < 5_000, "release did not converge");
        }
        assert!(limiter.gain() <= 1.0);
    }

    #[test]
    fn output_never_exceeds_request() {
        let mut limiter = Limiter::default();
        for i in 0..=200 {
            let requested = (i % 21) as f32 / 20.0;
            let out = limiter.process(requested);
            assert!(out <= requested, "{out} > {requested}");
            assert!(out >= 0.0);
        }
    }

    #[test]
    fn threshold_is_exclusive() {
        let mut limiter = Limiter::default();
        limiter.process(0.95);
        assert_eq!(limiter.gain(), 1.0);
        limiter.process(0.951);
        assert!(limiter.gain() < 1.0);
    }
}
