use crate::config::VelocityConfig;

/// Typing-speed estimate from inter-keystroke timing.
///
/// Keeps the last `history_size` timestamps in a fixed ring and maps the most
/// recent interval onto [0, 1]: short gaps (fast typing) approach 1, gaps at
/// or beyond `max_interval` give 0.
///
///   velocity = 1 - clamp(dt, min_interval, max_interval) / max_interval
///
/// Not thread-safe on its own; callers serialize access so timestamps are
/// recorded in arrival order.
#[derive(Debug, Clone)]
pub struct VelocityEstimator {
    history: Box<[f64]>,
    write_pos: usize,
    len: usize,
    min_interval: f64,
    max_interval: f64,
    neutral: f32,
}

impl VelocityEstimator {
    pub fn new(config: &VelocityConfig) -> Self {
        Self {
            history: vec![0.0; config.history_size.max(2)].into_boxed_slice(),
            write_pos: 0,
            len: 0,
            min_interval: config.min_interval,
            max_interval: config.max_interval,
            neutral: config.neutral,
        }
    }

    /// Record a keystroke at `now` (seconds) and return its velocity.
    ///
    /// Timestamps earlier than the previous one clamp to `min_interval`.
    pub fn record_and_estimate(&mut self, now: f64) -> f32 {
        let capacity = self.history.len();

        self.history[self.write_pos] = now;
        self.write_pos = (self.write_pos + 1) % capacity;
        self.len = (self.len + 1).min(capacity);

        if self.len < 2 {
            return self.neutral;
        }

        let previous = self.history[(self.write_pos + capacity - 2) % capacity];
        let dt = (now - previous).clamp(self.min_interval, self.max_interval);

        (1.0 - dt / self.max_interval).clamp(0.0, 1.0) as f32
    }

    /// Number of timestamps currently held.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.history.len()
    }

    /// Timestamps oldest first.
    pub fn timestamps(&self) -> impl Iterator<Item = f64> + '_ {
        let capacity = self.history.len();
        let start = (self.write_pos + capacity - self.len) % capacity;
        (0..self.len).map(move |i| self.history[(start + i) % capacity])
    }
}

impl Default for VelocityEstimator {
    fn default() -> Self {
        Self::new(&VelocityConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(timestamps: &[f64]) -> f32 {
        let mut estimator = VelocityEstimator::default();
        let mut velocity = 0.0;
        for &t in timestamps {
            velocity = estimator.record_and_estimate(t);
        }
        velocity
    }

    #[test]
    fn first_event_is_neutral() {
        let mut estimator = VelocityEstimator::default();
        assert_eq!(estimator.record_and_estimate(12.5), 0.5);
    }

    #[test]
    fn shorter_interval_is_faster() {
        let slow = run(&[0.0, 1.0, 1.2]);
        let fast = run(&[0.0, 1.0, 1.05]);
        assert!(fast > slow, "{fast} <= {slow}");
    }

    #[test]
    fn long_pause_reads_as_idle() {
        assert_eq!(run(&[0.0, 5.0]), 0.0);
        assert_eq!(run(&[0.0, 0.3]), 0.0);
    }

    #[test]
    fn simultaneous_events_clamp_to_min_interval() {
        let v = run(&[1.0, 1.0]);
        let expected = (1.0 - 0.001 / 0.3) as f32;
        assert!((v - expected).abs() < 1e-6);
    }

    #[test]
    fn backwards_timestamp_is_treated_as_fastest() {
        assert_eq!(run(&[2.0, 1.0]), run(&[1.0, 1.0]));
    }

    #[test]
    fn interval_maps_linearly() {
        let v = run(&[0.0, 0.15]);
        assert!((v - 0.5).abs() < 1e-6);
    }

    #[test]
    fn history_evicts_oldest() {
        let config = VelocityConfig {
            history_size: 4,
            ..VelocityConfig::default()
        };
        let mut estimator = VelocityEstimator::new(&config);
        for i in 0..6 {
            estimator.record_and_estimate(i as f64);
        }

        assert_eq!(estimator.len(), 4);
        assert_eq!(estimator.capacity(), 4);
        let held: Vec<f64> = estimator.timestamps().collect();
        assert_eq!(held, vec![2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn wraparound_still_uses_previous_event() {
        let config = VelocityConfig {
            history_size: 2,
            ..VelocityConfig::default()
        };
        let mut estimator = VelocityEstimator::new(&config);
        estimator.record_and_estimate(0.0);
        estimator.record_and_estimate(1.0);
        estimator.record_and_estimate(2.0);
        let v = estimator.record_and_estimate(2.15);
        assert!((v - 0.5).abs() < 1e-6);
    }
}
