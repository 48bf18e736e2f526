use std::sync::{
    atomic::{AtomicBool, AtomicU32, Ordering},
    Arc,
};

/// Fixed set of playback channels shared between trigger threads and the
/// audio callback.
///
/// Occupancy and per-channel gains are atomics so neither side ever blocks.
/// Gains are stored as f32 bit patterns.
#[derive(Debug)]
pub struct ChannelPool {
    busy: Box<[AtomicBool]>,
    gains: Box<[[AtomicU32; 2]]>,
    peak: AtomicU32,
}

impl ChannelPool {
    pub fn new(channels: usize) -> Self {
        Self {
            busy: (0..channels).map(|_| AtomicBool::new(false)).collect(),
            gains: (0..channels)
                .map(|_| [AtomicU32::new(0), AtomicU32::new(0)])
                .collect(),
            peak: AtomicU32::new(0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.busy.len()
    }

    /// Channels currently reserved or playing.
    pub fn active(&self) -> usize {
        self.busy
            .iter()
            .filter(|b| b.load(Ordering::Relaxed))
            .count()
    }

    pub fn is_busy(&self, index: usize) -> bool {
        self.busy
            .get(index)
            .is_some_and(|b| b.load(Ordering::Acquire))
    }

    fn try_claim(&self) -> Option<usize> {
        self.busy.iter().position(|b| {
            b.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
        })
    }

    /// Mark a channel free again.
    pub fn release(&self, index: usize) {
        if let Some(b) = self.busy.get(index) {
            b.store(false, Ordering::Release);
        }
    }

    pub fn set_gains(&self, index: usize, left: f32, right: f32) {
        if let Some([l, r]) = self.gains.get(index) {
            l.store(left.to_bits(), Ordering::Relaxed);
            r.store(right.to_bits(), Ordering::Relaxed);
        }
    }

    pub fn gains(&self, index: usize) -> (f32, f32) {
        match self.gains.get(index) {
            Some([l, r]) => (
                f32::from_bits(l.load(Ordering::Relaxed)),
                f32::from_bits(r.load(Ordering::Relaxed)),
            ),
            None => (0.0, 0.0),
        }
    }

    /// Output peak of the most recent block.
    pub fn peak(&self) -> f32 {
        f32::from_bits(self.peak.load(Ordering::Relaxed))
    }

    pub(crate) fn set_peak(&self, peak: f32) {
        self.peak.store(peak.to_bits(), Ordering::Relaxed);
    }
}

/// A reserved channel.
///
/// Dropping the lease frees the channel; a lease handed to the audio
/// callback is disarmed first and freed there when its sound ends.
#[derive(Debug)]
pub struct ChannelLease {
    pool: Arc<ChannelPool>,
    index: usize,
    armed: bool,
}

impl ChannelLease {
    /// Reserve the lowest free channel, if any.
    pub fn acquire(pool: &Arc<ChannelPool>) -> Option<Self> {
        pool.try_claim().map(|index| Self {
            pool: Arc::clone(pool),
            index,
            armed: true,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Give up ownership without freeing the channel.
    pub(crate) fn disarm(mut self) -> usize {
        self.armed = false;
        self.index
    }
}

impl Drop for ChannelLease {
    fn drop(&mut self) {
        if self.armed {
            self.pool.release(self.index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_until_exhausted() {
        let pool = Arc::new(ChannelPool::new(2));
        let a = ChannelLease::acquire(&pool).unwrap();
        let b = ChannelLease::acquire(&pool).unwrap();

        assert_ne!(a.index(), b.index());
        assert!(ChannelLease::acquire(&pool).is_none());
        assert_eq!(pool.active(), 2);
    }

    #[test]
    fn dropping_lease_frees_channel() {
        let pool = Arc::new(ChannelPool::new(1));
        let lease = ChannelLease::acquire(&pool).unwrap();
        drop(lease);

        assert_eq!(pool.active(), 0);
        assert!(ChannelLease::acquire(&pool).is_some());
    }

    #[test]
    fn disarmed_lease_stays_busy_until_released() {
        let pool = Arc::new(ChannelPool::new(1));
        let index = ChannelLease::acquire(&pool).unwrap().disarm();

        assert!(pool.is_busy(index));
        pool.release(index);
        assert!(!pool.is_busy(index));
    }

    #[test]
    fn gains_round_trip_through_atomics() {
        let pool = ChannelPool::new(3);
        pool.set_gains(1, 0.25, 1.0);
        assert_eq!(pool.gains(1), (0.25, 1.0));
        assert_eq!(pool.gains(0), (0.0, 0.0));
        assert_eq!(pool.gains(9), (0.0, 0.0));
    }

    #[test]
    fn concurrent_acquire_never_hands_out_a_channel_twice() {
        let pool = Arc::new(ChannelPool::new(8));
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let pool = Arc::clone(&pool);
                std::thread::spawn(move || ChannelLease::acquire(&pool).map(ChannelLease::disarm))
            })
            .collect();

        let mut claimed: Vec<usize> = handles
            .into_iter()
            .filter_map(|h| h.join().unwrap())
            .collect();
        claimed.sort_unstable();

        assert_eq!(claimed, (0..8).collect::<Vec<_>>());
    }
}
