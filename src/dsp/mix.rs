//! Summing and output-format primitives.

/*
Summing Voices
==============

Each playing channel renders into its own left/right scratch block. The mixer
then ADDS every channel into a stereo bus and finally lays the bus out in the
device's interleaved frame format.

Clipping Risk
-------------

Summing is unweighted, so two keystrokes that each peak at 0.8 can reach 1.6
on the bus. The event limiter keeps individual requests in check, but
overlapping tails still stack. The bus is therefore hard-clipped to
[-1.0, +1.0] right before it leaves the mixer.

Interleaving
------------

Audio devices expect frames: one sample per output channel, back to back.

    planar:       L: [l0, l1, l2]   R: [r0, r1, r2]
    interleaved:  [l0, r0, l1, r1, l2, r2]            (2 channels)
                  [(l0+r0)/2, (l1+r1)/2, (l2+r2)/2]   (1 channel)

Devices with more than two channels get the stereo pair on the first two and
silence on the rest.
*/

/// Add signal B into signal A in-place (summing).
///
/// ⚠️ WARNING: Can exceed [-1.0, +1.0] range!
#[inline]
pub fn sum_in_place(a: &mut [f32], b: &[f32]) {
    debug_assert_eq!(a.len(), b.len());

    for (sa, &sb) in a.iter_mut().zip(b.iter()) {
        *sa += sb;
    }
}

/// Clamp every sample into [-ceiling, +ceiling].
#[inline]
pub fn hard_clip(signal: &mut [f32], ceiling: f32) {
    for sample in signal.iter_mut() {
        *sample = sample.clamp(-ceiling, ceiling);
    }
}

/// Write a planar stereo pair into an interleaved output block.
///
/// `out.len()` must equal `left.len() * channels`.
pub fn interleave(left: &[f32], right: &[f32], out: &mut [f32], channels: usize) {
    debug_assert_eq!(left.len(), right.len());
    debug_assert_eq!(out.len(), left.len() * channels);

    match channels {
        0 => {}
        1 => {
            for ((o, &l), &r) in out.iter_mut().zip(left).zip(right) {
                *o = 0.5 * (l + r);
            }
        }
        _ => {
            for ((frame, &l), &r) in out.chunks_exact_mut(channels).zip(left).zip(right) {
                frame[0] = l;
                frame[1] = r;
                frame[2..].fill(0.0);
            }
        }
    }
}

/// Peak absolute value of a block.
#[inline]
pub fn peak(signal: &[f32]) -> f32 {
    signal.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
}
