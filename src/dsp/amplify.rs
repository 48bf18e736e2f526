//! Gain and stereo placement primitives.

/*
Gain and Panning
================

Every keystroke ends up as two numbers: how loud the left speaker plays the
sample and how loud the right one does.

Vocabulary
----------

  gain        A multiplier applied to amplitude.
                gain = 1.0  →  unchanged (unity gain)
                gain < 1.0  →  quieter (attenuation)
                gain = 0.0  →  silence

  pan         Horizontal position in [-1.0, +1.0].
                pan = -1.0  →  hard left
                pan =  0.0  →  centre
                pan = +1.0  →  hard right


The Pan Law
-----------

We use a linear, centre-unity pan law:

    left  = clamp01((1 - pan) × volume)
    right = clamp01((1 + pan) × volume)

At pan = 0 both sides play at `volume`. Moving toward one side boosts that
side (up to 2× before clamping) while fading the other to silence.

    Gain
     2v ┐╲                  ╱   (before clamp)
        │  ╲              ╱
      v ┤    ╲ ──────── ╱        left ╲   right ╱
        │      ╲      ╱
      0 └────────╲__╱──────→ pan
        -1       0        +1

The boost is intentional: keys at the edge of the keyboard sound closer to
the matching ear instead of merely quieter in the other. The clamp keeps both
channel gains in [0, 1] for any volume in [0, 1] and pan in [-1, 1].
*/

/// Clamp a value into [0, 1]. NaN maps to 0.
#[inline]
pub fn clamp01(x: f32) -> f32 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

/// Clamp a pan coefficient into [-1, 1]. NaN maps to centre.
#[inline]
pub fn clamp_pan(pan: f32) -> f32 {
    if pan.is_nan() {
        0.0
    } else {
        pan.clamp(-1.0, 1.0)
    }
}

/// Split a volume into (left, right) channel gains for a pan position.
#[inline]
pub fn stereo_gains(volume: f32, pan: f32) -> (f32, f32) {
    let pan = clamp_pan(pan);
    let left = clamp01((1.0 - pan) * volume);
    let right = clamp01((1.0 + pan) * volume);
    (left, right)
}

/// Multiply a signal by a constant gain factor (in-place).
#[inline]
pub fn apply_gain(signal: &mut [f32], gain: f32) {
    for sample in signal.iter_mut() {
        *sample *= gain;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp01() {
        assert_eq!(clamp01(-0.5), 0.0);
        assert_eq!(clamp01(0.3), 0.3);
        assert_eq!(clamp01(1.7), 1.0);
        assert_eq!(clamp01(f32::NAN), 0.0);
    }

    #[test]
    fn test_centre_pan_is_unity() {
        assert_eq!(stereo_gains(0.6, 0.0), (0.6, 0.6));
    }

    #[test]
    fn test_left_pan_boosts_left() {
        let (left, right) = stereo_gains(0.9, -0.7);
        assert_eq!(left, 1.0);
        assert!((right - 0.27).abs() < 1e-6);
    }

    #[test]
    fn test_hard_pan_silences_opposite_side() {
        assert_eq!(stereo_gains(0.5, 1.0), (0.0, 1.0));
        assert_eq!(stereo_gains(0.5, -1.0), (1.0, 0.0));
    }

    #[test]
    fn test_gains_stay_in_unit_range() {
        for v in 0..=20 {
            for p in -20..=20 {
                let volume = v as f32 / 20.0;
                let pan = p as f32 / 20.0;
                let (left, right) = stereo_gains(volume, pan);
                assert!((0.0..=1.0).contains(&left), "left {left} at v={volume} p={pan}");
                assert!((0.0..=1.0).contains(&right), "right {right} at v={volume} p={pan}");
            }
        }
    }

    #[test]
    fn test_out_of_range_pan_is_clamped() {
        assert_eq!(stereo_gains(0.4, 3.0), stereo_gains(0.4, 1.0));
    }

    #[test]
    fn test_apply_gain() {
        let mut signal = [1.0, 0.5, -0.5, -1.0];
        apply_gain(&mut signal, 0.5);
        assert_eq!(signal, [0.5, 0.25, -0.25, -0.5]);
    }
}
