use crate::io::assets::SoundAsset;

/// One channel's sample playback.
///
/// Reads the asset at a fractional position with linear interpolation, so a
/// rate other than 1.0 both converts sample rate and shifts pitch.
#[derive(Debug, Default)]
pub struct SampleVoice {
    asset: Option<SoundAsset>,
    position: f64,
    rate: f64,
}

impl SampleVoice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, asset: SoundAsset, rate: f64) {
        self.asset = Some(asset);
        self.position = 0.0;
        self.rate = if rate.is_finite() && rate > 0.0 { rate } else { 1.0 };
    }

    pub fn stop(&mut self) {
        self.asset = None;
        self.position = 0.0;
    }

    pub fn is_active(&self) -> bool {
        self.asset.is_some()
    }

    /// Write the next frames into `left`/`right` (overwriting them). Frames
    /// past the end of the sound are silent and the voice stops.
    pub fn render(&mut self, left: &mut [f32], right: &mut [f32]) {
        debug_assert_eq!(left.len(), right.len());

        let Some(asset) = &self.asset else {
            left.fill(0.0);
            right.fill(0.0);
            return;
        };

        let end = asset.frames() as f64;
        let mut finished = false;
        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            if self.position >= end {
                finished = true;
                *l = 0.0;
                *r = 0.0;
                continue;
            }
            (*l, *r) = asset.read_interpolated(self.position);
            self.position += self.rate;
        }

        if finished || self.position >= end {
            self.stop();
        }
    }
}
