use rand::{seq::SliceRandom, Rng};

use crate::io::assets::{AssetBank, SoundAsset};

/// Picks the sound for a keystroke.
///
/// A key whose logical name has a dedicated sound always gets it; every other
/// key draws uniformly from the general pool. With neither available there is
/// nothing to play, which is not an error.
#[derive(Debug, Clone, Default)]
pub struct SoundRouter {
    bank: AssetBank,
}

impl SoundRouter {
    pub fn new(bank: AssetBank) -> Self {
        Self { bank }
    }

    pub fn resolve<R: Rng>(&self, name: &str, rng: &mut R) -> Option<&SoundAsset> {
        self.bank
            .special(name)
            .or_else(|| self.bank.pool().choose(rng))
    }
}
