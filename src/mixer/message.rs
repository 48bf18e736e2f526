use rtrb::Consumer;

use crate::io::assets::SoundAsset;

/// Control messages from trigger threads to the audio callback.
#[derive(Debug, Clone)]
pub enum MixerMessage {
    /// Start `asset` on channel `channel`, advancing `rate` source frames
    /// per output frame.
    Play {
        channel: usize,
        asset: SoundAsset,
        rate: f64,
    },
    /// Silence every channel
    StopAll,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<MixerMessage>;
}

impl MessageReceiver for Consumer<MixerMessage> {
    fn pop(&mut self) -> Option<MixerMessage> {
        Consumer::pop(self).ok()
    }
}
