use crate::io::assets::SoundAsset;

/// What the engine needs from an audio output.
///
/// Channels are allocated before the timing delay and handed back through
/// `play`, so a backend with no free channel can refuse up front. Dropping a
/// channel without playing it must return it to the backend.
pub trait PlaybackBackend: Send + Sync + 'static {
    type Channel: Send + 'static;

    /// Reserve a free channel, or `None` when every channel is busy.
    fn allocate_channel(&self) -> Option<Self::Channel>;

    /// Set the per-side gains, each in [0, 1].
    fn set_channel_gains(&self, channel: &Self::Channel, left: f32, right: f32);

    /// Start `asset` on `channel`. `pitch_offset` is advisory: backends that
    /// cannot change playback rate ignore it.
    fn play(&self, channel: Self::Channel, asset: &SoundAsset, pitch_offset: f32);
}
