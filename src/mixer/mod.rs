// Purpose: the concrete playback backend
// Trigger threads reserve channels and enqueue sounds; the audio callback
// renders every busy channel and frees it when its sound ends

pub mod channels;
pub mod message;
pub mod voice;

use std::sync::Arc;

use parking_lot::Mutex;
use rtrb::{Producer, PushError, RingBuffer};

use crate::{
    dsp::{amplify::apply_gain, mix},
    engine::backend::PlaybackBackend,
    io::assets::SoundAsset,
    mixer::{
        channels::{ChannelLease, ChannelPool},
        message::{MessageReceiver, MixerMessage},
        voice::SampleVoice,
    },
    MAX_BLOCK_SIZE,
};

/// Output ceiling applied to the summed bus.
const CEILING: f32 = 1.0;

/// Audio-thread side: owns the voices, renders interleaved blocks.
pub struct Mixer<Rx: MessageReceiver = rtrb::Consumer<MixerMessage>> {
    voices: Vec<SampleVoice>,
    pool: Arc<ChannelPool>,
    rx: Rx,
    bus_left: Vec<f32>,
    bus_right: Vec<f32>,
    voice_left: Vec<f32>,
    voice_right: Vec<f32>,
}

impl Mixer {
    /// Create a mixer with `channels` voices and its control handle.
    ///
    /// `output_rate` is the device sample rate; assets at other rates are
    /// resampled on playback.
    pub fn new(channels: usize, output_rate: u32) -> (Mixer, MixerHandle) {
        let (tx, rx) = RingBuffer::<MixerMessage>::new(channels.max(1) * 2);
        let pool = Arc::new(ChannelPool::new(channels));

        let mixer = Mixer::with_receiver(Arc::clone(&pool), rx);
        let handle = MixerHandle {
            pool,
            tx: Mutex::new(tx),
            output_rate,
        };
        (mixer, handle)
    }
}

impl<Rx: MessageReceiver> Mixer<Rx> {
    pub fn with_receiver(pool: Arc<ChannelPool>, rx: Rx) -> Self {
        Self {
            voices: (0..pool.capacity()).map(|_| SampleVoice::new()).collect(),
            pool,
            rx,
            bus_left: vec![0.0; MAX_BLOCK_SIZE],
            bus_right: vec![0.0; MAX_BLOCK_SIZE],
            voice_left: vec![0.0; MAX_BLOCK_SIZE],
            voice_right: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    /// Fill an interleaved device buffer with `channels` samples per frame.
    pub fn render(&mut self, out: &mut [f32], channels: usize) {
        if channels == 0 {
            return;
        }

        self.drain_messages();

        for chunk in out.chunks_mut(MAX_BLOCK_SIZE * channels) {
            let frames = chunk.len() / channels;
            self.render_block(frames);
            mix::interleave(
                &self.bus_left[..frames],
                &self.bus_right[..frames],
                &mut chunk[..frames * channels],
                channels,
            );
            chunk[frames * channels..].fill(0.0);
        }
    }

    fn drain_messages(&mut self) {
        while let Some(message) = self.rx.pop() {
            match message {
                MixerMessage::Play {
                    channel,
                    asset,
                    rate,
                } => {
                    if let Some(voice) = self.voices.get_mut(channel) {
                        voice.start(asset, rate);
                    }
                }
                MixerMessage::StopAll => {
                    for (index, voice) in self.voices.iter_mut().enumerate() {
                        if voice.is_active() {
                            voice.stop();
                            self.pool.release(index);
                        }
                    }
                }
            }
        }
    }

    fn render_block(&mut self, frames: usize) {
        let bus_left = &mut self.bus_left[..frames];
        let bus_right = &mut self.bus_right[..frames];
        bus_left.fill(0.0);
        bus_right.fill(0.0);

        for (index, voice) in self.voices.iter_mut().enumerate() {
            if !voice.is_active() {
                continue;
            }

            let voice_left = &mut self.voice_left[..frames];
            let voice_right = &mut self.voice_right[..frames];
            voice.render(voice_left, voice_right);

            let (gain_left, gain_right) = self.pool.gains(index);
            apply_gain(voice_left, gain_left);
            apply_gain(voice_right, gain_right);
            mix::sum_in_place(bus_left, voice_left);
            mix::sum_in_place(bus_right, voice_right);

            if !voice.is_active() {
                self.pool.release(index);
            }
        }

        mix::hard_clip(bus_left, CEILING);
        mix::hard_clip(bus_right, CEILING);
        self.pool
            .set_peak(mix::peak(bus_left).max(mix::peak(bus_right)));
    }

    /// Voices currently producing sound.
    pub fn active_voices(&self) -> usize {
        self.voices.iter().filter(|v| v.is_active()).count()
    }
}

/// Control side of the mixer, used as the engine's playback backend.
pub struct MixerHandle {
    pool: Arc<ChannelPool>,
    tx: Mutex<Producer<MixerMessage>>,
    output_rate: u32,
}

impl MixerHandle {
    pub fn pool(&self) -> &Arc<ChannelPool> {
        &self.pool
    }

    /// Silence every channel.
    pub fn stop_all(&self) {
        if self.tx.lock().push(MixerMessage::StopAll).is_err() {
            log::debug!("mixer queue full, stop request dropped");
        }
    }

    /// Playback rate for `asset` on this output: sample-rate conversion times
    /// the pitch deviation.
    pub fn playback_rate(&self, asset: &SoundAsset, pitch_offset: f32) -> f64 {
        if self.output_rate == 0 {
            return 1.0;
        }
        let ratio = asset.sample_rate() as f64 / self.output_rate as f64;
        ratio * (1.0 + pitch_offset as f64)
    }
}

impl PlaybackBackend for MixerHandle {
    type Channel = ChannelLease;

    fn allocate_channel(&self) -> Option<ChannelLease> {
        ChannelLease::acquire(&self.pool)
    }

    fn set_channel_gains(&self, channel: &ChannelLease, left: f32, right: f32) {
        self.pool.set_gains(channel.index(), left, right);
    }

    fn play(&self, channel: ChannelLease, asset: &SoundAsset, pitch_offset: f32) {
        let message = MixerMessage::Play {
            channel: channel.index(),
            asset: asset.clone(),
            rate: self.playback_rate(asset, pitch_offset),
        };

        match self.tx.lock().push(message) {
            Ok(()) => {
                channel.disarm();
            }
            Err(PushError::Full(_)) => {
                // lease drops here and frees the channel
                log::debug!("mixer queue full, dropping {}", asset.name());
            }
        }
    }
}
