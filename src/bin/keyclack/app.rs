//! Keyclack - application builder and runner

use std::{
    fs::File,
    io::{stdout, Write},
    path::PathBuf,
};

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    BufferSize, Device, SampleFormat, SampleRate, Stream, StreamConfig,
};
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::supports_keyboard_enhancement,
};

use keyclack::{
    engine::Engine,
    io::assets::{default_roots, AssetBank},
    mixer::{Mixer, MixerHandle},
    EngineConfig,
};

use super::ui::{UiApp, UiStateInit};

const LOG_FILE: &str = "keyclack.log";
const CONFIG_FILE: &str = "keyclack.json";

/// Send log output to a file; the terminal belongs to the UI.
pub fn init_logging() -> EyreResult<()> {
    let file = File::create(LOG_FILE).wrap_err_with(|| format!("failed to create {LOG_FILE}"))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Defaults, overridden by `keyclack.json` in the working directory.
pub fn load_config() -> EyreResult<EngineConfig> {
    let path = PathBuf::from(CONFIG_FILE);
    if !path.is_file() {
        return Ok(EngineConfig::default());
    }

    #[cfg(feature = "serde")]
    {
        log::info!("Loading config from {}", path.display());
        EngineConfig::from_json_file(&path)
            .wrap_err_with(|| format!("failed to load {}", path.display()))
    }

    #[cfg(not(feature = "serde"))]
    {
        log::warn!("{} ignored: built without the serde feature", path.display());
        Ok(EngineConfig::default())
    }
}

/// Main application builder
pub struct Keyclack {
    config: EngineConfig,
    asset_dir: Option<PathBuf>,
}

impl Keyclack {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            asset_dir: None,
        }
    }

    /// Load sounds from this folder instead of searching for one
    pub fn asset_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.asset_dir = dir;
        self
    }

    /// Run the application (takes over the terminal, plays audio)
    pub fn run(self) -> EyreResult<()> {
        self.config.validate()?;

        let assets = match &self.asset_dir {
            Some(dir) if dir.is_dir() => AssetBank::load_dir(dir),
            Some(dir) => {
                log::warn!("Audio folder {} not found", dir.display());
                AssetBank::empty()
            }
            None => AssetBank::discover(&self.config.asset_dirs, &default_roots()),
        };

        let output = open_output(&self.config)?;
        let init = UiStateInit {
            sample_rate: output.sample_rate,
            device_channels: output.channels,
            mixer_channels: self.config.audio.channels,
            sounds_loaded: assets.len(),
            specials: {
                let mut names: Vec<String> = assets.specials().keys().cloned().collect();
                names.sort();
                names
            },
            pool_size: assets.pool().len(),
        };

        let engine = Engine::new(&self.config, assets, output.handle)?;

        let enhanced = supports_keyboard_enhancement().unwrap_or(false);
        let mut terminal = ratatui::init();
        if enhanced {
            execute!(
                stdout(),
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                        | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
                )
            )?;
        }

        let result = UiApp::new(init).run(&mut terminal, &engine);

        if enhanced {
            pop_keyboard_flags(&mut stdout());
        }
        ratatui::restore();

        engine.backend().stop_all();
        drop(output.stream);
        log::info!("Stopped");
        result
    }
}

/// A running output stream and the handle that feeds it
struct Output {
    stream: Stream,
    handle: MixerHandle,
    sample_rate: u32,
    channels: usize,
}

fn open_output(config: &EngineConfig) -> EyreResult<Output> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let default_config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let mut stream_config: StreamConfig = default_config.config();
    let requested_rate = config.audio.sample_rate;
    if supports_rate(&device, stream_config.channels, requested_rate) {
        stream_config.sample_rate = SampleRate(requested_rate);
    } else {
        log::warn!(
            "Device does not support {} Hz, using {} Hz",
            requested_rate,
            stream_config.sample_rate.0
        );
    }

    let sample_rate = stream_config.sample_rate.0;
    let channels = stream_config.channels as usize;

    let fixed = StreamConfig {
        buffer_size: BufferSize::Fixed(config.audio.buffer_size),
        ..stream_config.clone()
    };

    let (stream, handle) = match build_stream(&device, &fixed, config.audio.channels) {
        Ok(built) => built,
        Err(e) => {
            log::warn!(
                "Buffer size {} rejected ({e}), using device default",
                config.audio.buffer_size
            );
            build_stream(&device, &stream_config, config.audio.channels)
                .wrap_err("failed to build output stream")?
        }
    };

    stream.play().wrap_err("failed to start output stream")?;
    log::info!(
        "Output: {} Hz, {} channels, {} mixer channels",
        sample_rate,
        channels,
        config.audio.channels
    );

    Ok(Output {
        stream,
        handle,
        sample_rate,
        channels,
    })
}

fn supports_rate(device: &Device, channels: u16, rate: u32) -> bool {
    device
        .supported_output_configs()
        .map(|mut ranges| {
            ranges.any(|range| {
                range.channels() == channels
                    && range.sample_format() == SampleFormat::F32
                    && range.min_sample_rate().0 <= rate
                    && rate <= range.max_sample_rate().0
            })
        })
        .unwrap_or(false)
}

fn build_stream(
    device: &Device,
    config: &StreamConfig,
    mixer_channels: usize,
) -> Result<(Stream, MixerHandle), cpal::BuildStreamError> {
    let (mut mixer, handle) = Mixer::new(mixer_channels, config.sample_rate.0);
    let channels = config.channels as usize;

    let stream = device.build_output_stream(
        config,
        move |data: &mut [f32], _| mixer.render(data, channels),
        |err| log::error!("Audio stream error: {}", err),
        None,
    )?;

    Ok((stream, handle))
}

/// Undo `PushKeyboardEnhancementFlags`. Failures are logged, not raised, so
/// the rest of the terminal teardown still runs.
fn pop_keyboard_flags<W: Write>(out: &mut W) -> bool {
    match execute!(out, PopKeyboardEnhancementFlags) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Failed to restore keyboard mode: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct ClosedTerminal;

    impl Write for ClosedTerminal {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn pop_keyboard_flags_writes_escape_sequence() {
        let mut out = Vec::new();
        assert!(pop_keyboard_flags(&mut out));
        assert!(!out.is_empty());
    }

    #[test]
    fn pop_keyboard_flags_reports_write_failure() {
        assert!(!pop_keyboard_flags(&mut ClosedTerminal));
    }
}
