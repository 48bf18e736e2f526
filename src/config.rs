//! Engine configuration.
//!
//! Every tunable of the keystroke pipeline lives here: device settings for
//! the playback backend, humanization ranges, velocity window, limiter
//! coefficients, keyboard pan geometry and the asset search path.

use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Output device settings. Only the playback backend reads these.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct AudioConfig {
    /// Requested output sample rate in Hz
    pub sample_rate: u32,
    /// Requested device buffer size in frames
    pub buffer_size: u32,
    /// Number of simultaneously playing channels
    pub channels: usize,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            buffer_size: 256,
            channels: 64,
        }
    }
}

/// Random variation applied to every keystroke.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct HumanizeConfig {
    /// Volume at full velocity before variation
    pub base_volume: f32,
    /// Half-width of the uniform volume variation
    pub volume_range: f32,
    /// Upper bound of the pre-trigger delay, in seconds
    pub timing_range: f32,
    /// Half-width of the uniform pitch offset (fraction of playback rate)
    pub pitch_range: f32,
}

impl HumanizeConfig {
    /// Same base volume, no randomness.
    pub fn deterministic() -> Self {
        Self {
            volume_range: 0.0,
            timing_range: 0.0,
            pitch_range: 0.0,
            ..Self::default()
        }
    }
}

impl Default for HumanizeConfig {
    fn default() -> Self {
        Self {
            base_volume: 0.9,
            volume_range: 0.25,
            timing_range: 0.006,
            pitch_range: 0.015,
        }
    }
}

/// Typing-speed estimation window.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct VelocityConfig {
    /// Number of timestamps retained
    pub history_size: usize,
    /// Shortest inter-key interval considered, in seconds
    pub min_interval: f64,
    /// Interval at (or beyond) which velocity reaches zero, in seconds
    pub max_interval: f64,
    /// Velocity reported before two events have been seen
    pub neutral: f32,
}

impl Default for VelocityConfig {
    fn default() -> Self {
        Self {
            history_size: 32,
            min_interval: 0.001,
            max_interval: 0.3,
            neutral: 0.5,
        }
    }
}

/// Per-event gain limiter coefficients.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct LimiterConfig {
    /// Requested volume above which gain is reduced
    pub threshold: f32,
    /// Multiplier applied to gain on each over-threshold event
    pub attack: f64,
    /// Fraction of the distance to unity recovered per quiet event
    pub release: f64,
    /// Lowest gain the limiter will settle at
    pub floor: f64,
}

impl Default for LimiterConfig {
    fn default() -> Self {
        Self {
            threshold: 0.95,
            attack: 0.9,
            release: 0.01,
            floor: 1e-3,
        }
    }
}

/// One keyboard row: its symbols left to right and the pan at either end.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PanRow {
    pub symbols: String,
    pub start: f32,
    pub end: f32,
}

impl PanRow {
    pub fn new(symbols: &str, start: f32, end: f32) -> Self {
        Self {
            symbols: symbols.to_owned(),
            start,
            end,
        }
    }
}

/// Standard QWERTY geometry: wider rows spread further across the field.
pub fn qwerty_rows() -> Vec<PanRow> {
    vec![
        PanRow::new("1234567890", -0.9, 0.9),
        PanRow::new("qwertyuiop", -0.8, 0.8),
        PanRow::new("asdfghjkl", -0.7, 0.7),
        PanRow::new("zxcvbnm", -0.6, 0.6),
    ]
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub audio: AudioConfig,
    pub humanize: HumanizeConfig,
    pub velocity: VelocityConfig,
    pub limiter: LimiterConfig,
    pub pan_rows: Vec<PanRow>,
    /// Folder names searched for sound files, first match wins
    pub asset_dirs: Vec<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            audio: AudioConfig::default(),
            humanize: HumanizeConfig::default(),
            velocity: VelocityConfig::default(),
            limiter: LimiterConfig::default(),
            pan_rows: qwerty_rows(),
            asset_dirs: vec![PathBuf::from("audio files"), PathBuf::from("audio")],
        }
    }
}

impl EngineConfig {
    /// Load a config from a JSON file. Missing fields keep their defaults.
    #[cfg(feature = "serde")]
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every numeric setting against its documented range.
    ///
    /// Pan rows are validated separately when the `PanMap` is built.
    pub fn validate(&self) -> Result<()> {
        let h = &self.humanize;
        check(unit(h.base_volume), "humanize.base_volume must lie in [0, 1]")?;
        check(non_negative(h.volume_range), "humanize.volume_range must be >= 0")?;
        check(non_negative(h.timing_range), "humanize.timing_range must be >= 0")?;
        check(non_negative(h.pitch_range), "humanize.pitch_range must be >= 0")?;
        check(h.pitch_range < 1.0, "humanize.pitch_range must be < 1")?;

        let v = &self.velocity;
        check(v.history_size >= 2, "velocity.history_size must be >= 2")?;
        check(
            v.min_interval.is_finite() && v.min_interval >= 0.0,
            "velocity.min_interval must be >= 0",
        )?;
        check(
            v.max_interval.is_finite() && v.max_interval > v.min_interval,
            "velocity.max_interval must exceed min_interval",
        )?;
        check(unit(v.neutral), "velocity.neutral must lie in [0, 1]")?;

        let l = &self.limiter;
        check(l.threshold.is_finite(), "limiter.threshold must be finite")?;
        check(
            l.attack > 0.0 && l.attack < 1.0,
            "limiter.attack must lie in (0, 1)",
        )?;
        check(
            l.release > 0.0 && l.release <= 1.0,
            "limiter.release must lie in (0, 1]",
        )?;
        check(
            l.floor > 0.0 && l.floor <= 1.0,
            "limiter.floor must lie in (0, 1]",
        )?;

        let a = &self.audio;
        check(a.channels > 0, "audio.channels must be > 0")?;
        check(a.sample_rate > 0, "audio.sample_rate must be > 0")?;

        Ok(())
    }
}

fn check(ok: bool, message: &str) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(Error::InvalidConfig(message.to_owned()))
    }
}

fn unit(x: f32) -> bool {
    (0.0..=1.0).contains(&x)
}

fn non_negative(x: f32) -> bool {
    x.is_finite() && x >= 0.0
}
