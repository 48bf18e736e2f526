//! Sound assets: decoding WAV files and discovering the asset folder.
//!
//! A folder holds a few named "special" sounds (`space.wav`, `enter.wav`,
//! `cmd.wav`) and a numbered general pool (`key1.wav` … `key24.wav`). Any of
//! them may be missing; a folder with nothing usable yields an empty bank and
//! playback becomes a no-op.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use hound::{SampleFormat, WavReader};

use crate::{error::Error, Result};

/// Logical key names that get a dedicated sound when `<name>.wav` exists.
pub const SPECIAL_KEYS: [&str; 3] = ["space", "enter", "cmd"];

/// Highest `keyN.wav` index looked up for the general pool.
pub const POOL_SIZE: usize = 24;

/// Decoded PCM, interleaved f32 frames at the file's native rate.
#[derive(Debug)]
pub struct SampleData {
    samples: Vec<f32>,
    channels: u16,
    sample_rate: u32,
}

/// Shared, read-only handle to a decoded sound.
///
/// Cloning is cheap; every clone points at the same samples.
#[derive(Debug, Clone)]
pub struct SoundAsset {
    name: Arc<str>,
    data: Arc<SampleData>,
}

impl SoundAsset {
    /// Wrap already-decoded interleaved samples.
    pub fn new(name: &str, samples: Vec<f32>, channels: u16, sample_rate: u32) -> Self {
        let channels = channels.max(1);
        Self {
            name: Arc::from(name),
            data: Arc::new(SampleData {
                samples,
                channels,
                sample_rate,
            }),
        }
    }

    /// Decode a WAV file. Integer PCM of 8 to 32 bits and 32-bit float are
    /// supported.
    pub fn load(path: &Path) -> Result<Self> {
        let decode_err = |source: hound::Error| Error::Decode {
            path: path.to_owned(),
            source,
        };

        let mut reader = WavReader::open(path).map_err(decode_err)?;
        let spec = reader.spec();

        let samples: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
            (SampleFormat::Float, 32) => reader
                .samples::<f32>()
                .collect::<std::result::Result<_, _>>()
                .map_err(decode_err)?,
            (SampleFormat::Int, bits @ 1..=32) => {
                let scale = 1.0 / (1u64 << (bits - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 * scale))
                    .collect::<std::result::Result<_, _>>()
                    .map_err(decode_err)?
            }
            (format, bits) => {
                return Err(Error::UnsupportedFormat {
                    path: path.to_owned(),
                    bits,
                    format: match format {
                        SampleFormat::Float => "float",
                        SampleFormat::Int => "int",
                    },
                })
            }
        };

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self::new(&name, samples, spec.channels, spec.sample_rate))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn channels(&self) -> u16 {
        self.data.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.data.sample_rate
    }

    /// Number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.data.samples.len() / self.data.channels as usize
    }

    pub fn is_empty(&self) -> bool {
        self.frames() == 0
    }

    /// (left, right) of one frame. Mono plays on both sides; channels past
    /// the second are ignored.
    #[inline]
    pub fn frame(&self, index: usize) -> (f32, f32) {
        let channels = self.data.channels as usize;
        let base = index * channels;
        match self.data.samples.get(base..base + channels) {
            Some([mono]) => (*mono, *mono),
            Some([left, right, ..]) => (*left, *right),
            _ => (0.0, 0.0),
        }
    }

    /// Linearly interpolated (left, right) at a fractional frame position.
    #[inline]
    pub fn read_interpolated(&self, position: f64) -> (f32, f32) {
        let frames = self.frames();
        if frames == 0 || position < 0.0 {
            return (0.0, 0.0);
        }

        let idx = position as usize;
        if idx + 1 >= frames {
            return if idx < frames { self.frame(idx) } else { (0.0, 0.0) };
        }

        let frac = (position - idx as f64) as f32;
        let (l0, r0) = self.frame(idx);
        let (l1, r1) = self.frame(idx + 1);
        (l0 + (l1 - l0) * frac, r0 + (r1 - r0) * frac)
    }
}

/// Every sound loaded at startup.
#[derive(Debug, Clone, Default)]
pub struct AssetBank {
    special: HashMap<String, SoundAsset>,
    pool: Vec<SoundAsset>,
}

impl AssetBank {
    pub fn new(special: HashMap<String, SoundAsset>, pool: Vec<SoundAsset>) -> Self {
        Self { special, pool }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Load specials and the numbered pool from `dir`.
    ///
    /// Missing files are skipped silently; unreadable ones are logged and
    /// skipped. Never fails.
    pub fn load_dir(dir: &Path) -> Self {
        let mut special = HashMap::new();
        for key in SPECIAL_KEYS {
            if let Some(asset) = load_optional(&dir.join(format!("{key}.wav"))) {
                special.insert(key.to_owned(), asset);
            }
        }

        let pool: Vec<SoundAsset> = (1..=POOL_SIZE)
            .filter_map(|i| load_optional(&dir.join(format!("key{i}.wav"))))
            .collect();

        let bank = Self { special, pool };
        log::info!(
            "Loaded {} sounds from {} ({} special, {} pool)",
            bank.len(),
            dir.display(),
            bank.special.len(),
            bank.pool.len()
        );
        bank
    }

    /// Find the asset folder among `candidates` and load it. An absent
    /// folder is logged and yields an empty bank.
    pub fn discover(candidates: &[PathBuf], roots: &[PathBuf]) -> Self {
        match locate_dir(candidates, roots) {
            Some(dir) => Self::load_dir(&dir),
            None => {
                log::warn!("Audio folder not found (searched {:?})", candidates);
                Self::empty()
            }
        }
    }

    pub fn special(&self, name: &str) -> Option<&SoundAsset> {
        self.special.get(name)
    }

    pub fn specials(&self) -> &HashMap<String, SoundAsset> {
        &self.special
    }

    pub fn pool(&self) -> &[SoundAsset] {
        &self.pool
    }

    pub fn len(&self) -> usize {
        self.special.len() + self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// First existing directory among `candidates`, trying each relative
/// candidate under every root in order. Absolute candidates are used as-is.
pub fn locate_dir(candidates: &[PathBuf], roots: &[PathBuf]) -> Option<PathBuf> {
    candidates.iter().find_map(|candidate| {
        if candidate.is_absolute() {
            return candidate.is_dir().then(|| candidate.clone());
        }
        roots
            .iter()
            .map(|root| root.join(candidate))
            .find(|path| path.is_dir())
    })
}

/// Working directory, then the executable's directory.
pub fn default_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        if !roots.contains(&dir) {
            roots.push(dir);
        }
    }
    roots
}

fn load_optional(path: &Path) -> Option<SoundAsset> {
    if !path.is_file() {
        return None;
    }
    match SoundAsset::load(path) {
        Ok(asset) if asset.is_empty() => {
            log::warn!("Skipping empty sound {}", path.display());
            None
        }
        Ok(asset) => Some(asset),
        Err(e) => {
            log::warn!("Skipping sound: {e}");
            None
        }
    }
}
