use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while configuring the engine or decoding sound files.
///
/// Runtime conditions such as a missing asset or a busy channel pool are not
/// errors; the engine logs and skips them.
#[derive(Debug, Error)]
pub enum Error {
    #[error("pan row {row} has {len} symbol(s); at least 2 are required")]
    PanRowTooShort { row: usize, len: usize },

    #[error("pan row {row} spans [{start}, {end}], outside [-1, 1]")]
    PanOutOfRange { row: usize, start: f32, end: f32 },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("unsupported sample format in {}: {bits}-bit {format}", path.display())]
    UnsupportedFormat {
        path: PathBuf,
        bits: u16,
        format: &'static str,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("failed to parse config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
