pub mod config; // Tunable constants and validation
pub mod dsp;
pub mod engine; // Per-event orchestration and shared state
pub mod error;
pub mod humanize; // Velocity, pan and humanization shaping
pub mod io;
pub mod mixer; // Channel pool and sample playback backend

pub use config::EngineConfig;
pub use error::{Error, Result};

pub const MAX_BLOCK_SIZE: usize = 2048;
