//! Shared state types for the UI
//!
//! Static facts are captured once at startup; each keystroke appends an
//! `EventRecord` to a short rolling history.

use std::collections::VecDeque;

use keyclack::engine::{Outcome, ShapedEvent};

/// Number of keystrokes kept for the history table
pub const HISTORY_LEN: usize = 64;

/// Static state captured once at initialization
#[derive(Clone, Debug)]
pub struct UiStateInit {
    /// Output sample rate in Hz
    pub sample_rate: u32,
    /// Output device channel count
    pub device_channels: usize,
    /// Mixer playback channels
    pub mixer_channels: usize,
    /// Total sounds loaded
    pub sounds_loaded: usize,
    /// Names of the special sounds that were found
    pub specials: Vec<String>,
    /// Size of the general pool
    pub pool_size: usize,
}

/// How a keystroke ended up
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventResult {
    Played,
    NoAsset,
    NoChannel,
    Failed,
}

impl EventResult {
    pub fn from_outcome(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Played | Outcome::Scheduled(_) => Self::Played,
            Outcome::NoAsset => Self::NoAsset,
            Outcome::NoChannel => Self::NoChannel,
            Outcome::SpawnFailed => Self::Failed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Played => "played",
            Self::NoAsset => "no sound",
            Self::NoChannel => "dropped",
            Self::Failed => "failed",
        }
    }
}

/// One keystroke as shown in the history table
#[derive(Clone, Debug)]
pub struct EventRecord {
    pub key: String,
    pub shaped: ShapedEvent,
    pub result: EventResult,
}

/// Dynamic state, updated on every keystroke
#[derive(Debug, Default)]
pub struct UiState {
    pub history: VecDeque<EventRecord>,
    pub total: u64,
    pub dropped: u64,
}

impl UiState {
    pub fn record(&mut self, record: EventRecord) {
        self.total += 1;
        if record.result != EventResult::Played {
            self.dropped += 1;
        }
        if self.history.len() == HISTORY_LEN {
            self.history.pop_back();
        }
        self.history.push_front(record);
    }

    pub fn last(&self) -> Option<&EventRecord> {
        self.history.front()
    }
}
