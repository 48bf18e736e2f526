//! Low-level DSP primitives used by the engine and the mixer.
//!
//! These components are allocation-free and realtime-safe. They stay focused
//! on the signal math so the engine can layer on locking and orchestration.

/// Channel gain clamping and the stereo pan law.
pub mod amplify;
/// Event-driven gain limiter.
pub mod limiter;
/// Voice summing and output interleaving.
pub mod mix;

pub use limiter::Limiter;
