// Purpose: per-keystroke shaping - how fast, where, and how varied
// Everything here is single-owner; the engine adds the locking

pub mod humanizer;
pub mod pan_map;
pub mod velocity;

pub use humanizer::{Humanized, Humanizer};
pub use pan_map::PanMap;
pub use velocity::VelocityEstimator;
