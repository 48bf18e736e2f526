pub mod backend;
pub mod dispatch;
pub mod limiter;
pub mod router;

pub use self::{
    backend::PlaybackBackend,
    dispatch::{Dispatch, Engine, Outcome, ShapedEvent},
    limiter::LimiterState,
    router::SoundRouter,
};
