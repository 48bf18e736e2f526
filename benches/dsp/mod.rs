//! Benchmarks for low-level DSP primitives.

mod amplify;
mod limiter;
mod mix;

pub use amplify::bench_amplify;
pub use limiter::bench_limiter;
pub use mix::bench_mix;
