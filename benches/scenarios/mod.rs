//! Benchmarks for real-world scenarios.

mod engine;
mod mixer;

pub use engine::bench_engine;
pub use mixer::bench_mixer;
