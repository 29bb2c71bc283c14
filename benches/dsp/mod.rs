//! Benchmarks for low-level DSP primitives.

mod crusher;
mod lfo;
mod mix;

pub use crusher::bench_crusher;
pub use lfo::bench_lfo;
pub use mix::bench_mix;
