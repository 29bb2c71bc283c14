//! Low-level DSP primitives used by the block processor.
//!
//! These components are allocation-free and realtime-safe. They stay focused
//! on the signal-processing math so the processor can layer on channel
//! routing, parameter snapshots and precision dispatch.

/// Bit depth reduction with LFO-modulated resolution.
pub mod crusher;
/// Triangle LFO with a wrapping phase accumulator.
pub mod lfo;
/// Additive dry/wet blending.
pub mod mix;
/// `f32` / `f64` sample abstraction.
pub mod sample;

pub use crusher::BitCrusher;
pub use lfo::Lfo;
pub use sample::Sample;
