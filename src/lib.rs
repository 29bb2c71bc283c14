pub mod dsp;
pub mod error;
pub mod host; // Plugin-boundary adapter (buses, precision, state)
pub mod params;
pub mod processor; // Block-level routing, bypass and dry/wet
pub mod state;

pub use error::{HostError, StateError};
pub use params::{CrushParams, ParamId, ParamMessage};
pub use processor::{AudioBlock, CrushProcessor, ProcessContext, ProcessSetup, SilenceFlags};

pub const MAX_BLOCK_SIZE: usize = 2048;
/// Highest channel count the silence bitmask can describe.
pub const MAX_CHANNELS: usize = 64;

pub const MIN_LFO_RATE: f32 = 0.1;
pub const MAX_LFO_RATE: f32 = 10.0;

/// Full resolution, treated as 16 bits whatever the host's format.
pub const MAX_BITS: u32 = 16;
pub const MIN_BITS: u32 = 1;
