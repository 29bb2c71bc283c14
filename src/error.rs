//! Errors raised at the host boundary. The audio path itself never fails.

use thiserror::Error;

use crate::host::{SampleSize, SpeakerArrangement};

#[derive(Debug, Error)]
pub enum StateError {
    #[error("state stream ended before `{field}` could be read")]
    Truncated { field: &'static str },

    #[error("state stream I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum HostError {
    #[error("unsupported bus arrangement {inputs:?} -> {outputs:?}, falling back to stereo")]
    UnsupportedArrangement {
        inputs: SpeakerArrangement,
        outputs: SpeakerArrangement,
    },

    #[error("expected exactly one input and one output bus, got {inputs} -> {outputs}")]
    BusCount { inputs: usize, outputs: usize },

    #[error("block delivered as {actual:?} but processing was set up for {expected:?}")]
    SampleSizeMismatch {
        expected: SampleSize,
        actual: SampleSize,
    },

    #[error("topology cannot change while processing is active")]
    ProcessingActive,

    #[error(transparent)]
    State(#[from] StateError),
}
