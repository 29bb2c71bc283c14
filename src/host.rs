//! Host-facing adapter around [`CrushProcessor`].
//!
//! Plugin hosts talk in buses, symbolic sample sizes, parameter queues and
//! opaque state streams. `CrushPlugin` translates those into the core's
//! types and enforces the boundary rules the core assumes:
//!
//! - only mono→mono and stereo→stereo layouts are accepted,
//! - a block must arrive in the precision processing was set up for,
//! - parameter changes are applied before the block, last value wins,
//! - a state stream that fails to load leaves the current model untouched,
//! - topology changes are refused while processing is active.
//!
//! Everything except [`CrushPlugin::process`] runs on a non-realtime thread.

use std::io::{Read, Write};

use tracing::{info, warn};

use crate::error::HostError;
use crate::params::{CrushParams, ParamId};
use crate::processor::{CrushProcessor, ProcessContext, ProcessSetup, SampleBlock, SilenceFlags};
use crate::state::{read_state, write_state};

/// Sample width of the host's buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleSize {
    Sample32,
    Sample64,
}

impl SampleBlock<'_, '_> {
    pub fn sample_size(&self) -> SampleSize {
        match self {
            SampleBlock::F32(_) => SampleSize::Sample32,
            SampleBlock::F64(_) => SampleSize::Sample64,
        }
    }
}

/// Channel layout of one bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakerArrangement {
    Mono,
    Stereo,
    Other(usize),
}

impl SpeakerArrangement {
    pub fn channel_count(self) -> usize {
        match self {
            SpeakerArrangement::Mono => 1,
            SpeakerArrangement::Stereo => 2,
            SpeakerArrangement::Other(channels) => channels,
        }
    }
}

/// Target of a host parameter queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamTag {
    Param(ParamId),
    Bypass,
}

/// Automation points for one parameter within a block: `(sample offset, value)`.
#[derive(Debug, Clone, Copy)]
pub struct ParamQueue<'a> {
    pub tag: ParamTag,
    pub points: &'a [(usize, f32)],
}

/// Everything the host passes into one process call.
pub struct ProcessData<'a, 'b> {
    pub num_samples: usize,
    pub param_changes: &'a [ParamQueue<'a>],
    /// `None` when the host connected no audio buses.
    pub block: Option<SampleBlock<'a, 'b>>,
    pub input_silence: SilenceFlags,
}

/// Plugin-style wrapper owning the processor and the parameter model.
pub struct CrushPlugin {
    processor: CrushProcessor,
    sample_size: SampleSize,
    arrangement: SpeakerArrangement,
    active: bool,
}

impl CrushPlugin {
    pub fn new() -> Self {
        Self {
            processor: CrushProcessor::new(ProcessSetup::default()),
            sample_size: SampleSize::Sample32,
            arrangement: SpeakerArrangement::Stereo,
            active: false,
        }
    }

    pub fn params(&self) -> &CrushParams {
        self.processor.params()
    }

    pub fn processor(&self) -> &CrushProcessor {
        &self.processor
    }

    pub fn arrangement(&self) -> SpeakerArrangement {
        self.arrangement
    }

    pub fn sample_size(&self) -> SampleSize {
        self.sample_size
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Both 32-bit and 64-bit processing are supported.
    pub fn can_process_sample_size(&self, sample_size: SampleSize) -> bool {
        matches!(sample_size, SampleSize::Sample32 | SampleSize::Sample64)
    }

    fn ensure_inactive(&self) -> Result<(), HostError> {
        if self.active {
            warn!("topology change requested while processing is active");
            return Err(HostError::ProcessingActive);
        }
        Ok(())
    }

    /// Called by the host before processing starts. Refused while active.
    pub fn setup_processing(
        &mut self,
        sample_rate: f32,
        max_block_size: usize,
        sample_size: SampleSize,
    ) -> Result<(), HostError> {
        self.ensure_inactive()?;
        info!(sample_rate, max_block_size, ?sample_size, "setting up processing");

        self.sample_size = sample_size;
        let setup = self
            .processor
            .setup()
            .with_sample_rate(sample_rate)
            .with_max_block_size(max_block_size);
        self.processor.prepare(setup);
        Ok(())
    }

    /// Negotiate bus layouts. Anything other than 1→1 or 2→2 is refused and
    /// the plugin stays (or falls back to) stereo. Refused while active.
    pub fn set_bus_arrangements(
        &mut self,
        inputs: &[SpeakerArrangement],
        outputs: &[SpeakerArrangement],
    ) -> Result<(), HostError> {
        self.ensure_inactive()?;

        if inputs.len() != 1 || outputs.len() != 1 {
            warn!(inputs = inputs.len(), outputs = outputs.len(), "rejecting bus count");
            return Err(HostError::BusCount {
                inputs: inputs.len(),
                outputs: outputs.len(),
            });
        }

        let (input, output) = (inputs[0], outputs[0]);
        let channels = match (input.channel_count(), output.channel_count()) {
            (1, 1) => 1,
            (2, 2) => 2,
            _ => {
                warn!(?input, ?output, "unsupported arrangement, falling back to stereo");
                self.apply_arrangement(SpeakerArrangement::Stereo, 2);
                return Err(HostError::UnsupportedArrangement {
                    inputs: input,
                    outputs: output,
                });
            }
        };

        self.apply_arrangement(input, channels);
        Ok(())
    }

    fn apply_arrangement(&mut self, arrangement: SpeakerArrangement, channels: usize) {
        self.arrangement = arrangement;
        let setup = self.processor.setup().with_channels(channels);
        self.processor.prepare(setup);
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Apply parameter changes, then process the block.
    ///
    /// Returns the output silence flags.
    pub fn process(&mut self, data: ProcessData<'_, '_>) -> Result<SilenceFlags, HostError> {
        if !data.param_changes.is_empty() {
            let mut params = *self.processor.params();
            for queue in data.param_changes {
                let Some(&(_, value)) = queue.points.last() else {
                    continue;
                };
                match queue.tag {
                    ParamTag::Param(id) => params.set(id, value),
                    ParamTag::Bypass => params.set_bypass_normalized(value),
                }
            }
            self.processor.set_params(params);
        }

        let Some(block) = data.block else {
            return Ok(SilenceFlags::NONE);
        };

        let actual = block.sample_size();
        if actual != self.sample_size {
            return Err(HostError::SampleSizeMismatch {
                expected: self.sample_size,
                actual,
            });
        }

        let ctx = ProcessContext::new(data.num_samples).with_silence(data.input_silence);
        Ok(self.processor.process_dispatch(block, &ctx))
    }

    pub fn get_state<W: Write>(&self, writer: W) -> Result<(), HostError> {
        write_state(self.processor.params(), writer)?;
        Ok(())
    }

    /// Load a saved state. On failure the current parameters are kept.
    pub fn set_state<R: Read>(&mut self, reader: R) -> Result<(), HostError> {
        match read_state(reader) {
            Ok(params) => {
                self.processor.set_params(params);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to load state, keeping current parameters");
                Err(err.into())
            }
        }
    }
}

impl Default for CrushPlugin {
    fn default() -> Self {
        Self::new()
    }
}
