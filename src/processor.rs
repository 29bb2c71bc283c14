//! Block processor: bypass, per-channel crushing and dry/wet blending.

/*
Block Processing
================

The host hands us one block at a time: a handful of channel buffers, a
sample count and a silence bitmask. Everything for that block happens in a
single call on the audio thread, with no allocation and no locks.

Per block:

  1. Snapshot parameters (drained from the message queue BEFORE the block,
     never mid-block, so one block is always internally consistent).
  2. Bypass?  → copy input to output (or leave in-place buffers alone),
                mirror the input silence flags, done.
  3. Otherwise, for each channel present on both sides:

        for each sample:
            m       = lfo.step()                    one phase step
            crushed = quantize(x, resolution(m))
            out     = x × dry_level + crushed × wet_level


Channels and the LFO
--------------------

There is one LFO per effect instance. Every channel of a block starts from
the same phase, so left and right crush in lockstep and the stereo image
stays put. After the block the phase has moved exactly `num_samples` steps,
no matter how many channels were processed:

    block start phase  ──┬── L: step × N ──┐
                         └── R: step × N ──┴──> phase + N steps

This is one advance per frame, not one per sample of every channel. A
single oscillator stepped straight through L then R would hand the right
channel a different slice of the cycle and advance `channels × N` per
block, which makes the modulation rate depend on the channel count.

Channel counts may differ between input and output (host renegotiation in
progress, odd routing). Only the overlapping channels are processed; extra
output channels are left as the host provided them.


Topology Changes
----------------

A new sample rate or channel layout is a discontinuity: `prepare()` throws
away the crusher and its LFO and builds fresh ones, then re-applies the
current parameters. Ordinary block boundaries never touch the phase.
`prepare()` must not run while the audio thread is inside `process()`;
that is the caller's responsibility (hosts only reconfigure while inactive).


Precision
---------

The routing below is generic over `Sample`, so the `f32` and `f64` entry
points are the same code monomorphized twice.
*/

use tracing::debug;

use crate::dsp::{
    crusher::{clamp_unit, BitCrusher},
    mix::blend_additive,
    sample::Sample,
};
use crate::params::{CrushParams, MessageReceiver, ParamMessage};
use crate::{MAX_BLOCK_SIZE, MAX_CHANNELS};

/// Processing topology negotiated with the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessSetup {
    pub sample_rate: f32,
    pub max_block_size: usize,
    pub channels: usize,
}

impl ProcessSetup {
    pub fn new(sample_rate: f32, channels: usize) -> Self {
        Self {
            sample_rate,
            max_block_size: MAX_BLOCK_SIZE,
            channels: channels.min(MAX_CHANNELS),
        }
    }

    pub fn with_sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_channels(mut self, channels: usize) -> Self {
        self.channels = channels.min(MAX_CHANNELS);
        self
    }

    pub fn with_max_block_size(mut self, max_block_size: usize) -> Self {
        self.max_block_size = max_block_size;
        self
    }
}

impl Default for ProcessSetup {
    fn default() -> Self {
        Self::new(44_100.0, 2)
    }
}

/// One bit per channel; a set bit means the channel is silent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SilenceFlags(pub u64);

impl SilenceFlags {
    pub const NONE: SilenceFlags = SilenceFlags(0);

    /// Every one of `channels` channels flagged silent.
    pub fn all(channels: usize) -> Self {
        SilenceFlags(channel_mask(channels))
    }

    pub fn is_silent(self, channel: usize) -> bool {
        channel < MAX_CHANNELS && self.0 & (1u64 << channel) != 0
    }

    /// Drop flags for channels beyond `channels`.
    pub fn masked(self, channels: usize) -> Self {
        SilenceFlags(self.0 & channel_mask(channels))
    }

}

#[inline]
fn channel_mask(channels: usize) -> u64 {
    if channels >= MAX_CHANNELS {
        u64::MAX
    } else {
        (1u64 << channels) - 1
    }
}

/// Read-only per-block information.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessContext {
    pub num_samples: usize,
    pub input_silence: SilenceFlags,
}

impl ProcessContext {
    pub fn new(num_samples: usize) -> Self {
        Self {
            num_samples,
            input_silence: SilenceFlags::NONE,
        }
    }

    pub fn with_silence(mut self, input_silence: SilenceFlags) -> Self {
        self.input_silence = input_silence;
        self
    }
}

/// Channel buffers for one block.
///
/// Hosts either hand over distinct input and output buffers or a single set
/// of buffers to process in place.
pub enum AudioBlock<'a, 'b, S> {
    Separate {
        inputs: &'a [&'b [S]],
        outputs: &'a mut [&'b mut [S]],
    },
    InPlace(&'a mut [&'b mut [S]]),
}

/// An [`AudioBlock`] in whichever precision the host negotiated.
pub enum SampleBlock<'a, 'b> {
    F32(AudioBlock<'a, 'b, f32>),
    F64(AudioBlock<'a, 'b, f64>),
}

/// The effect core: one crusher (and its LFO) plus the current parameters.
pub struct CrushProcessor {
    setup: ProcessSetup,
    params: CrushParams,
    crusher: BitCrusher,
}

impl CrushProcessor {
    pub fn new(setup: ProcessSetup) -> Self {
        let mut processor = Self {
            setup,
            params: CrushParams::default(),
            crusher: BitCrusher::new(),
        };
        processor.sync_crusher();
        processor
    }

    pub fn setup(&self) -> ProcessSetup {
        self.setup
    }

    pub fn params(&self) -> &CrushParams {
        &self.params
    }

    pub fn crusher(&self) -> &BitCrusher {
        &self.crusher
    }

    /// Adopt a new topology. Rebuilds the crusher (resetting LFO phase) only
    /// when the setup actually changed; returns whether it did.
    pub fn prepare(&mut self, setup: ProcessSetup) -> bool {
        if setup == self.setup {
            return false;
        }

        debug!(
            sample_rate = setup.sample_rate,
            channels = setup.channels,
            max_block_size = setup.max_block_size,
            "rebuilding crusher for new topology"
        );

        self.setup = setup;
        self.crusher = BitCrusher::new();
        self.sync_crusher();
        true
    }

    /// Replace the parameter snapshot used from the next block on.
    ///
    /// The snapshot is stored as given; levels are clamped where they are used.
    pub fn set_params(&mut self, params: CrushParams) {
        self.params = params;
        self.sync_crusher();
    }

    pub fn apply_message(&mut self, message: ParamMessage) {
        self.params.apply(message);
        self.sync_crusher();
    }

    /// Apply every queued parameter change. Call at block start only.
    pub fn drain_messages<R: MessageReceiver>(&mut self, rx: &mut R) -> usize {
        let mut applied = 0;
        while let Some(message) = rx.pop() {
            self.params.apply(message);
            applied += 1;
        }
        if applied > 0 {
            self.sync_crusher();
        }
        applied
    }

    fn sync_crusher(&mut self) {
        self.crusher.set_amount(self.params.crush_amount());
        self.crusher
            .set_lfo(self.params.lfo_rate, self.params.lfo_depth);
    }

    /// Process one block in whichever buffer layout the host provided.
    pub fn process<S: Sample>(
        &mut self,
        block: AudioBlock<'_, '_, S>,
        ctx: &ProcessContext,
    ) -> SilenceFlags {
        match block {
            AudioBlock::Separate { inputs, outputs } => self.process_separate(inputs, outputs, ctx),
            AudioBlock::InPlace(buffers) => self.process_in_place(buffers, ctx),
        }
    }

    pub fn process_f32(&mut self, block: AudioBlock<'_, '_, f32>, ctx: &ProcessContext) -> SilenceFlags {
        self.process(block, ctx)
    }

    pub fn process_f64(&mut self, block: AudioBlock<'_, '_, f64>, ctx: &ProcessContext) -> SilenceFlags {
        self.process(block, ctx)
    }

    pub fn process_dispatch(&mut self, block: SampleBlock<'_, '_>, ctx: &ProcessContext) -> SilenceFlags {
        match block {
            SampleBlock::F32(block) => self.process_f32(block, ctx),
            SampleBlock::F64(block) => self.process_f64(block, ctx),
        }
    }

    /// Read from `inputs`, write to `outputs`.
    pub fn process_separate<S: Sample>(
        &mut self,
        inputs: &[&[S]],
        outputs: &mut [&mut [S]],
        ctx: &ProcessContext,
    ) -> SilenceFlags {
        if inputs.is_empty() || outputs.is_empty() {
            return SilenceFlags::NONE;
        }

        let channels = inputs.len().min(outputs.len());
        let num_samples = inputs[..channels]
            .iter()
            .map(|buffer| buffer.len())
            .chain(outputs[..channels].iter().map(|buffer| buffer.len()))
            .fold(ctx.num_samples, usize::min);

        if self.params.bypass {
            for (input, output) in inputs.iter().zip(outputs.iter_mut()) {
                output[..num_samples].copy_from_slice(&input[..num_samples]);
            }
            return ctx.input_silence.masked(outputs.len());
        }

        let (sample_rate, dry, wet) = self.block_constants::<S>();
        let start_phase = self.crusher.lfo().accumulator();
        let mut end_phase = start_phase;

        for (input, output) in inputs.iter().zip(outputs.iter_mut()) {
            self.crusher.lfo_mut().set_accumulator(start_phase);
            for (out, &sample) in output[..num_samples].iter_mut().zip(&input[..num_samples]) {
                *out = render_sample(&mut self.crusher, sample, sample_rate, dry, wet);
            }
            end_phase = self.crusher.lfo().accumulator();
        }

        self.crusher.lfo_mut().set_accumulator(end_phase);
        SilenceFlags::NONE
    }

    /// Crush `buffers` in place.
    pub fn process_in_place<S: Sample>(
        &mut self,
        buffers: &mut [&mut [S]],
        ctx: &ProcessContext,
    ) -> SilenceFlags {
        if buffers.is_empty() {
            return SilenceFlags::NONE;
        }

        if self.params.bypass {
            return ctx.input_silence.masked(buffers.len());
        }

        let num_samples = buffers
            .iter()
            .map(|buffer| buffer.len())
            .fold(ctx.num_samples, usize::min);

        let (sample_rate, dry, wet) = self.block_constants::<S>();
        let start_phase = self.crusher.lfo().accumulator();
        let mut end_phase = start_phase;

        for buffer in buffers.iter_mut() {
            self.crusher.lfo_mut().set_accumulator(start_phase);
            for sample in buffer[..num_samples].iter_mut() {
                *sample = render_sample(&mut self.crusher, *sample, sample_rate, dry, wet);
            }
            end_phase = self.crusher.lfo().accumulator();
        }

        self.crusher.lfo_mut().set_accumulator(end_phase);
        SilenceFlags::NONE
    }

    /// Sample rate and mix gains for one block. NaN levels count as 0.
    #[inline]
    fn block_constants<S: Sample>(&self) -> (f32, S, S) {
        (
            self.setup.sample_rate,
            S::from_f32(clamp_unit(self.params.dry_mix)),
            S::from_f32(clamp_unit(self.params.wet_mix)),
        )
    }
}

#[inline]
fn render_sample<S: Sample>(
    crusher: &mut BitCrusher,
    sample: S,
    sample_rate: f32,
    dry: S,
    wet: S,
) -> S {
    let crushed = crusher.process_sample(sample, sample_rate);
    blend_additive(sample, crushed, dry, wet)
}
