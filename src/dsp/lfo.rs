//! Low Frequency Oscillator (LFO) used to modulate crush resolution.

/*
Low Frequency Oscillators
=========================

An LFO is an oscillator running at sub-audio frequencies. It never makes
sound on its own, it moves another parameter over time. Here it sweeps the
bit depth of the crusher so the stepping "breathes" instead of sitting at a
fixed resolution.

Vocabulary
----------

  control-rate    Frequencies below human hearing: ~0.01 Hz to ~20 Hz.
                  Our modulation rate lives in 0.1 - 10 Hz.

  accumulator     The phase position inside one cycle, kept in [0, 1).
                  0.0 is the start of a cycle, 0.5 is halfway through.

  phase step      How far the accumulator moves per sample:
                      step = rate / sample_rate
                  At 2 Hz and 44.1 kHz that is ~0.0000453 per sample,
                  i.e. one full cycle every 22050 samples.

  bipolar         Output swings -1.0 to +1.0. The crusher scales the
                  resolution both up AND down around its baseline.


Phase Continuity
----------------

Hosts call us with blocks of arbitrary size (64, 441, 1024 ...). The
accumulator is owned by the oscillator and never reset on block boundaries,
so rendering 1000 samples in one call or as 100 + 900 produces the exact
same phase sequence. The only place the phase is intentionally discarded is
a topology rebuild (new sample rate or channel layout).

Wrapping
--------

The accumulator is wrapped back into [0, 1) after every step rather than
growing without bound. An unbounded float phase loses precision over long
sessions (after a few hours at 44.1 kHz the increment would vanish below
the float's resolution), which shows up as an LFO that slowly stops moving.


Waveform: Triangle
------------------

We use a bipolar triangle that starts at zero and rises:

    phase   0.0   0.25   0.5   0.75   1.0
    value   0.0  +1.0    0.0  -1.0    0.0

           +1 |    /\
              |   /  \
            0 |--/----\----/--
              |         \  /
           -1 |          \/

A triangle has a constant rate of change, so the bit depth moves through
its range at an even pace instead of lingering at the extremes like a sine.
It is also cheap: no trig on the audio thread.
*/

use crate::{MAX_LFO_RATE, MIN_LFO_RATE};

/// Phase-accumulating triangle LFO.
#[derive(Debug, Clone, PartialEq)]
pub struct Lfo {
    rate: f32,
    accumulator: f32,
}

impl Lfo {
    pub fn new() -> Self {
        Self {
            rate: MIN_LFO_RATE,
            accumulator: 0.0,
        }
    }

    /// Set the oscillation rate in Hz. Takes effect on the next step.
    pub fn set_rate(&mut self, value: f32) {
        self.rate = value;
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Jump to an explicit phase (e.g. tempo sync). Wrapped into [0, 1).
    pub fn set_accumulator(&mut self, value: f32) {
        self.accumulator = wrap_phase(value);
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// Waveform value at the current phase, without advancing.
    #[inline]
    pub fn value(&self) -> f32 {
        triangle(self.accumulator)
    }

    /// Return the value at the current phase, then advance by one sample.
    ///
    /// Zero or negative rates and sample rates leave the phase where it is.
    #[inline]
    pub fn step(&mut self, sample_rate: f32) -> f32 {
        let value = self.value();
        let increment = phase_increment(self.rate, sample_rate);
        if increment > 0.0 {
            self.accumulator = wrap_phase(self.accumulator + increment);
        }
        value
    }
}

impl Default for Lfo {
    fn default() -> Self {
        Self::new()
    }
}

/// Phase advance per sample, or 0.0 when the inputs can't produce motion.
#[inline]
fn phase_increment(rate: f32, sample_rate: f32) -> f32 {
    if sample_rate <= 0.0 {
        return 0.0;
    }
    let increment = rate / sample_rate;
    if increment.is_finite() && increment > 0.0 {
        increment
    } else {
        0.0
    }
}

#[inline]
fn wrap_phase(phase: f32) -> f32 {
    if !phase.is_finite() {
        return 0.0;
    }
    let wrapped = phase - phase.floor();
    // floor() of a value just below 1.0 can round the difference up to 1.0
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}

/// Bipolar triangle for a phase in [0, 1): 0 → 0, 0.25 → +1, 0.75 → -1.
#[inline]
pub fn triangle(phase: f32) -> f32 {
    if phase < 0.25 {
        4.0 * phase
    } else if phase < 0.75 {
        2.0 - 4.0 * phase
    } else {
        4.0 * phase - 4.0
    }
}

/// Map a normalized (0..1) rate parameter onto the LFO range in Hz.
#[inline]
pub fn rate_from_normalized(normalized: f32) -> f32 {
    MIN_LFO_RATE + (MAX_LFO_RATE - MIN_LFO_RATE) * normalized.clamp(0.0, 1.0)
}

/// Calculate samples per LFO period.
///
/// # Example
/// ```
/// use saavy_crush::dsp::lfo::samples_per_period;
/// let samples = samples_per_period(2.0, 44_100.0);
/// assert_eq!(samples, 22_050.0);
/// ```
#[inline]
pub fn samples_per_period(frequency_hz: f32, sample_rate: f32) -> f32 {
    sample_rate / frequency_hz
}
