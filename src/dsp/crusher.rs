//! Bit depth reduction (bit-crushing) with LFO-modulated resolution.
//!
//! # How Bit-Crushing Works
//!
//! Digital audio stores each sample as one of a fixed set of amplitude
//! levels. With B bits, the range [-1, +1] is split into steps of size
//!
//! ```text
//! step = 2 / 2^B = 2^(1 - B)
//! ```
//!
//! Crushing pretends we have fewer bits than we do: every sample is rounded
//! to the nearest multiple of a much larger step. Smooth waveforms turn into
//! staircases and the rounding error becomes audible as gritty, digital
//! noise.
//!
//! ```text
//!   16 bits  step = 0.0000305   (transparent)
//!    8 bits  step = 0.0078125   (noticeably grainy)
//!    4 bits  step = 0.125       (harsh, lo-fi)
//!    1 bit   step = 1.0         (only -1, 0, +1 survive)
//! ```
//!
//! # Amount
//!
//! `amount` is a normalized crush intensity:
//!
//! ```text
//! bits = 16 - round(amount * 15)
//! ```
//!
//!   0.0 = no crushing at all (samples pass through untouched)
//!   0.5 = 8 bits
//!   1.0 = 1 bit
//!
//! The step is always an exact power of two, so the same input and settings
//! produce bit-identical output on every run and at either precision.
//!
//! # Modulation
//!
//! A triangle LFO makes the resolution wander around the baseline amount:
//!
//! ```text
//! effective = clamp(amount * (1 + depth * lfo), 0, 1)
//! ```
//!
//! The modulation is multiplicative so a zero amount stays a true bypass
//! whatever the LFO is doing. With depth = 1 the resolution swings between
//! no crushing (LFO at -1) and twice the baseline amount (LFO at +1).

use crate::dsp::lfo::{rate_from_normalized, Lfo};
use crate::dsp::sample::Sample;
use crate::{MAX_BITS, MIN_BITS};

/// LFO-modulated bit depth reducer.
#[derive(Debug, Clone)]
pub struct BitCrusher {
    amount: f32,
    lfo_depth: f32,
    lfo_enabled: bool,
    lfo: Lfo,
}

impl BitCrusher {
    pub fn new() -> Self {
        Self {
            amount: 0.0,
            lfo_depth: 0.0,
            lfo_enabled: false,
            lfo: Lfo::new(),
        }
    }

    /// Set the baseline crush intensity (0.0 = clean, 1.0 = 1 bit).
    pub fn set_amount(&mut self, value: f32) {
        self.amount = clamp_unit(value);
    }

    pub fn amount(&self) -> f32 {
        self.amount
    }

    /// Configure resolution modulation.
    ///
    /// `rate` is normalized (0..1) and mapped onto the LFO range; a rate of
    /// zero switches modulation off and rewinds the oscillator. `depth`
    /// scales how far the LFO pushes the resolution away from the baseline.
    pub fn set_lfo(&mut self, rate: f32, depth: f32) {
        let rate = clamp_unit(rate);
        let enabled = rate > 0.0;

        if enabled {
            self.lfo.set_rate(rate_from_normalized(rate));
        } else if self.lfo_enabled {
            self.lfo.reset();
        }

        self.lfo_enabled = enabled;
        self.lfo_depth = clamp_unit(depth);
    }

    pub fn lfo_enabled(&self) -> bool {
        self.lfo_enabled
    }

    pub fn lfo_depth(&self) -> f32 {
        self.lfo_depth
    }

    pub fn lfo(&self) -> &Lfo {
        &self.lfo
    }

    pub fn lfo_mut(&mut self) -> &mut Lfo {
        &mut self.lfo
    }

    /// Baseline amount shifted by a bipolar modulation value, kept in [0, 1].
    #[inline]
    pub fn effective_amount(&self, modulation: f32) -> f32 {
        clamp_unit(self.amount * (1.0 + self.lfo_depth * modulation))
    }

    /// Advance the LFO one sample and return its value.
    ///
    /// Returns 0.0 without touching the phase when modulation is off.
    #[inline]
    pub fn next_modulation(&mut self, sample_rate: f32) -> f32 {
        if self.lfo_enabled {
            self.lfo.step(sample_rate)
        } else {
            0.0
        }
    }

    /// Quantize one sample for a given modulation value. Pure.
    #[inline]
    pub fn crush<S: Sample>(&self, sample: S, modulation: f32) -> S {
        let effective = self.effective_amount(modulation);
        if effective <= 0.0 {
            return sample;
        }
        quantize(sample, step_size(effective))
    }

    /// Step the LFO, then crush.
    #[inline]
    pub fn process_sample<S: Sample>(&mut self, sample: S, sample_rate: f32) -> S {
        let modulation = self.next_modulation(sample_rate);
        self.crush(sample, modulation)
    }

    /// Crush a single channel in place.
    pub fn process_buffer<S: Sample>(&mut self, buffer: &mut [S], sample_rate: f32) {
        for sample in buffer.iter_mut() {
            *sample = self.process_sample(*sample, sample_rate);
        }
    }
}

impl Default for BitCrusher {
    fn default() -> Self {
        Self::new()
    }
}

/// Effective bit depth for a crush amount in [0, 1].
#[inline]
pub fn bits_for(amount: f32) -> u32 {
    let range = (MAX_BITS - MIN_BITS) as f32;
    let removed = (clamp_unit(amount) * range).round() as u32;
    MAX_BITS - removed.min(MAX_BITS - MIN_BITS)
}

/// Quantization step for a crush amount: `2^(1 - bits)`.
#[inline]
pub fn step_size(amount: f32) -> f64 {
    let bits = bits_for(amount);
    1.0 / (1u32 << (bits - 1)) as f64
}

/// Round `sample` to the nearest multiple of `step`.
#[inline]
pub fn quantize<S: Sample>(sample: S, step: f64) -> S {
    let step = S::from_f64(step);
    (sample / step).round() * step
}

/// Clamp into [0, 1]; NaN becomes 0.
#[inline]
pub(crate) fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f32 = 44_100.0;

    fn test_signal() -> Vec<f32> {
        (0..256).map(|i| (i as f32 * 0.05).sin() * 0.8).collect()
    }

    #[test]
    fn zero_amount_is_identity() {
        let mut crusher = BitCrusher::new();
        crusher.set_amount(0.0);
        crusher.set_lfo(1.0, 1.0);

        let input = test_signal();
        let mut buffer = input.clone();
        crusher.process_buffer(&mut buffer, SR);

        assert_eq!(buffer, input);
    }

    #[test]
    fn zero_amount_is_identity_for_f64() {
        let mut crusher = BitCrusher::new();
        crusher.set_lfo(0.4, 0.7);

        let input: Vec<f64> = (0..128).map(|i| (i as f64 * 0.1).cos() * 0.3).collect();
        let mut buffer = input.clone();
        crusher.process_buffer(&mut buffer, SR);

        assert_eq!(buffer, input);
    }

    #[test]
    fn bit_mapping_covers_sixteen_to_one() {
        assert_eq!(bits_for(0.0), 16);
        assert_eq!(bits_for(0.5), 8);
        assert_eq!(bits_for(1.0), 1);
        assert_eq!(bits_for(2.0), 1);
        assert_eq!(step_size(1.0), 1.0);
        assert_eq!(step_size(0.5), 1.0 / 128.0);
    }

    #[test]
    fn step_size_never_shrinks_as_amount_grows() {
        for &modulation in &[-1.0f32, -0.3, 0.0, 0.6, 1.0] {
            for &depth in &[0.0f32, 0.5, 1.0] {
                let mut crusher = BitCrusher::new();
                crusher.set_lfo(0.5, depth);

                let mut previous = 0.0;
                for i in 0..=100 {
                    crusher.set_amount(i as f32 / 100.0);
                    let effective = crusher.effective_amount(modulation);
                    let step = if effective > 0.0 { step_size(effective) } else { 0.0 };
                    assert!(
                        step >= previous,
                        "step shrank at amount {} (mod {}, depth {})",
                        i,
                        modulation,
                        depth
                    );
                    previous = step;
                }
            }
        }
    }

    #[test]
    fn full_amount_leaves_three_levels() {
        let mut crusher = BitCrusher::new();
        crusher.set_amount(1.0);

        let mut buffer = test_signal();
        crusher.process_buffer(&mut buffer, SR);

        for &sample in &buffer {
            assert!(
                sample == -1.0 || sample == 0.0 || sample == 1.0,
                "unexpected level {}",
                sample
            );
        }
    }

    #[test]
    fn output_lands_on_step_grid() {
        let mut crusher = BitCrusher::new();
        crusher.set_amount(0.6);
        let step = step_size(0.6) as f32;

        let mut buffer = test_signal();
        crusher.process_buffer(&mut buffer, SR);

        for &sample in &buffer {
            let ratio = sample / step;
            assert_eq!(ratio, ratio.round());
        }
    }

    #[test]
    fn crushing_is_deterministic() {
        let render = || {
            let mut crusher = BitCrusher::new();
            crusher.set_amount(0.45);
            crusher.set_lfo(0.3, 0.8);
            let mut buffer = test_signal();
            crusher.process_buffer(&mut buffer, SR);
            buffer
        };

        let first = render();
        let second = render();
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn modulation_changes_effective_amount() {
        let mut crusher = BitCrusher::new();
        crusher.set_amount(0.5);
        crusher.set_lfo(0.5, 1.0);

        assert_eq!(crusher.effective_amount(0.0), 0.5);
        assert_eq!(crusher.effective_amount(1.0), 1.0);
        assert_eq!(crusher.effective_amount(-1.0), 0.0);
    }

    #[test]
    fn disabled_lfo_does_not_advance() {
        let mut crusher = BitCrusher::new();
        crusher.set_amount(0.5);
        crusher.set_lfo(0.0, 1.0);

        let mut buffer = test_signal();
        crusher.process_buffer(&mut buffer, SR);

        assert!(!crusher.lfo_enabled());
        assert_eq!(crusher.lfo().accumulator(), 0.0);
    }

    #[test]
    fn enabled_lfo_advances_once_per_sample() {
        let mut crusher = BitCrusher::new();
        crusher.set_amount(0.5);
        crusher.set_lfo(1.0, 0.5);

        let mut reference = Lfo::new();
        reference.set_rate(crusher.lfo().rate());

        let mut buffer = vec![0.25f32; 300];
        crusher.process_buffer(&mut buffer, SR);
        for _ in 0..300 {
            reference.step(SR);
        }

        assert_eq!(crusher.lfo().accumulator(), reference.accumulator());
    }

    #[test]
    fn switching_lfo_off_rewinds_phase() {
        let mut crusher = BitCrusher::new();
        crusher.set_lfo(1.0, 1.0);
        for _ in 0..100 {
            crusher.next_modulation(SR);
        }
        assert!(crusher.lfo().accumulator() > 0.0);

        crusher.set_lfo(0.0, 1.0);
        assert_eq!(crusher.lfo().accumulator(), 0.0);
    }

    #[test]
    fn out_of_range_settings_are_clamped() {
        let mut crusher = BitCrusher::new();
        crusher.set_amount(4.0);
        crusher.set_lfo(-1.0, 3.0);
        assert_eq!(crusher.amount(), 1.0);
        assert_eq!(crusher.lfo_depth(), 1.0);
        assert!(!crusher.lfo_enabled());

        crusher.set_amount(f32::NAN);
        assert_eq!(crusher.amount(), 0.0);
    }
}
