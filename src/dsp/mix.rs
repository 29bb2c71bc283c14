//! Additive dry/wet mixing.

/*
Dry/Wet Mixing
==============

Every effect output is a blend of the untouched input ("dry") and the
processed signal ("wet").

Vocabulary
----------

  dry         The original, unprocessed sample.
  wet         The sample after the effect (here: after crushing).
  level       A gain applied to one side of the blend.


Crossfade vs Additive
---------------------

A crossfade ties both sides to a single balance knob so the weights always
sum to 1.0:

    output = dry × (1 - balance) + wet × balance

The crusher exposes two INDEPENDENT levels instead:

    output = dry × dry_level + wet × wet_level

This allows settings a crossfade can't express:

    dry 1.0, wet 1.0   both at full level (parallel crushing, +6 dB peak)
    dry 0.0, wet 0.0   muted
    dry 0.3, wet 1.0   mostly crushed with a touch of clean signal

The price is the usual clipping risk when both levels are high. Nothing
here limits the output; hosts and later stages handle headroom.

    dry_level  wet_level  result
    1.0        0.0        input, bit-for-bit
    0.0        1.0        crushed signal, bit-for-bit
    0.5        0.5        average of the two
*/

use crate::dsp::sample::Sample;

/// Blend a dry and a wet sample with independent levels.
#[inline]
pub fn blend_additive<S: Sample>(dry: S, wet: S, dry_level: S, wet_level: S) -> S {
    dry * dry_level + wet * wet_level
}

/// Mix `dry` into `wet` in place: `wet[i] = dry[i] * dry_level + wet[i] * wet_level`.
#[inline]
pub fn apply_additive<S: Sample>(dry: &[S], wet: &mut [S], dry_level: S, wet_level: S) {
    debug_assert_eq!(dry.len(), wet.len());

    for (wet_sample, &dry_sample) in wet.iter_mut().zip(dry.iter()) {
        *wet_sample = blend_additive(dry_sample, *wet_sample, dry_level, wet_level);
    }
}
