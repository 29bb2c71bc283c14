//! Normalized parameter model shared between the host/UI and the processor.
//!
//! All values live in 0..1. Writers may send anything; the model clamps on
//! the way in so the audio thread never sees an out-of-range value.

pub mod message;

pub use message::{MessageReceiver, ParamMessage};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Automatable parameters, in persistence order.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamId {
    /// Bit resolution (1.0 = full 16 bits, 0.0 = 1 bit)
    Resolution,
    /// Normalized LFO rate (0.0 = modulation off)
    LfoRate,
    /// How far the LFO moves the resolution
    LfoDepth,
    /// Level of the crushed signal
    WetMix,
    /// Level of the original signal
    DryMix,
}

impl ParamId {
    pub const ALL: [ParamId; 5] = [
        ParamId::Resolution,
        ParamId::LfoRate,
        ParamId::LfoDepth,
        ParamId::WetMix,
        ParamId::DryMix,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ParamId::Resolution => "Resolution",
            ParamId::LfoRate => "Bit crush LFO",
            ParamId::LfoDepth => "Bit crush LFO depth",
            ParamId::WetMix => "Wet mix",
            ParamId::DryMix => "Dry mix",
        }
    }

    pub fn default_value(self) -> f32 {
        match self {
            ParamId::Resolution | ParamId::WetMix => 1.0,
            ParamId::LfoRate | ParamId::LfoDepth | ParamId::DryMix => 0.0,
        }
    }
}

/// Snapshot of every effect parameter.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrushParams {
    pub resolution: f32,
    pub lfo_rate: f32,
    pub lfo_depth: f32,
    pub wet_mix: f32,
    pub dry_mix: f32,
    pub bypass: bool,
}

impl CrushParams {
    pub fn new() -> Self {
        Self {
            resolution: ParamId::Resolution.default_value(),
            lfo_rate: ParamId::LfoRate.default_value(),
            lfo_depth: ParamId::LfoDepth.default_value(),
            wet_mix: ParamId::WetMix.default_value(),
            dry_mix: ParamId::DryMix.default_value(),
            bypass: false,
        }
    }

    pub fn get(&self, id: ParamId) -> f32 {
        match id {
            ParamId::Resolution => self.resolution,
            ParamId::LfoRate => self.lfo_rate,
            ParamId::LfoDepth => self.lfo_depth,
            ParamId::WetMix => self.wet_mix,
            ParamId::DryMix => self.dry_mix,
        }
    }

    /// Store a normalized value, clamped to 0..1. Non-finite values are ignored.
    pub fn set(&mut self, id: ParamId, value: f32) {
        if !value.is_finite() {
            return;
        }
        let value = value.clamp(0.0, 1.0);
        match id {
            ParamId::Resolution => self.resolution = value,
            ParamId::LfoRate => self.lfo_rate = value,
            ParamId::LfoDepth => self.lfo_depth = value,
            ParamId::WetMix => self.wet_mix = value,
            ParamId::DryMix => self.dry_mix = value,
        }
    }

    pub fn set_bypass(&mut self, bypass: bool) {
        self.bypass = bypass;
    }

    /// Hosts send switches as normalized floats; anything above 0.5 is "on".
    pub fn set_bypass_normalized(&mut self, value: f32) {
        self.bypass = value > 0.5;
    }

    pub fn apply(&mut self, message: ParamMessage) {
        match message {
            ParamMessage::Set(id, value) => self.set(id, value),
            ParamMessage::Bypass(bypass) => self.set_bypass(bypass),
        }
    }

    /// Crush intensity for the quantizer. Full resolution means no crushing.
    pub fn crush_amount(&self) -> f32 {
        1.0 - self.resolution
    }

    pub fn with_resolution(mut self, value: f32) -> Self {
        self.set(ParamId::Resolution, value);
        self
    }

    pub fn with_lfo(mut self, rate: f32, depth: f32) -> Self {
        self.set(ParamId::LfoRate, rate);
        self.set(ParamId::LfoDepth, depth);
        self
    }

    pub fn with_mix(mut self, dry: f32, wet: f32) -> Self {
        self.set(ParamId::DryMix, dry);
        self.set(ParamId::WetMix, wet);
        self
    }

    pub fn with_bypass(mut self, bypass: bool) -> Self {
        self.bypass = bypass;
        self
    }
}

impl Default for CrushParams {
    fn default() -> Self {
        Self::new()
    }
}
