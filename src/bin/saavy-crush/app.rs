//! CrushDemo - builder that wires the processor to the default output device

use std::f32::consts::TAU;
use std::time::{Duration, Instant};

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::RingBuffer;
use tracing::{error, info};

use saavy_crush::{
    CrushParams, CrushProcessor, ParamId, ParamMessage, ProcessContext, ProcessSetup,
    MAX_BLOCK_SIZE,
};

const MESSAGE_CAPACITY: usize = 64;
const SWEEP_INTERVAL: Duration = Duration::from_millis(50);

/// Main application builder
pub struct CrushDemo {
    tone_hz: f32,
    params: CrushParams,
    sweep: bool,
    seconds: f32,
}

impl CrushDemo {
    pub fn new() -> Self {
        Self {
            tone_hz: 220.0,
            params: CrushParams::new(),
            sweep: false,
            seconds: 10.0,
        }
    }

    /// Frequency of the sine fed into the crusher
    pub fn tone(mut self, hz: f32) -> Self {
        self.tone_hz = hz;
        self
    }

    pub fn resolution(mut self, resolution: f32) -> Self {
        self.params = self.params.with_resolution(resolution);
        self
    }

    /// Normalized LFO rate and modulation depth
    pub fn lfo(mut self, rate: f32, depth: f32) -> Self {
        self.params = self.params.with_lfo(rate, depth);
        self
    }

    pub fn mix(mut self, dry: f32, wet: f32) -> Self {
        self.params = self.params.with_mix(dry, wet);
        self
    }

    /// Slowly sweep resolution from the control thread while playing
    pub fn sweep(mut self, enabled: bool) -> Self {
        self.sweep = enabled;
        self
    }

    pub fn seconds(mut self, seconds: f32) -> Self {
        self.seconds = seconds;
        self
    }

    /// Run the application (blocks until the duration has elapsed)
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let device_channels = config.channels() as usize;
        let channels = device_channels.min(2);

        info!(
            sample_rate,
            channels = device_channels,
            tone_hz = self.tone_hz,
            params = ?self.params,
            "starting crush demo"
        );

        let mut processor = CrushProcessor::new(ProcessSetup::new(sample_rate, channels));
        processor.set_params(self.params);

        let (mut tx, mut rx) = RingBuffer::<ParamMessage>::new(MESSAGE_CAPACITY);

        let mut left = vec![0.0f32; MAX_BLOCK_SIZE];
        let mut right = vec![0.0f32; MAX_BLOCK_SIZE];
        let mut tone_phase = 0.0f32;
        let tone_increment = self.tone_hz / sample_rate;

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                processor.drain_messages(&mut rx);

                let total_frames = data.len() / device_channels;
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames = (total_frames - frames_written).min(MAX_BLOCK_SIZE);

                    for (l, r) in left[..frames].iter_mut().zip(&mut right[..frames]) {
                        let s = (tone_phase * TAU).sin() * 0.5;
                        *l = s;
                        *r = s;
                        tone_phase = (tone_phase + tone_increment).fract();
                    }

                    let ctx = ProcessContext::new(frames);
                    if channels == 1 {
                        processor.process_in_place(&mut [&mut left[..frames]], &ctx);
                    } else {
                        processor.process_in_place(
                            &mut [&mut left[..frames], &mut right[..frames]],
                            &ctx,
                        );
                    }

                    let out_off = frames_written * device_channels;
                    for i in 0..frames {
                        let frame = &mut data[out_off + i * device_channels..][..device_channels];
                        for (ch, out) in frame.iter_mut().enumerate() {
                            *out = if ch % 2 == 1 && channels == 2 { right[i] } else { left[i] };
                        }
                    }

                    frames_written += frames;
                }
            },
            |err| error!(%err, "audio stream error"),
            None,
        )?;

        stream.play()?;

        let started = Instant::now();
        let duration = Duration::from_secs_f32(self.seconds.max(0.0));
        let base = self.params.resolution;

        while started.elapsed() < duration {
            std::thread::sleep(SWEEP_INTERVAL);
            if !self.sweep {
                continue;
            }

            // Triangle sweep over four seconds, centred on the configured resolution
            let t = started.elapsed().as_secs_f32() / 4.0;
            let swing = 1.0 - 2.0 * (2.0 * t.fract() - 1.0).abs();
            let resolution = (base + 0.4 * swing).clamp(0.0, 1.0);
            if tx.push(ParamMessage::Set(ParamId::Resolution, resolution)).is_err() {
                info!("message queue full, skipping sweep step");
            }
        }

        info!("done");
        Ok(())
    }
}

impl Default for CrushDemo {
    fn default() -> Self {
        Self::new()
    }
}
