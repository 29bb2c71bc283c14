use saavy_crush::{
    dsp::crusher::{bits_for, step_size},
    dsp::lfo::samples_per_period,
    CrushParams, CrushProcessor, ProcessContext, ProcessSetup, MAX_BLOCK_SIZE,
};

fn main() {
    let sample_rate = 48_000.0;
    let params = CrushParams::new()
        .with_resolution(0.4)
        .with_lfo(0.1, 0.7)
        .with_mix(0.0, 1.0);

    let mut processor = CrushProcessor::new(ProcessSetup::new(sample_rate, 1));
    processor.set_params(params);

    let total = sample_rate as usize * 2;
    let mut signal: Vec<f32> = (0..total)
        .map(|i| (i as f32 * 220.0 * std::f32::consts::TAU / sample_rate).sin() * 0.8)
        .collect();

    for chunk in signal.chunks_mut(MAX_BLOCK_SIZE) {
        let len = chunk.len();
        processor.process_in_place(&mut [chunk], &ProcessContext::new(len));
    }

    let peak = signal.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
    let rms = (signal.iter().map(|s| s * s).sum::<f32>() / total as f32).sqrt();
    let mut levels: Vec<u32> = signal.iter().map(|s| s.to_bits()).collect();
    levels.sort_unstable();
    levels.dedup();

    let amount = params.crush_amount();
    println!("Rendered {} samples", total);
    println!(
        "Base resolution: {} bits (step {:.6})",
        bits_for(amount),
        step_size(amount)
    );
    println!("Peak: {:.4}  RMS: {:.4}", peak, rms);
    println!("Distinct output levels: {}", levels.len());
    let lfo_rate = processor.crusher().lfo().rate();
    println!(
        "LFO: {:.2} Hz ({:.0} samples per cycle)",
        lfo_rate,
        samples_per_period(lfo_rate, sample_rate)
    );
    println!("LFO phase after bounce: {:.4}", processor.crusher().lfo().accumulator());
}
