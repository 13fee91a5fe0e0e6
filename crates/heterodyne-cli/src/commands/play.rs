//! Bounded, non-interactive playback of a saved preset: receives for a
//! fixed duration against the scenario generator matching the preset's
//! scheme and reports what came out, without requiring Ctrl+C.

use clap::Args;
use heterodyne_controller::DemodController;
use heterodyne_io::{RecordingSink, SourceAdapter};

use crate::commands::common::load_preset;
use crate::scenarios;

const AUDIO_RATE_HZ: f32 = 48_000.0;
const BLOCK_LEN: usize = 2048;
const POOL_CAPACITY: usize = 4;

#[derive(Args)]
pub struct PlayArgs {
    /// Preset name or path to play
    preset: String,

    /// Duration to receive, in seconds
    #[arg(long, default_value_t = 2.0)]
    seconds: f32,
}

pub fn run(args: PlayArgs) -> anyhow::Result<()> {
    let preset = load_preset(&args.preset)?;
    let scheme = preset.scheme();

    let scenario = scenarios::ALL
        .iter()
        .find(|s| s.scheme == scheme)
        .ok_or_else(|| anyhow::anyhow!("no built-in scenario exercises the '{}' scheme", scheme.name()))?;

    println!(
        "Playing preset '{}' ({}) against scenario '{}'",
        preset.name,
        scheme.name(),
        scenario.name
    );

    let mut adapter = SourceAdapter::new(scenario.tuner(), POOL_CAPACITY);
    adapter.tuner_mut().reset_buffer()?;

    let mut controller = DemodController::new(scheme, scenario.rf_rate, AUDIO_RATE_HZ);
    controller.set_mode(scheme, preset.mode);
    controller.set_frequency_offset(preset.frequency_offset_hz);

    let mut sink = RecordingSink::new(AUDIO_RATE_HZ as u32);
    let total_samples = (args.seconds * AUDIO_RATE_HZ) as usize;
    let mut played = 0usize;
    while played < total_samples {
        let iq = adapter.read_block(BLOCK_LEN)?;
        controller.receive(&iq, &mut sink)?;
        played += sink.blocks().last().map(|(l, _)| l.len()).unwrap_or(0);
    }

    let left = sink.left_samples();
    let peak_hz = heterodyne_analysis::fft_peak_bin(&left, AUDIO_RATE_HZ);
    let power = heterodyne_analysis::power_db(&left);

    println!("Received {} blocks, {} samples", sink.blocks().len(), left.len());
    println!("Peak FFT bin: {peak_hz:.1} Hz");
    println!("Power: {power:.1} dB");

    Ok(())
}
