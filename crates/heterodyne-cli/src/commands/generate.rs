//! Run one named synthetic scenario from spec.md §8 through a simulated
//! tuner and the demodulation controller, printing the resulting spectral
//! measurement. Writes no audio file: recording/serialization is out of
//! scope for this tool (see spec.md §1 Non-goals).

use clap::Args;
use heterodyne_controller::DemodController;
use heterodyne_io::{RecordingSink, SourceAdapter};

use crate::scenarios;

const AUDIO_RATE_HZ: f32 = 48_000.0;
const BLOCK_LEN: usize = 2048;
const POOL_CAPACITY: usize = 4;

#[derive(Args)]
pub struct GenerateArgs {
    /// Scenario name; omit to list every available scenario
    scenario: Option<String>,

    /// Number of blocks to receive
    #[arg(long, default_value_t = 50)]
    blocks: usize,
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    let Some(name) = &args.scenario else {
        list_scenarios();
        return Ok(());
    };

    let scenario = scenarios::find(name)
        .ok_or_else(|| anyhow::anyhow!("unknown scenario '{name}'; run 'heterodyne generate' with no arguments to list them"))?;

    println!("Scenario: {} - {}", scenario.name, scenario.description);
    println!("RF rate: {} Hz, centre: {} Hz, scheme: {}", scenario.rf_rate, scenario.centre_frequency_hz, scenario.scheme.name());

    let mut adapter = SourceAdapter::new(scenario.tuner(), POOL_CAPACITY);
    adapter.tuner_mut().reset_buffer()?;

    let mut controller = DemodController::new(scenario.scheme, scenario.rf_rate, AUDIO_RATE_HZ);
    controller.set_mode(scenario.scheme, scenario.params);

    let mut sink = RecordingSink::new(AUDIO_RATE_HZ as u32);
    for _ in 0..args.blocks {
        let iq = adapter.read_block(BLOCK_LEN)?;
        controller.receive(&iq, &mut sink)?;
    }

    let left = sink.left_samples();
    let right = sink.right_samples();
    let left_peak = heterodyne_analysis::fft_peak_bin(&left, AUDIO_RATE_HZ);
    let right_peak = heterodyne_analysis::fft_peak_bin(&right, AUDIO_RATE_HZ);
    let power = heterodyne_analysis::power_db(&left);

    println!();
    println!("{} blocks, {} samples per channel", sink.blocks().len(), left.len());
    println!("Left peak FFT bin:  {left_peak:.1} Hz");
    println!("Right peak FFT bin: {right_peak:.1} Hz");
    println!("Power: {power:.1} dB");
    if let Some(expected) = scenario.expected_tone_hz {
        println!("Expected dominant tone: {expected:.1} Hz");
    }

    Ok(())
}

fn list_scenarios() {
    println!("Available scenarios:");
    for s in scenarios::ALL {
        println!("  {:<14} {}", s.name, s.description);
    }
}
