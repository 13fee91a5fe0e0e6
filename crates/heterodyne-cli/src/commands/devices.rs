//! Audio output device listing.
//!
//! There is no "input device" concept here the way a sound card has one:
//! the receiver's only RF source is [`heterodyne_io::SimulatedTuner`] (a
//! real RTL-2832U binding is out of scope per spec.md §1). This command
//! only enumerates where demodulated audio can be played.

use clap::{Args, Subcommand};

#[derive(Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    command: Option<DevicesCommand>,
}

#[derive(Subcommand)]
enum DevicesCommand {
    /// List available audio output devices
    List,
}

pub fn run(args: DevicesArgs) -> anyhow::Result<()> {
    match args.command.unwrap_or(DevicesCommand::List) {
        DevicesCommand::List => list_outputs(),
    }
}

#[cfg(feature = "cpal-backend")]
fn list_outputs() -> anyhow::Result<()> {
    let devices = heterodyne_io::list_output_devices()?;

    if devices.is_empty() {
        println!("No audio output devices found.");
        return Ok(());
    }

    println!("Audio Output Devices");
    println!("=====================\n");
    for (idx, name) in devices.iter().enumerate() {
        println!("  [{idx}] {name}");
    }
    println!();
    println!("RF input is always the simulated tuner (heterodyne-io::SimulatedTuner);");
    println!("pass --output to 'heterodyne tune' or 'heterodyne play' to pick one of these.");

    Ok(())
}

#[cfg(not(feature = "cpal-backend"))]
fn list_outputs() -> anyhow::Result<()> {
    println!("Built without the 'cpal-backend' feature: no audio output devices are available.");
    println!("Audio can still be captured in-memory via RecordingSink for 'generate'/'analyze'.");
    Ok(())
}
