//! Live receive session: stream I/Q from a simulated source through the
//! demodulation controller to an audio sink until Ctrl+C.

use clap::Args;
use heterodyne_controller::{ControllerObserver, DemodController, RadioState, StereoStatus};
use heterodyne_io::{SourceAdapter, StreamEngine};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::commands::common::load_preset;
use crate::scenarios;

const AUDIO_RATE_HZ: f32 = 48_000.0;
const BLOCK_LEN: usize = 2048;
const POOL_CAPACITY: usize = 4;

#[derive(Args)]
pub struct TuneArgs {
    /// Named scenario to receive (see 'heterodyne generate --help' for the list);
    /// defaults to the one matching --preset's scheme, or 'wbfm-mono'.
    #[arg(short, long)]
    scenario: Option<String>,

    /// Preset name or path supplying the initial frequency and mode
    #[arg(short, long)]
    preset: Option<String>,

    /// Baseband frequency offset in Hz, applied on top of the preset/scenario
    #[arg(long)]
    offset: Option<f32>,

    /// Output device name (cpal); defaults to the system default output
    #[arg(short, long)]
    output: Option<String>,
}

struct ConsoleObserver;

impl ControllerObserver for ConsoleObserver {
    fn on_stereo_status(&mut self, status: StereoStatus) {
        println!("[stereo: {}]", status.0);
    }

    fn on_radio_state(&mut self, state: RadioState) {
        println!("[radio state: {state:?}]");
    }
}

pub fn run(args: TuneArgs) -> anyhow::Result<()> {
    let preset = args.preset.as_deref().map(load_preset).transpose()?;

    let scenario = match &args.scenario {
        Some(name) => scenarios::find(name)
            .ok_or_else(|| anyhow::anyhow!("unknown scenario '{name}'; see 'heterodyne generate --help'"))?,
        None => match &preset {
            Some(p) => scenarios::ALL
                .iter()
                .find(|s| s.scheme == p.scheme())
                .unwrap_or(&scenarios::ALL[0]),
            None => &scenarios::ALL[0],
        },
    };

    let (scheme, params) = match &preset {
        Some(p) => (p.scheme(), p.mode),
        None => (scenario.scheme, scenario.params),
    };

    println!("Tuning: {} ({})", scenario.name, scenario.description);
    println!("Scheme: {}", scheme.name());

    let tuner = scenario.tuner();
    let adapter = SourceAdapter::new(tuner, POOL_CAPACITY);
    let mut engine = StreamEngine::start(adapter, BLOCK_LEN)?;

    let mut controller = DemodController::new(scheme, scenario.rf_rate, AUDIO_RATE_HZ);
    controller.set_mode(scheme, params);
    let offset_hz = args.offset.or(preset.as_ref().map(|p| p.frequency_offset_hz));
    if let Some(offset_hz) = offset_hz {
        controller.set_frequency_offset(offset_hz);
    }
    controller.add_observer(Box::new(ConsoleObserver));

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        println!("\nStopping...");
        r.store(false, Ordering::SeqCst);
    })?;

    println!("Press Ctrl+C to stop...\n");

    let mut sink = open_sink(args.output.as_deref())?;
    while running.load(Ordering::SeqCst) {
        match engine.pump(&mut sink, |iq| controller.demodulate(&iq))? {
            Some(()) => {}
            None => break,
        }
    }

    engine.stop();
    println!("Done.");
    Ok(())
}

#[cfg(feature = "cpal-backend")]
fn open_sink(output: Option<&str>) -> anyhow::Result<heterodyne_io::CpalSink> {
    Ok(heterodyne_io::CpalSink::open(output, AUDIO_RATE_HZ as u32)?)
}

#[cfg(not(feature = "cpal-backend"))]
fn open_sink(_output: Option<&str>) -> anyhow::Result<heterodyne_io::RecordingSink> {
    println!("(built without 'cpal-backend': audio is captured in memory and discarded)");
    Ok(heterodyne_io::RecordingSink::new(AUDIO_RATE_HZ as u32))
}
