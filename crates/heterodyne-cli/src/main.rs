//! Heterodyne CLI - command-line interface for the heterodyne SDR receiver core.

mod commands;
mod scenarios;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "heterodyne")]
#[command(author, version, about = "Heterodyne SDR receiver CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List audio output devices
    Devices(commands::devices::DevicesArgs),

    /// Live receive session against a simulated source, until Ctrl+C
    Tune(commands::tune::TuneArgs),

    /// Play a saved preset for a fixed duration and report the result
    Play(commands::play::PlayArgs),

    /// Run a named spec.md §8 scenario and print its spectral measurement
    Generate(commands::generate::GenerateArgs),

    /// Check scenarios against their documented pass/fail expectations
    Analyze(commands::analyze::AnalyzeArgs),

    /// Manage receiver presets (list, show, save, delete)
    Presets(commands::presets::PresetsArgs),
}

fn main() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();

    tracing::debug!(command = ?std::mem::discriminant(&cli.command), "dispatching command");

    match cli.command {
        Commands::Devices(args) => commands::devices::run(args),
        Commands::Tune(args) => commands::tune::run(args),
        Commands::Play(args) => commands::play::run(args),
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Presets(args) => commands::presets::run(args),
    }
}
