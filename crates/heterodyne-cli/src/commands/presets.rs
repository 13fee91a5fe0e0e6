//! List, show, save, delete, and locate receiver presets.

use clap::{Args, Subcommand};
use heterodyne_config::{
    ensure_user_presets_dir, factory_presets, is_factory_preset, list_user_presets,
    system_presets_dir, user_config_dir, user_presets_dir,
};

use crate::commands::common::{is_builtin, load_preset};

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List factory and user presets
    List {
        /// Show only factory presets
        #[arg(long)]
        factory: bool,
        /// Show only user presets
        #[arg(long)]
        user: bool,
    },
    /// Show details for one preset
    Show { name: String },
    /// Copy a factory preset to the user presets directory so it can be edited
    Save {
        /// Factory preset to copy
        source: String,
        /// Name for the new user preset (defaults to `source`)
        #[arg(long)]
        name: Option<String>,
        /// Overwrite an existing user preset with the same name
        #[arg(long)]
        force: bool,
    },
    /// Delete a user preset
    Delete {
        name: String,
        #[arg(long)]
        force: bool,
    },
    /// Show the preset search directories
    Paths,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List { factory, user } => list(factory, user),
        PresetsCommand::Show { name } => show(&name),
        PresetsCommand::Save { source, name, force } => save(&source, name.as_deref(), force),
        PresetsCommand::Delete { name, force } => delete(&name, force),
        PresetsCommand::Paths => paths(),
    }
}

fn list(factory_only: bool, user_only: bool) -> anyhow::Result<()> {
    if !user_only {
        println!("Factory Presets:");
        for preset in factory_presets()? {
            println!(
                "  {:<20} {:>12.3} MHz  {:<5}  {}",
                preset.name,
                preset.centre_frequency_hz / 1_000_000.0,
                preset.scheme().name(),
                preset.description.as_deref().unwrap_or("")
            );
        }
        println!();
    }

    if !factory_only {
        println!("User Presets:");
        let user_presets = list_user_presets();
        if user_presets.is_empty() {
            println!("  (none) - use 'heterodyne presets save <factory-preset>' to create one");
        } else {
            for path in user_presets {
                let name = path.file_stem().and_then(|s| s.to_str()).unwrap_or("unknown");
                match heterodyne_config::ReceiverPreset::load(&path) {
                    Ok(preset) => println!(
                        "  {:<20} {:>12.3} MHz  {:<5}  {}",
                        name,
                        preset.centre_frequency_hz / 1_000_000.0,
                        preset.scheme().name(),
                        preset.description.as_deref().unwrap_or("")
                    ),
                    Err(_) => println!("  {name:<20} (error loading)"),
                }
            }
        }
        println!();
    }

    Ok(())
}

fn show(name: &str) -> anyhow::Result<()> {
    let preset = load_preset(name)?;

    println!("Preset: {}", preset.name);
    println!("{}", "=".repeat(8 + preset.name.len()));
    println!();
    if let Some(desc) = &preset.description {
        println!("Description: {desc}");
    }
    println!("Centre frequency: {:.3} MHz", preset.centre_frequency_hz / 1_000_000.0);
    println!("Frequency offset: {} Hz", preset.frequency_offset_hz);
    println!("Scheme: {}", preset.scheme().name());
    println!();
    println!("Mode parameters:");
    println!("  {:#?}", preset.mode);

    Ok(())
}

fn save(source: &str, name: Option<&str>, force: bool) -> anyhow::Result<()> {
    if !is_builtin(source) {
        anyhow::bail!("'{source}' is not a factory preset; only factory presets can be copied with 'save'");
    }

    let preset = load_preset(source)?;
    let target_name = name.unwrap_or(source);

    ensure_user_presets_dir()?;
    let path = user_presets_dir().join(format!("{target_name}.toml"));

    if path.exists() && !force {
        anyhow::bail!("preset '{target_name}' already exists; use --force to overwrite");
    }

    let mut copy = preset;
    copy.name = target_name.to_string();
    copy.save(&path)?;

    println!("Saved '{}' to {}", target_name, path.display());
    Ok(())
}

fn delete(name: &str, force: bool) -> anyhow::Result<()> {
    if is_factory_preset(name) {
        anyhow::bail!("cannot delete factory preset '{name}'; factory presets are built in");
    }

    let path = user_presets_dir().join(format!("{name}.toml"));
    if !path.exists() {
        anyhow::bail!("user preset '{name}' not found");
    }
    if !force {
        anyhow::bail!("use --force to confirm deletion of preset '{name}'");
    }

    std::fs::remove_file(&path)?;
    println!("Deleted preset '{name}'.");
    Ok(())
}

fn paths() -> anyhow::Result<()> {
    println!("Preset Directories:");
    println!("===================");
    println!();
    println!("User presets:   {}", user_presets_dir().display());
    println!("System presets: {}", system_presets_dir().display());
    println!("Config dir:     {}", user_config_dir().display());
    Ok(())
}
