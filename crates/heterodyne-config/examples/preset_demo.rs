//! Receiver preset demo: factory presets, custom presets, and TOML I/O.
//!
//! Run with: cargo run -p heterodyne-config --example preset_demo

use heterodyne_config::{factory_presets, get_factory_preset, is_factory_preset, ReceiverPreset};
use heterodyne_registry::SchemeTag;

fn main() {
    println!("=== Factory Presets ===\n");

    for preset in factory_presets().unwrap() {
        println!(
            "  {:<24} {:>12.3} MHz  {:<5}  {}",
            preset.name,
            preset.centre_frequency_hz / 1_000_000.0,
            preset.scheme().name(),
            preset.description.as_deref().unwrap_or("")
        );
    }

    println!("\nIs 'noaa_weather' a factory preset? {}", is_factory_preset("noaa_weather"));
    println!("Is 'my_custom' a factory preset? {}", is_factory_preset("my_custom"));

    println!("\n=== Custom Preset ===\n");

    let preset = ReceiverPreset::new("Local Repeater", 146_940_000.0, SchemeTag::Nbfm)
        .with_description("Local 2m repeater, negative offset")
        .with_frequency_offset_hz(-600_000.0);

    println!("Preset: {}", preset.name);
    println!("Scheme: {}", preset.scheme().name());
    println!("Centre: {:.3} MHz", preset.centre_frequency_hz / 1_000_000.0);

    println!("\n--- Serialized TOML ---");
    println!("{}", preset.to_toml().unwrap());

    let noaa = get_factory_preset("noaa_weather").unwrap().unwrap();
    let roundtrip = ReceiverPreset::from_toml(&noaa.to_toml().unwrap()).unwrap();
    println!("Roundtrip preserved name: {}", roundtrip.name == noaa.name);
}
