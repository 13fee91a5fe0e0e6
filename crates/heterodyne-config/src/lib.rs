//! Preset persistence for the heterodyne receiver.
//!
//! A receiver preset bundles a centre frequency, a baseband offset, and a
//! mode's parameters into one TOML-serializable record, so a tuning
//! configuration can be saved and recalled by name instead of re-entered by
//! hand every session.
//!
//! # Example
//!
//! ```rust,no_run
//! use heterodyne_config::{ReceiverPreset, user_presets_dir};
//! use heterodyne_registry::SchemeTag;
//!
//! let preset = ReceiverPreset::new("2m Calling", 146_520_000.0, SchemeTag::Nbfm);
//! let path = user_presets_dir().join("2m_calling.toml");
//! preset.save(&path).unwrap();
//!
//! let loaded = ReceiverPreset::load(&path).unwrap();
//! assert_eq!(loaded.name, "2m Calling");
//! ```

mod error;
mod preset;

/// Platform-specific paths for presets and configuration.
pub mod paths;

/// Clamping policy for frequency fields (spec.md §7).
pub mod validation;

/// Factory presets bundled with the receiver.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    factory_presets, get_factory_preset, is_factory_preset, FACTORY_PRESET_NAMES,
};
pub use paths::{
    ensure_user_config_dir, ensure_user_presets_dir, find_preset, list_all_presets,
    list_system_presets, list_user_presets, preset_name_from_path, system_presets_dir,
    user_config_dir, user_presets_dir,
};
pub use preset::ReceiverPreset;
pub use validation::{clamp_centre_frequency_hz, clamp_frequency_offset_hz};
