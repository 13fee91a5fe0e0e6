//! Shared CLI helpers used across multiple commands.

use heterodyne_config::{find_preset as config_find_preset, get_factory_preset, is_factory_preset, ReceiverPreset};
use std::path::PathBuf;

/// Load a preset by name or path.
///
/// Searches in this order:
/// 1. Factory presets (by name)
/// 2. User presets (by name)
/// 3. System presets (by name)
/// 4. File path (if it's a path to a .toml file)
pub fn load_preset(name: &str) -> anyhow::Result<ReceiverPreset> {
    if let Some(preset) = get_factory_preset(name)? {
        return Ok(preset);
    }

    if let Some(path) = config_find_preset(name) {
        return ReceiverPreset::load(&path).map_err(|e| anyhow::anyhow!("{}", e));
    }

    let path = PathBuf::from(name);
    if path.exists() {
        return ReceiverPreset::load(&path).map_err(|e| anyhow::anyhow!("{}", e));
    }

    anyhow::bail!(
        "Preset '{}' not found. Use 'heterodyne presets list' to see available presets.",
        name
    )
}

/// Whether `name` refers to a bundled, read-only factory preset.
pub fn is_builtin(name: &str) -> bool {
    is_factory_preset(name)
}
