//! Receiver preset file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use heterodyne_modes::ModeParams;
use heterodyne_registry::SchemeTag;

use crate::error::ConfigError;
use crate::validation::{clamp_centre_frequency_hz, clamp_frequency_offset_hz};

/// A persisted tuning configuration: centre frequency, baseband offset, and
/// the mode (and its parameters) to demodulate with.
///
/// # TOML Format
///
/// ```toml
/// name = "NOAA Weather Radio"
/// description = "WX channel 3, narrowband FM"
/// centre_frequency_hz = 162550000.0
/// frequency_offset_hz = 0.0
///
/// [mode]
/// type = "Nbfm"
/// max_deviation_hz = 5000.0
/// squelch = 1.5
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReceiverPreset {
    /// Name of the preset.
    pub name: String,

    /// Optional human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Centre frequency to tune the source to, in Hz.
    pub centre_frequency_hz: f64,

    /// Baseband frequency offset applied by the controller, in Hz.
    #[serde(default)]
    pub frequency_offset_hz: f32,

    /// Demodulation mode and its parameters.
    pub mode: ModeParams,
}

impl ReceiverPreset {
    /// Create a new preset for the given scheme, using that scheme's
    /// default parameters, and clamp the frequency fields into range.
    pub fn new(name: impl Into<String>, centre_frequency_hz: f64, scheme: SchemeTag) -> Self {
        Self {
            name: name.into(),
            description: None,
            centre_frequency_hz: clamp_centre_frequency_hz(centre_frequency_hz),
            frequency_offset_hz: 0.0,
            mode: scheme.default_params(),
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the baseband frequency offset, clamped to a sane range.
    pub fn with_frequency_offset_hz(mut self, offset_hz: f32) -> Self {
        self.frequency_offset_hz = clamp_frequency_offset_hz(offset_hz);
        self
    }

    /// Replace the mode parameters.
    pub fn with_mode(mut self, mode: ModeParams) -> Self {
        self.mode = mode;
        self
    }

    /// The scheme implied by this preset's mode parameters. SSB presets
    /// default to upper sideband unless the parameters say otherwise.
    pub fn scheme(&self) -> SchemeTag {
        match &self.mode {
            ModeParams::Wbfm(_) => SchemeTag::Wbfm,
            ModeParams::Nbfm(_) => SchemeTag::Nbfm,
            ModeParams::Am(_) => SchemeTag::Am,
            ModeParams::Ssb(p) => match p.sideband {
                heterodyne_core::Sideband::Upper => SchemeTag::Usb,
                heterodyne_core::Sideband::Lower => SchemeTag::Lsb,
            },
            ModeParams::Cw(_) => SchemeTag::Cw,
        }
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Parse a preset from a TOML string, clamping frequency fields.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let mut preset: ReceiverPreset = toml::from_str(toml_str)?;
        preset.centre_frequency_hz = clamp_centre_frequency_hz(preset.centre_frequency_hz);
        preset.frequency_offset_hz = clamp_frequency_offset_hz(preset.frequency_offset_hz);
        Ok(preset)
    }

    /// Save the preset to a TOML file, creating parent directories as
    /// needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }
        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))
    }

    /// Serialize the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heterodyne_core::Sideband;
    use heterodyne_modes::{NbfmParams, SsbParams};

    #[test]
    fn new_uses_scheme_defaults() {
        let preset = ReceiverPreset::new("2m Calling", 146_520_000.0, SchemeTag::Nbfm);
        assert_eq!(preset.name, "2m Calling");
        assert_eq!(preset.scheme(), SchemeTag::Nbfm);
        assert!(matches!(preset.mode, ModeParams::Nbfm(_)));
    }

    #[test]
    fn scheme_distinguishes_usb_and_lsb() {
        let usb = ReceiverPreset::new("USB", 14_200_000.0, SchemeTag::Usb);
        let lsb = ReceiverPreset::new("LSB", 3_850_000.0, SchemeTag::Lsb);
        assert_eq!(usb.scheme(), SchemeTag::Usb);
        assert_eq!(lsb.scheme(), SchemeTag::Lsb);
    }

    #[test]
    fn roundtrips_through_toml() {
        let original = ReceiverPreset::new("WX3", 162_550_000.0, SchemeTag::Nbfm)
            .with_description("NOAA weather radio")
            .with_frequency_offset_hz(5_000.0)
            .with_mode(ModeParams::Nbfm(NbfmParams::new()));

        let toml = original.to_toml().unwrap();
        let parsed = ReceiverPreset::from_toml(&toml).unwrap();

        assert_eq!(original, parsed);
    }

    #[test]
    fn load_clamps_out_of_range_frequency() {
        let toml = r#"
name = "Bad Frequency"
centre_frequency_hz = -5.0
frequency_offset_hz = 0.0

[mode]
type = "Am"
agc_enabled = true
bandwidth_hz = 10000.0
squelch = 0.0
"#;
        let preset = ReceiverPreset::from_toml(toml).unwrap();
        assert_eq!(preset.centre_frequency_hz, 0.0);
    }

    #[test]
    fn ssb_mode_parses_with_sideband() {
        let preset = ReceiverPreset::new("20m USB", 14_200_000.0, SchemeTag::Usb)
            .with_mode(ModeParams::Ssb(SsbParams::new(Sideband::Lower)));
        let toml = preset.to_toml().unwrap();
        let parsed = ReceiverPreset::from_toml(&toml).unwrap();
        assert_eq!(parsed.scheme(), SchemeTag::Lsb);
    }
}
