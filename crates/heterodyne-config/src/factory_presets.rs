//! Factory presets bundled with the receiver.
//!
//! A handful of well-known tuning configurations, embedded at compile time
//! so they are always available without an external file, the same way the
//! teacher workspace ships a default effect-chain preset alongside the
//! user's own.

use crate::error::ConfigError;
use crate::preset::ReceiverPreset;

/// Names of the built-in presets, in listing order.
pub static FACTORY_PRESET_NAMES: &[&str] =
    &["fm_broadcast", "noaa_weather", "airband_guard", "ham_2m_calling", "cw_practice"];

static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("fm_broadcast", FM_BROADCAST_PRESET),
    ("noaa_weather", NOAA_WEATHER_PRESET),
    ("airband_guard", AIRBAND_GUARD_PRESET),
    ("ham_2m_calling", HAM_2M_CALLING_PRESET),
    ("cw_practice", CW_PRACTICE_PRESET),
];

const FM_BROADCAST_PRESET: &str = r#"
name = "FM Broadcast"
description = "A typical commercial FM broadcast channel, stereo"
centre_frequency_hz = 97900000.0
frequency_offset_hz = 0.0

[mode]
type = "Wbfm"
stereo = true
"#;

const NOAA_WEATHER_PRESET: &str = r#"
name = "NOAA Weather Radio"
description = "WX channel 3, narrowband FM"
centre_frequency_hz = 162550000.0
frequency_offset_hz = 0.0

[mode]
type = "Nbfm"
max_deviation_hz = 5000.0
squelch = 1.5
"#;

const AIRBAND_GUARD_PRESET: &str = r#"
name = "Airband Guard"
description = "121.5 MHz international air distress frequency, AM"
centre_frequency_hz = 121500000.0
frequency_offset_hz = 0.0

[mode]
type = "Am"
agc_enabled = true
bandwidth_hz = 6000.0
squelch = 2.0
"#;

const HAM_2M_CALLING_PRESET: &str = r#"
name = "2m Calling Frequency"
description = "146.520 MHz, the US national FM simplex calling frequency"
centre_frequency_hz = 146520000.0
frequency_offset_hz = 0.0

[mode]
type = "Nbfm"
max_deviation_hz = 5000.0
squelch = 1.0
"#;

const CW_PRACTICE_PRESET: &str = r#"
name = "CW Practice"
description = "A quiet 40m CW sub-band, 700 Hz sidetone"
centre_frequency_hz = 7030000.0
frequency_offset_hz = 0.0

[mode]
type = "Cw"
sideband = "Upper"
tone_hz = 700.0
bandwidth_hz = 50.0
"#;

/// All factory presets, parsed.
pub fn factory_presets() -> Result<Vec<ReceiverPreset>, ConfigError> {
    FACTORY_PRESETS_TOML.iter().map(|(_, toml)| ReceiverPreset::from_toml(toml)).collect()
}

/// Get a factory preset by name.
pub fn get_factory_preset(name: &str) -> Result<Option<ReceiverPreset>, ConfigError> {
    match FACTORY_PRESETS_TOML.iter().find(|(n, _)| *n == name) {
        Some((_, toml)) => ReceiverPreset::from_toml(toml).map(Some),
        None => Ok(None),
    }
}

/// Whether `name` is one of the bundled factory presets.
pub fn is_factory_preset(name: &str) -> bool {
    FACTORY_PRESET_NAMES.contains(&name)
}
