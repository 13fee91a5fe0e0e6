//! Per-mode parameter sets (spec.md §3 "Mode parameters").
//!
//! Each mode carries its own small parameter struct rather than one
//! do-everything configuration object, so a pipeline only exposes the knobs
//! that are meaningful for it (there is no "stereo" toggle on an AM
//! pipeline, no "sideband" on WBFM). [`ModeParams`] wraps all five so the
//! controller can hold one value per active mode without a trait object.

use heterodyne_core::Sideband;

/// Minimum accepted squelch threshold, a linear SNR ratio (not dB).
pub const SQUELCH_MIN: f32 = 0.0;
/// Maximum accepted squelch threshold, a linear SNR ratio (not dB).
pub const SQUELCH_MAX: f32 = 6.0;

/// Minimum/maximum NBFM peak deviation, in Hz.
pub const NBFM_DEVIATION_MIN_HZ: f32 = 125.0;
pub const NBFM_DEVIATION_MAX_HZ: f32 = 15_000.0;

/// Minimum/maximum AM channel bandwidth, in Hz.
pub const AM_BANDWIDTH_MIN_HZ: f32 = 250.0;
pub const AM_BANDWIDTH_MAX_HZ: f32 = 30_000.0;

/// Minimum/maximum SSB channel bandwidth, in Hz.
pub const SSB_BANDWIDTH_MIN_HZ: f32 = 10.0;
pub const SSB_BANDWIDTH_MAX_HZ: f32 = 15_000.0;

/// Minimum/maximum CW channel bandwidth, in Hz.
pub const CW_BANDWIDTH_MIN_HZ: f32 = 5.0;
pub const CW_BANDWIDTH_MAX_HZ: f32 = 1_000.0;

/// Clamp a squelch threshold into the valid linear range.
fn clamp_squelch(threshold: f32) -> f32 {
    threshold.clamp(SQUELCH_MIN, SQUELCH_MAX)
}

/// Wideband FM (broadcast) parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WbfmParams {
    /// Whether to attempt 19kHz pilot lock and stereo decode.
    pub stereo: bool,
}

impl WbfmParams {
    /// Default parameters: stereo on.
    pub fn new() -> Self {
        Self { stereo: true }
    }
}

impl Default for WbfmParams {
    fn default() -> Self {
        Self::new()
    }
}

/// Narrowband FM parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NbfmParams {
    /// Peak deviation the channel filter and discriminator are tuned to,
    /// in Hz. Clamped to `[125, 15000]`.
    pub max_deviation_hz: f32,
    /// Squelch threshold, a linear SNR ratio. Clamped to `[0, 6]`.
    pub squelch: f32,
}

impl NbfmParams {
    /// Default parameters: 5kHz deviation (a common narrowband voice
    /// channel), squelch open.
    pub fn new() -> Self {
        Self { max_deviation_hz: 5_000.0, squelch: SQUELCH_MIN }
    }

    /// Set the peak deviation in Hz, clamped to `[125, 15000]`.
    pub fn set_max_deviation_hz(&mut self, hz: f32) {
        self.max_deviation_hz = hz.clamp(NBFM_DEVIATION_MIN_HZ, NBFM_DEVIATION_MAX_HZ);
    }

    /// Set the squelch threshold, clamped to `[0, 6]`.
    pub fn set_squelch(&mut self, threshold: f32) {
        self.squelch = clamp_squelch(threshold);
    }
}

impl Default for NbfmParams {
    fn default() -> Self {
        Self::new()
    }
}

/// AM parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmParams {
    /// Whether to apply AGC after envelope detection.
    pub agc_enabled: bool,
    /// Channel bandwidth in Hz. Clamped to `[250, 30000]`.
    pub bandwidth_hz: f32,
    /// Squelch threshold, a linear SNR ratio. Clamped to `[0, 6]`.
    pub squelch: f32,
}

impl AmParams {
    /// Default parameters: AGC on, 10kHz bandwidth, squelch open.
    pub fn new() -> Self {
        Self { agc_enabled: true, bandwidth_hz: 10_000.0, squelch: SQUELCH_MIN }
    }

    /// Set the channel bandwidth in Hz, clamped to `[250, 30000]`.
    pub fn set_bandwidth(&mut self, hz: f32) {
        self.bandwidth_hz = hz.clamp(AM_BANDWIDTH_MIN_HZ, AM_BANDWIDTH_MAX_HZ);
    }

    /// Set the squelch threshold, clamped to `[0, 6]`.
    pub fn set_squelch(&mut self, threshold: f32) {
        self.squelch = clamp_squelch(threshold);
    }
}

impl Default for AmParams {
    fn default() -> Self {
        Self::new()
    }
}

/// SSB parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SsbParams {
    /// Which sideband to recover.
    pub sideband: Sideband,
    /// Channel bandwidth in Hz. Clamped to `[10, 15000]`.
    pub bandwidth_hz: f32,
    /// Squelch threshold, a linear SNR ratio. Clamped to `[0, 6]`.
    pub squelch: f32,
}

impl SsbParams {
    /// Default parameters: given sideband, 2.8kHz voice bandwidth, squelch
    /// open.
    pub fn new(sideband: Sideband) -> Self {
        Self { sideband, bandwidth_hz: 2_800.0, squelch: SQUELCH_MIN }
    }

    /// Set the channel bandwidth in Hz, clamped to `[10, 15000]`.
    pub fn set_bandwidth(&mut self, hz: f32) {
        self.bandwidth_hz = hz.clamp(SSB_BANDWIDTH_MIN_HZ, SSB_BANDWIDTH_MAX_HZ);
    }

    /// Set the squelch threshold, clamped to `[0, 6]`.
    pub fn set_squelch(&mut self, threshold: f32) {
        self.squelch = clamp_squelch(threshold);
    }
}

impl Default for SsbParams {
    fn default() -> Self {
        Self::new(Sideband::Upper)
    }
}

/// CW (Morse) parameters. Has no squelch (spec.md §4.16: CW always passes
/// through).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CwParams {
    /// Which sideband the BFO convention places the CW tone on.
    pub sideband: Sideband,
    /// Desired audible tone frequency (offset from the suppressed
    /// carrier), in Hz. Clamped to `[200, 2000]`.
    pub tone_hz: f32,
    /// Channel bandwidth in Hz. Clamped to `[5, 1000]`.
    pub bandwidth_hz: f32,
}

impl CwParams {
    /// Default parameters: upper sideband convention, 700Hz tone (a
    /// common CW pitch), 1000Hz bandwidth.
    pub fn new() -> Self {
        Self { sideband: Sideband::Upper, tone_hz: 700.0, bandwidth_hz: 1_000.0 }
    }

    /// Set the CW tone frequency in Hz, clamped to `[200, 2000]`.
    pub fn set_tone_hz(&mut self, tone_hz: f32) {
        self.tone_hz = tone_hz.clamp(200.0, 2000.0);
    }

    /// Set the channel bandwidth in Hz, clamped to `[5, 1000]`.
    pub fn set_bandwidth(&mut self, hz: f32) {
        self.bandwidth_hz = hz.clamp(CW_BANDWIDTH_MIN_HZ, CW_BANDWIDTH_MAX_HZ);
    }
}

impl Default for CwParams {
    fn default() -> Self {
        Self::new()
    }
}

/// Tagged union of every mode's parameter set.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum ModeParams {
    /// Wideband (broadcast) FM.
    Wbfm(WbfmParams),
    /// Narrowband FM.
    Nbfm(NbfmParams),
    /// Amplitude modulation.
    Am(AmParams),
    /// Single sideband.
    Ssb(SsbParams),
    /// Continuous wave (Morse).
    Cw(CwParams),
}

impl ModeParams {
    /// Configured squelch threshold (a linear SNR ratio, `0..=6`), for
    /// modes that have one. WBFM and CW have none and always pass
    /// through (spec.md §4.16).
    pub fn squelch(&self) -> Option<f32> {
        match self {
            Self::Wbfm(_) => None,
            Self::Nbfm(p) => Some(p.squelch),
            Self::Am(p) => Some(p.squelch),
            Self::Ssb(p) => Some(p.squelch),
            Self::Cw(_) => None,
        }
    }
}
