//! Tuner abstraction (spec.md §6.1).
//!
//! Every operation may fail with a generic [`DeviceError`] except the pure
//! getters. Implementations are synchronous here: the scheduling model
//! (spec.md §5) only requires that the stream engine keep two reads in
//! flight, not that individual calls be `async fn`.

use crate::error::DeviceError;
use heterodyne_core::RawIqBlock;

/// Direct-sampling input channel selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectSampling {
    /// Direct sampling disabled; the tuner's own mixer is used.
    Off,
    /// Direct sampling on the I-channel ADC input.
    IChannel,
    /// Direct sampling on the Q-channel ADC input.
    QChannel,
}

/// Tuner gain: either an explicit value in dB, or automatic gain control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GainSetting {
    /// Hardware/driver automatic gain control.
    Auto,
    /// A fixed gain in dB.
    Manual(f32),
}

/// Below this centre frequency, direct sampling activates automatically if
/// a direct-sampling method has been configured (spec.md §6.1 "Direct-sampling
/// policy").
pub const DIRECT_SAMPLING_THRESHOLD_HZ: f64 = 29_000_000.0;

/// Contract for a tuner device (real or simulated).
pub trait Tuner {
    /// Request a sample rate; returns the rate the device actually settled on.
    fn set_sample_rate(&mut self, hz: u32) -> Result<u32, DeviceError>;

    /// Request a centre frequency; returns the frequency actually tuned.
    fn set_centre_frequency(&mut self, hz: f64) -> Result<f64, DeviceError>;

    /// Apply a frequency-correction factor in parts per million.
    fn set_frequency_correction_ppm(&mut self, ppm: i32) -> Result<(), DeviceError>;

    /// Set the tuner gain.
    fn set_gain(&mut self, gain: GainSetting) -> Result<(), DeviceError>;

    /// Current gain setting.
    fn gain(&self) -> GainSetting;

    /// Configure which channel, if any, direct sampling should use.
    fn set_direct_sampling(&mut self, mode: DirectSampling) -> Result<(), DeviceError>;

    /// Currently configured direct-sampling method.
    fn direct_sampling(&self) -> DirectSampling;

    /// Whether direct sampling is actually active for the current tuning
    /// (spec.md §6.1: auto-enabled below 29MHz if a method is configured).
    fn direct_sampling_active(&self) -> bool;

    /// Enable or disable the bias tee (DC injection for an active antenna
    /// preamp).
    fn enable_bias_tee(&mut self, enabled: bool) -> Result<(), DeviceError>;

    /// Whether the bias tee is currently enabled.
    fn bias_tee_enabled(&self) -> bool;

    /// Reset the device's internal sample buffer. Must be called before the
    /// first [`read_samples`](Self::read_samples).
    fn reset_buffer(&mut self) -> Result<(), DeviceError>;

    /// Read `length` (I, Q) sample pairs. `length` should be a multiple of
    /// 512; the returned block carries exactly `2 * length` bytes.
    fn read_samples(&mut self, length: usize) -> Result<RawIqBlock, DeviceError>;

    /// Release the device.
    fn close(&mut self) -> Result<(), DeviceError>;
}
