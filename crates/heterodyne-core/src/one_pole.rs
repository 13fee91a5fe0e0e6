//! One-pole lowpass filter, the building block for de-emphasis and AGC averaging.
//!
//! A single-pole IIR lowpass with the difference equation:
//!
//! ```text
//! y[n] = x[n] + coeff * (y[n-1] - x[n])
//!      = (1 - coeff) * x[n] + coeff * y[n-1]
//! ```
//!
//! where `coeff = exp(-2π * freq / sample_rate)`.
//!
//! This is the simplest possible lowpass — 6 dB/octave rolloff, zero latency,
//! one multiply-add per sample. [`crate::deemphasis::DeEmphasis`] and
//! [`crate::agc::Agc`] are both built on top of it.
//!
//! # Reference
//!
//! Julius O. Smith III, "Introduction to Digital Filters with Audio Applications",
//! Section: One-Pole Filter.

use crate::math::flush_denormal;
use libm::expf;

/// One-pole (6 dB/oct) lowpass filter.
///
/// # Invariants
///
/// - `coeff` is always in `[0, 1)` for stable operation.
/// - `state` is flushed to zero when below `1e-20` (denormal protection).
#[derive(Debug, Clone)]
pub struct OnePole {
    state: f32,
    coeff: f32,
    sample_rate: f32,
    freq: f32,
}

impl OnePole {
    /// Create a new one-pole lowpass filter from a corner frequency.
    pub fn new(sample_rate: f32, freq_hz: f32) -> Self {
        let mut filter = Self {
            state: 0.0,
            coeff: 0.0,
            sample_rate,
            freq: freq_hz,
        };
        filter.recalculate_coeff();
        filter
    }

    /// Create a one-pole lowpass directly from a feedback coefficient,
    /// bypassing the frequency-to-coefficient conversion.
    ///
    /// Used by [`crate::deemphasis::DeEmphasis`], which derives its
    /// coefficient from a time constant rather than a corner frequency.
    pub fn from_coeff(sample_rate: f32, coeff: f32) -> Self {
        Self {
            state: 0.0,
            coeff,
            sample_rate,
            freq: 0.0,
        }
    }

    /// Set the cutoff frequency and recalculate the coefficient.
    pub fn set_frequency(&mut self, freq_hz: f32) {
        self.freq = freq_hz;
        self.recalculate_coeff();
    }

    /// Directly set the feedback coefficient.
    pub fn set_coeff(&mut self, coeff: f32) {
        self.coeff = coeff;
    }

    /// Current feedback coefficient.
    pub fn coeff(&self) -> f32 {
        self.coeff
    }

    /// Process one sample through the lowpass filter.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.state = flush_denormal(input + self.coeff * (self.state - input));
        self.state
    }

    /// Reset filter state to zero.
    pub fn reset(&mut self) {
        self.state = 0.0;
    }

    /// Update sample rate and recalculate the coefficient from the stored
    /// corner frequency.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate_coeff();
    }

    fn recalculate_coeff(&mut self) {
        self.coeff = expf(-core::f32::consts::TAU * self.freq / self.sample_rate);
    }
}
