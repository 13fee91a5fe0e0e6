//! De-emphasis filter (spec.md §4.8).
//!
//! Broadcast FM pre-emphasizes high frequencies at the transmitter to
//! improve the signal's noise performance; the receiver reverses this with
//! a one-pole lowpass whose time constant matches the region's standard
//! (50 microseconds in most of the world, 75 microseconds in the
//! Americas and South Korea).

use crate::one_pole::OnePole;

/// North American / South Korean de-emphasis time constant, in seconds.
pub const TAU_75_US: f32 = 75e-6;
/// Rest-of-world de-emphasis time constant, in seconds.
pub const TAU_50_US: f32 = 50e-6;

/// One-pole de-emphasis filter parameterized by a time constant rather than
/// a corner frequency.
pub struct DeEmphasis {
    filter: OnePole,
    sample_rate: f32,
    tau: f32,
}

impl DeEmphasis {
    /// Create a de-emphasis filter for the given sample rate and time
    /// constant (seconds). Use [`TAU_75_US`] or [`TAU_50_US`].
    pub fn new(sample_rate: f32, tau_seconds: f32) -> Self {
        let coeff = Self::coeff_from_tau(tau_seconds, sample_rate);
        Self {
            filter: OnePole::from_coeff(sample_rate, coeff),
            sample_rate,
            tau: tau_seconds,
        }
    }

    /// Switch the time constant (e.g. when the user changes receiver
    /// region), recalculating the filter coefficient.
    pub fn set_tau(&mut self, tau_seconds: f32) {
        self.tau = tau_seconds;
        self.filter.set_coeff(Self::coeff_from_tau(tau_seconds, self.sample_rate));
    }

    /// Current time constant in seconds.
    pub fn tau(&self) -> f32 {
        self.tau
    }

    /// Update the sample rate, recalculating the coefficient to keep the
    /// same time constant.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.filter.set_coeff(Self::coeff_from_tau(self.tau, sample_rate));
    }

    /// Process one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.filter.process(input)
    }

    /// Process a whole block in place.
    pub fn process_in_place(&mut self, block: &mut [f32]) {
        for sample in block.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Reset filter state.
    pub fn reset(&mut self) {
        self.filter.reset();
    }

    /// `coeff = exp(-1 / (tau * sample_rate))`.
    fn coeff_from_tau(tau_seconds: f32, sample_rate: f32) -> f32 {
        libm::expf(-1.0 / (tau_seconds * sample_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attenuates_high_frequency_more_than_low() {
        let sample_rate = 48000.0;
        let mut de = DeEmphasis::new(sample_rate, TAU_75_US);

        let mut low_energy = 0.0f32;
        for n in 0..4800 {
            let t = n as f32 / sample_rate;
            low_energy += de.process(libm::sinf(core::f32::consts::TAU * 300.0 * t)).abs();
        }

        de.reset();
        let mut high_energy = 0.0f32;
        for n in 0..4800 {
            let t = n as f32 / sample_rate;
            high_energy += de.process(libm::sinf(core::f32::consts::TAU * 8000.0 * t)).abs();
        }

        assert!(high_energy < low_energy, "high={high_energy} low={low_energy}");
    }

    #[test]
    fn region_switch_changes_coeff() {
        let mut de = DeEmphasis::new(48000.0, TAU_50_US);
        let coeff_50 = de.filter.coeff();
        de.set_tau(TAU_75_US);
        let coeff_75 = de.filter.coeff();
        assert_ne!(coeff_50, coeff_75);
        assert_eq!(de.tau(), TAU_75_US);
    }

    #[test]
    fn sample_rate_change_preserves_tau() {
        let mut de = DeEmphasis::new(48000.0, TAU_75_US);
        de.set_sample_rate(96000.0);
        assert_eq!(de.tau(), TAU_75_US);
    }
}
