//! Deterministic simulated tuner (spec.md §6.1, §4.17) used for testing and
//! the CLI `generate` command.
//!
//! A user-supplied generator closure produces synthetic float `(I, Q)` at
//! the tuned centre frequency and sample rate; the tuner then applies the
//! same gain emulation and byte-quantization path a real device's samples
//! would go through, so tests exercise the exact source-adapter code used
//! for hardware.

use crate::error::DeviceError;
use crate::tuner::{DIRECT_SAMPLING_THRESHOLD_HZ, DirectSampling, GainSetting, Tuner};
use heterodyne_core::{IqBlock, RawIqBlock};

/// A synthetic I/Q generator: given `(centre_frequency_hz, sample_rate_hz,
/// sample_count)`, produce that many `(I, Q)` float sample pairs.
pub type Generator = Box<dyn FnMut(f64, u32, usize) -> (Vec<f32>, Vec<f32>) + Send>;

/// Simulated tuner driven by a user-supplied [`Generator`].
pub struct SimulatedTuner {
    generator: Generator,
    sample_rate_hz: u32,
    centre_frequency_hz: f64,
    correction_ppm: i32,
    gain: GainSetting,
    direct_sampling_method: DirectSampling,
    bias_tee: bool,
    buffer_reset: bool,
    closed: bool,
}

impl SimulatedTuner {
    /// Create a simulated tuner with an initial sample rate and centre
    /// frequency, driven by `generator`.
    pub fn new(generator: Generator, sample_rate_hz: u32, centre_frequency_hz: f64) -> Self {
        Self {
            generator,
            sample_rate_hz,
            centre_frequency_hz,
            correction_ppm: 0,
            gain: GainSetting::Auto,
            direct_sampling_method: DirectSampling::Off,
            bias_tee: false,
            buffer_reset: false,
            closed: false,
        }
    }

    /// Linear gain multiplier for the current [`GainSetting`] (spec.md
    /// §4.17): `10^((gain_db - 25) / 20)`, with `Auto` treated as 25dB (unity
    /// multiplier) since there is no real AGC to emulate.
    fn gain_multiplier(&self) -> f32 {
        let gain_db = match self.gain {
            GainSetting::Auto => 25.0,
            GainSetting::Manual(db) => db,
        };
        10f32.powf((gain_db - 25.0) / 20.0)
    }
}

impl Tuner for SimulatedTuner {
    fn set_sample_rate(&mut self, hz: u32) -> Result<u32, DeviceError> {
        if self.closed {
            return Err(DeviceError::Closed);
        }
        self.sample_rate_hz = hz;
        Ok(hz)
    }

    fn set_centre_frequency(&mut self, hz: f64) -> Result<f64, DeviceError> {
        if self.closed {
            return Err(DeviceError::Closed);
        }
        self.centre_frequency_hz = hz;
        Ok(hz)
    }

    fn set_frequency_correction_ppm(&mut self, ppm: i32) -> Result<(), DeviceError> {
        if self.closed {
            return Err(DeviceError::Closed);
        }
        self.correction_ppm = ppm;
        Ok(())
    }

    fn set_gain(&mut self, gain: GainSetting) -> Result<(), DeviceError> {
        if self.closed {
            return Err(DeviceError::Closed);
        }
        self.gain = gain;
        Ok(())
    }

    fn gain(&self) -> GainSetting {
        self.gain
    }

    fn set_direct_sampling(&mut self, mode: DirectSampling) -> Result<(), DeviceError> {
        if self.closed {
            return Err(DeviceError::Closed);
        }
        self.direct_sampling_method = mode;
        Ok(())
    }

    fn direct_sampling(&self) -> DirectSampling {
        self.direct_sampling_method
    }

    fn direct_sampling_active(&self) -> bool {
        self.direct_sampling_method != DirectSampling::Off
            && self.centre_frequency_hz < DIRECT_SAMPLING_THRESHOLD_HZ
    }

    fn enable_bias_tee(&mut self, enabled: bool) -> Result<(), DeviceError> {
        if self.closed {
            return Err(DeviceError::Closed);
        }
        self.bias_tee = enabled;
        Ok(())
    }

    fn bias_tee_enabled(&self) -> bool {
        self.bias_tee
    }

    fn reset_buffer(&mut self) -> Result<(), DeviceError> {
        if self.closed {
            return Err(DeviceError::Closed);
        }
        self.buffer_reset = true;
        Ok(())
    }

    fn read_samples(&mut self, length: usize) -> Result<RawIqBlock, DeviceError> {
        if self.closed {
            return Err(DeviceError::Closed);
        }
        if !self.buffer_reset {
            return Err(DeviceError::Io("reset_buffer() must be called before read_samples()".into()));
        }

        let (i, q) = (self.generator)(self.centre_frequency_hz, self.sample_rate_hz, length);
        let multiplier = self.gain_multiplier();

        let mut bytes = Vec::with_capacity(length * 2);
        for k in 0..length {
            let gi = (i.get(k).copied().unwrap_or(0.0) * multiplier).clamp(-1.0, 1.0);
            let gq = (q.get(k).copied().unwrap_or(0.0) * multiplier).clamp(-1.0, 1.0);
            bytes.push(IqBlock::float_to_byte(gi));
            bytes.push(IqBlock::float_to_byte(gq));
        }

        Ok(RawIqBlock {
            bytes,
            frequency_hz: self.centre_frequency_hz,
            direct_sampling: self.direct_sampling_active(),
        })
    }

    fn close(&mut self) -> Result<(), DeviceError> {
        self.closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn silent_generator() -> Generator {
        Box::new(|_centre, _rate, len| (vec![0.0; len], vec![0.0; len]))
    }

    #[test]
    fn read_before_reset_fails() {
        let mut tuner = SimulatedTuner::new(silent_generator(), 1_000_000, 100_000_000.0);
        assert!(tuner.read_samples(512).is_err());
    }

    #[test]
    fn read_after_reset_succeeds() {
        let mut tuner = SimulatedTuner::new(silent_generator(), 1_000_000, 100_000_000.0);
        tuner.reset_buffer().unwrap();
        let block = tuner.read_samples(512).unwrap();
        assert_eq!(block.bytes.len(), 1024);
    }

    #[test]
    fn direct_sampling_activates_below_threshold() {
        let mut tuner = SimulatedTuner::new(silent_generator(), 2_000_000, 10_000_000.0);
        tuner.set_direct_sampling(DirectSampling::IChannel).unwrap();
        assert!(tuner.direct_sampling_active());

        tuner.set_centre_frequency(100_000_000.0).unwrap();
        assert!(!tuner.direct_sampling_active());
    }

    #[test]
    fn closed_tuner_rejects_further_operations() {
        let mut tuner = SimulatedTuner::new(silent_generator(), 1_000_000, 100_000_000.0);
        tuner.close().unwrap();
        assert!(tuner.set_sample_rate(2_000_000).is_err());
        assert!(tuner.read_samples(512).is_err());
    }

    #[test]
    fn gain_emulation_scales_output_amplitude() {
        let generator: Generator = Box::new(|_c, _r, len| (vec![0.1; len], vec![0.0; len]));
        let mut tuner = SimulatedTuner::new(generator, 1_000_000, 100_000_000.0);
        tuner.reset_buffer().unwrap();
        tuner.set_gain(GainSetting::Manual(25.0)).unwrap();
        let unity = tuner.read_samples(4).unwrap();

        tuner.reset_buffer().unwrap();
        tuner.set_gain(GainSetting::Manual(45.0)).unwrap();
        let boosted = tuner.read_samples(4).unwrap();

        assert!(boosted.bytes[0] > unity.bytes[0], "boosted gain should raise the I byte");
    }
}
