//! AM envelope detector (spec.md §4.5).
//!
//! Demodulating AM is just taking the magnitude of the complex baseband
//! signal; the carrier shows up as a DC offset on the result, which is
//! removed by a [`DcBlocker`] with a corner near 20 Hz so it doesn't bleed
//! into recovered audio.

use crate::dc_blocker::DcBlocker;

/// Envelope detector for amplitude-modulated signals.
pub struct AmEnvelopeDetector {
    dc_blocker: DcBlocker,
}

impl AmEnvelopeDetector {
    /// Create a detector for the given audio sample rate.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            dc_blocker: DcBlocker::new(sample_rate),
        }
    }

    /// Demodulate one complex sample: `sqrt(i^2 + q^2)`, DC-blocked.
    #[inline]
    pub fn process(&mut self, i: f32, q: f32) -> f32 {
        let envelope = (i * i + q * q).sqrt();
        self.dc_blocker.process(envelope)
    }

    /// Demodulate a whole block of complex samples.
    pub fn process_block(&mut self, i: &[f32], q: &[f32]) -> Vec<f32> {
        debug_assert_eq!(i.len(), q.len());
        i.iter().zip(q.iter()).map(|(&si, &sq)| self.process(si, sq)).collect()
    }

    /// Reset internal DC-blocker state.
    pub fn reset(&mut self) {
        self.dc_blocker.reset();
    }

    /// Update the sample rate of the internal DC blocker.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.dc_blocker.set_sample_rate(sample_rate);
    }
}
