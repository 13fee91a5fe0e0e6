//! FM discriminator (spec.md §4.4).
//!
//! Instantaneous frequency is recovered from a complex baseband signal via
//! the product-conjugate method: multiply each sample by the conjugate of
//! the previous sample and take the angle of the result. This avoids
//! differentiating phase directly, which would need unwrapping across the
//! `±pi` boundary. The raw phase step is then normalised by the mode's
//! peak deviation so a signal modulated right up to that deviation produces
//! output right at `±1`, not `±pi`.

use core::f32::consts::TAU;
use libm::atan2f;

/// Recovers the instantaneous-frequency signal from complex FM baseband,
/// normalised to `±1` at `max_deviation_hz`.
#[derive(Debug, Clone)]
pub struct FmDiscriminator {
    prev_i: f32,
    prev_q: f32,
    max_deviation_normalized: f32,
}

impl FmDiscriminator {
    /// Create a discriminator tuned for `max_deviation_hz` peak deviation
    /// at `out_rate` samples/sec.
    pub fn new(max_deviation_hz: f32, out_rate: f32) -> Self {
        Self {
            prev_i: 0.0,
            prev_q: 0.0,
            max_deviation_normalized: max_deviation_hz / out_rate,
        }
    }

    /// Retune to a new deviation/rate pair, keeping phase history intact.
    pub fn set_max_deviation(&mut self, max_deviation_hz: f32, out_rate: f32) {
        self.max_deviation_normalized = max_deviation_hz / out_rate;
    }

    /// Demodulate one complex sample.
    ///
    /// `atan2(q[n]*i[n-1] - i[n]*q[n-1], i[n]*i[n-1] + q[n]*q[n-1])` is the
    /// angle of `s[n] * conj(s[n-1])`, i.e. the phase step between
    /// consecutive samples, proportional to instantaneous frequency. Dividing
    /// by `2*pi*max_deviation_normalized` scales a signal at full deviation
    /// to `±1`.
    #[inline]
    pub fn process(&mut self, i: f32, q: f32) -> f32 {
        let im = q * self.prev_i - i * self.prev_q;
        let re = i * self.prev_i + q * self.prev_q;
        let phase = atan2f(im, re);
        self.prev_i = i;
        self.prev_q = q;
        phase / (TAU * self.max_deviation_normalized)
    }

    /// Demodulate a whole block, returning the discriminated samples.
    pub fn process_block(&mut self, i: &[f32], q: &[f32]) -> Vec<f32> {
        debug_assert_eq!(i.len(), q.len());
        i.iter().zip(q.iter()).map(|(&si, &sq)| self.process(si, sq)).collect()
    }

    /// Reset phase history to zero, as at stream start.
    pub fn reset(&mut self) {
        self.prev_i = 0.0;
        self.prev_q = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libm::{cosf, sinf};

    #[test]
    fn zero_deviation_produces_zero_output() {
        let mut disc = FmDiscriminator::new(5_000.0, 48_000.0);
        disc.process(1.0, 0.0);
        let out = disc.process(1.0, 0.0);
        assert!(out.abs() < 1e-5, "unmodulated carrier should discriminate to 0, got {out}");
    }

    #[test]
    fn tone_at_max_deviation_saturates_near_unity() {
        // A pure tone whose phase step per sample corresponds exactly to
        // max_deviation_hz at out_rate should discriminate to ~1.0.
        let out_rate = 48_000.0;
        let max_deviation_hz = 5_000.0;
        let step = TAU * max_deviation_hz / out_rate;

        let mut disc = FmDiscriminator::new(max_deviation_hz, out_rate);
        disc.process(1.0, 0.0);
        let mut last = 0.0;
        for n in 1..100 {
            let phase = step * n as f32;
            last = disc.process(cosf(phase), sinf(phase));
        }
        assert!((last - 1.0).abs() < 1e-3, "expected ~1.0 at full deviation, got {last}");
    }

    #[test]
    fn reset_clears_history() {
        let mut disc = FmDiscriminator::new(5_000.0, 48_000.0);
        disc.process(0.5, 0.5);
        disc.reset();
        assert_eq!(disc.prev_i, 0.0);
        assert_eq!(disc.prev_q, 0.0);
    }

    #[test]
    fn set_max_deviation_rescales_without_touching_phase_history() {
        let mut disc = FmDiscriminator::new(5_000.0, 48_000.0);
        disc.process(1.0, 0.0);
        disc.set_max_deviation(75_000.0, 192_000.0);
        // prev_i/prev_q carry over; only the scale factor changes.
        assert!((disc.max_deviation_normalized - 75_000.0 / 192_000.0).abs() < 1e-6);
    }

    #[test]
    fn wbfm_deviation_at_intermediate_rate_stays_within_unit_range() {
        // A composite at the standard 75kHz broadcast deviation, discriminated
        // at the 192kHz intermediate rate, must land within [-1, 1] (spec.md
        // §8 property 1, level preservation).
        let out_rate = 192_000.0;
        let max_deviation_hz = 75_000.0;
        let step = TAU * max_deviation_hz / out_rate;

        let mut disc = FmDiscriminator::new(max_deviation_hz, out_rate);
        disc.process(1.0, 0.0);
        for n in 1..50 {
            let phase = step * n as f32;
            let out = disc.process(cosf(phase), sinf(phase));
            assert!(out.abs() <= 1.0 + 1e-4, "got {out} outside [-1,1]");
        }
    }
}
