//! Complex frequency translation via a numerically-controlled oscillator
//! (spec.md §4.2 "Mixer / frequency shifter").
//!
//! Shifting a complex baseband signal by `offset_hz` is multiplication by
//! `e^{-j*2*pi*offset_hz*t}`. The NCO tracks phase incrementally rather than
//! recomputing `sin`/`cos` from an absolute time base, so it runs
//! indefinitely without losing precision to a growing `t`.

use core::f32::consts::TAU;
use libm::{cosf, sinf};

/// Shifts a complex I/Q stream by a fixed or time-varying offset frequency.
#[derive(Debug, Clone)]
pub struct FrequencyShifter {
    phase: f32,
    phase_increment: f32,
    sample_rate: f32,
}

impl FrequencyShifter {
    /// Create a shifter for the given sample rate, initially at zero offset.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            phase: 0.0,
            phase_increment: 0.0,
            sample_rate,
        }
    }

    /// Set the shift frequency in Hz. Positive values shift the spectrum up;
    /// by convention a negative `offset_hz` is used to pull a signal above
    /// the tuned centre down to baseband.
    pub fn set_offset(&mut self, offset_hz: f32) {
        self.phase_increment = TAU * offset_hz / self.sample_rate;
    }

    /// Update the sample rate. Does not rescale a previously-set offset in
    /// Hz terms — call [`set_offset`](Self::set_offset) again afterwards if
    /// the caller needs the same Hz offset preserved.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }

    /// Mix one complex sample down (or up) by the configured offset,
    /// advancing the internal phase accumulator.
    #[inline]
    pub fn process(&mut self, i: f32, q: f32) -> (f32, f32) {
        let (sin_p, cos_p) = (sinf(self.phase), cosf(self.phase));
        // Multiply (i + jq) by e^{-j*phase} = cos(phase) - j*sin(phase).
        let out_i = i * cos_p + q * sin_p;
        let out_q = q * cos_p - i * sin_p;

        self.phase += self.phase_increment;
        if self.phase > core::f32::consts::PI {
            self.phase -= TAU;
        } else if self.phase < -core::f32::consts::PI {
            self.phase += TAU;
        }

        (out_i, out_q)
    }

    /// Mix a whole block of I/Q samples in place.
    pub fn process_in_place(&mut self, i: &mut [f32], q: &mut [f32]) {
        debug_assert_eq!(i.len(), q.len());
        for (si, sq) in i.iter_mut().zip(q.iter_mut()) {
            let (oi, oq) = self.process(*si, *sq);
            *si = oi;
            *sq = oq;
        }
    }

    /// Reset the phase accumulator to zero. Does not change the configured
    /// offset.
    pub fn reset_phase(&mut self) {
        self.phase = 0.0;
    }
}
