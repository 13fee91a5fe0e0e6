//! Automatic gain control (spec.md §4.11).
//!
//! Tracks a running envelope of the audio signal with independent attack
//! and decay one-pole smoothers (fast attack to clamp peaks quickly, slow
//! decay so gain doesn't pump between syllables/words) and computes a gain
//! that drives the envelope toward a target level.

/// Per-sample automatic gain control.
pub struct Agc {
    target_level: f32,
    attack_coeff: f32,
    decay_coeff: f32,
    envelope: f32,
    gain: f32,
    max_gain: f32,
    min_gain: f32,
}

impl Agc {
    /// Create an AGC targeting `target_level` (linear amplitude, typically
    /// around 0.5-0.7), with attack/decay times in seconds.
    pub fn new(sample_rate: f32, target_level: f32, attack_seconds: f32, decay_seconds: f32) -> Self {
        Self {
            target_level,
            attack_coeff: libm::expf(-1.0 / (attack_seconds * sample_rate)),
            decay_coeff: libm::expf(-1.0 / (decay_seconds * sample_rate)),
            envelope: 0.0,
            gain: 1.0,
            max_gain: 100.0,
            min_gain: 0.01,
        }
    }

    /// Clamp the gain range applied to the signal. Defaults to `[0.01, 100.0]`.
    pub fn set_gain_limits(&mut self, min_gain: f32, max_gain: f32) {
        self.min_gain = min_gain;
        self.max_gain = max_gain;
    }

    /// Process one sample, returning the gain-adjusted output.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let rectified = input.abs();
        let coeff = if rectified > self.envelope {
            self.attack_coeff
        } else {
            self.decay_coeff
        };
        self.envelope = rectified + coeff * (self.envelope - rectified);

        if self.envelope > 1e-6 {
            let desired_gain = self.target_level / self.envelope;
            self.gain = desired_gain.clamp(self.min_gain, self.max_gain);
        }

        crate::math::flush_denormal(input * self.gain)
    }

    /// Process a whole block in place.
    pub fn process_in_place(&mut self, block: &mut [f32]) {
        for sample in block.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Current applied gain.
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Current tracked envelope level.
    pub fn envelope(&self) -> f32 {
        self.envelope
    }

    /// Reset envelope and gain to their initial state.
    pub fn reset(&mut self) {
        self.envelope = 0.0;
        self.gain = 1.0;
    }

    /// Update the target output level.
    pub fn set_target_level(&mut self, target_level: f32) {
        self.target_level = target_level;
    }
}
