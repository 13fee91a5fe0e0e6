//! Squelch tail-hold gate (spec.md §4.16).
//!
//! The pipelines never mute their own output; they only ever report a live
//! linear `snr`. This gate is the single place squelch is enforced: once a
//! block has passed, a short run of weak blocks right after it is still let
//! through rather than chopped block-by-block, while `snr` is always
//! compared fresh so a strong block re-opens the gate immediately.

use heterodyne_core::AudioBlock;

/// Fraction of the audio sample rate held open after the last block that
/// cleared the threshold (spec.md §4.16: "0.1 · audioSampleRate").
const TAIL_SECONDS: f32 = 0.1;

/// Threshold-plus-hold squelch gate, one per active pipeline.
pub struct SquelchGate {
    audio_sample_rate: f32,
    tail_remaining: f32,
}

impl SquelchGate {
    /// Create a gate for a pipeline running at `audio_sample_rate`.
    pub fn new(audio_sample_rate: f32) -> Self {
        Self {
            audio_sample_rate,
            tail_remaining: 0.0,
        }
    }

    /// Update the audio rate (e.g. after a pipeline reconstruction); resets
    /// the tail counter since its old value no longer has a meaningful
    /// sample-count interpretation.
    pub fn set_sample_rate(&mut self, audio_sample_rate: f32) {
        self.audio_sample_rate = audio_sample_rate;
        self.tail_remaining = 0.0;
    }

    /// Apply the gate to `audio` in place, given the mode's configured
    /// squelch threshold (a linear SNR ratio). `None` means the mode has no
    /// squelch (WBFM, CW — spec.md §4.16): always pass, and keep the tail
    /// counter clear so a later squelched mode doesn't inherit stale state.
    pub fn apply(&mut self, audio: &mut AudioBlock, threshold: Option<f32>) {
        let Some(threshold) = threshold else {
            self.tail_remaining = 0.0;
            return;
        };
        if audio.snr > threshold {
            self.tail_remaining = TAIL_SECONDS * self.audio_sample_rate;
        } else if self.tail_remaining > 0.0 {
            self.tail_remaining -= audio.len() as f32;
        } else {
            audio.silence();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(snr: f32, len: usize) -> AudioBlock {
        AudioBlock::mono(vec![0.5; len], snr)
    }

    #[test]
    fn strong_block_passes_and_sets_tail() {
        let mut gate = SquelchGate::new(48_000.0);
        let mut audio = block(10.0, 480);
        gate.apply(&mut audio, Some(3.0));
        assert!(audio.left.iter().all(|&s| s != 0.0));
    }

    #[test]
    fn weak_block_is_muted_after_tail_elapses() {
        let mut gate = SquelchGate::new(4_800.0);
        let mut strong = block(10.0, 480);
        gate.apply(&mut strong, Some(3.0));

        // Tail is 0.1 * 4800 = 480 samples; the first weak block exactly
        // consumes it, so it still passes...
        let mut weak = block(0.1, 480);
        gate.apply(&mut weak, Some(3.0));
        assert!(weak.left.iter().all(|&s| s != 0.0));

        // ...and the next one, with no tail left, is muted.
        let mut weak2 = block(0.1, 480);
        gate.apply(&mut weak2, Some(3.0));
        assert!(weak2.left.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn strong_block_reopens_gate_immediately() {
        let mut gate = SquelchGate::new(4_800.0);
        let mut weak = block(0.1, 480);
        gate.apply(&mut weak, Some(3.0));
        assert!(weak.left.iter().all(|&s| s == 0.0));

        let mut strong = block(10.0, 480);
        gate.apply(&mut strong, Some(3.0));
        assert!(strong.left.iter().all(|&s| s != 0.0));
    }

    #[test]
    fn no_threshold_always_passes() {
        let mut gate = SquelchGate::new(48_000.0);
        let mut weak = block(0.0, 480);
        gate.apply(&mut weak, None);
        assert!(weak.left.iter().all(|&s| s != 0.0));
    }
}
