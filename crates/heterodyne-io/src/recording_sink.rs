//! In-memory audio sink for tests (spec.md §6.2 external collaborator).

use crate::error::DeviceError;
use crate::sink::AudioSink;

/// Captures every block passed to [`play`](AudioSink::play) for inspection,
/// rather than sending it to a real output device.
pub struct RecordingSink {
    sample_rate: u32,
    volume: f32,
    blocks: Vec<(Vec<f32>, Vec<f32>)>,
}

impl RecordingSink {
    /// Create a recording sink at the given sample rate.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            volume: 1.0,
            blocks: Vec::new(),
        }
    }

    /// Every block recorded so far, in play order.
    pub fn blocks(&self) -> &[(Vec<f32>, Vec<f32>)] {
        &self.blocks
    }

    /// Concatenate every recorded left channel into one buffer.
    pub fn left_samples(&self) -> Vec<f32> {
        self.blocks.iter().flat_map(|(l, _)| l.iter().copied()).collect()
    }

    /// Concatenate every recorded right channel into one buffer.
    pub fn right_samples(&self) -> Vec<f32> {
        self.blocks.iter().flat_map(|(_, r)| r.iter().copied()).collect()
    }

    /// Discard all recorded blocks.
    pub fn clear(&mut self) {
        self.blocks.clear();
    }
}

impl AudioSink for RecordingSink {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn play(&mut self, left: &[f32], right: &[f32]) -> Result<(), DeviceError> {
        debug_assert_eq!(left.len(), right.len());
        self.blocks.push((left.to_vec(), right.to_vec()));
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    fn volume(&self) -> f32 {
        self.volume
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_blocks_in_order() {
        let mut sink = RecordingSink::new(48_000);
        sink.play(&[0.1, 0.2], &[0.3, 0.4]).unwrap();
        sink.play(&[0.5], &[0.6]).unwrap();
        assert_eq!(sink.left_samples(), vec![0.1, 0.2, 0.5]);
        assert_eq!(sink.right_samples(), vec![0.3, 0.4, 0.6]);
    }

    #[test]
    fn volume_clamps() {
        let mut sink = RecordingSink::new(48_000);
        sink.set_volume(2.0);
        assert_eq!(sink.volume(), 1.0);
        sink.set_volume(-1.0);
        assert_eq!(sink.volume(), 0.0);
    }
}
