//! Signal power metering and SNR estimation (spec.md §4.4, §4.15).
//!
//! Used by the squelch gate to decide whether a channel is active, and by
//! the controller to report a live SNR figure alongside demodulated audio.

use crate::math::linear_to_db;

/// Mean power of a block of real samples: `sum(x^2) / n`.
pub fn mean_power(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = samples.iter().map(|&s| s * s).sum();
    sum_sq / samples.len() as f32
}

/// Mean power of a block of complex (I/Q) samples: `sum(i^2 + q^2) / n`.
pub fn mean_power_complex(i: &[f32], q: &[f32]) -> f32 {
    debug_assert_eq!(i.len(), q.len());
    if i.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = i.iter().zip(q.iter()).map(|(&si, &sq)| si * si + sq * sq).sum();
    sum_sq / i.len() as f32
}

/// Mean power expressed in dB (`10*log10(power)`, floored to avoid `-inf`).
pub fn mean_power_db(samples: &[f32]) -> f32 {
    // linear_to_db expects an amplitude ratio (20*log10); power is an
    // energy ratio (10*log10), so take the square root first.
    linear_to_db(mean_power(samples).sqrt())
}

/// Rough linear SNR estimate: ratio of signal power to a supplied noise
/// floor estimate, floored at a small epsilon to avoid division by zero.
pub fn estimate_snr(signal_power: f32, noise_floor: f32) -> f32 {
    signal_power / noise_floor.max(1e-12)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_power_of_unit_dc_is_one() {
        let samples = vec![1.0; 1000];
        assert!((mean_power(&samples) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn mean_power_of_silence_is_zero() {
        let samples = vec![0.0; 1000];
        assert_eq!(mean_power(&samples), 0.0);
    }

    #[test]
    fn mean_power_complex_matches_scalar_case() {
        let i = vec![1.0; 100];
        let q = vec![0.0; 100];
        assert!((mean_power_complex(&i, &q) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn empty_block_has_zero_power() {
        assert_eq!(mean_power(&[]), 0.0);
        assert_eq!(mean_power_complex(&[], &[]), 0.0);
    }

    #[test]
    fn snr_increases_with_signal_power() {
        let low = estimate_snr(0.1, 0.01);
        let high = estimate_snr(1.0, 0.01);
        assert!(high > low);
    }

    #[test]
    fn snr_does_not_divide_by_zero() {
        let snr = estimate_snr(1.0, 0.0);
        assert!(snr.is_finite());
    }
}
