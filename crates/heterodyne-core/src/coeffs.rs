//! FIR coefficient generation: windowed-sinc lowpass kernels and the window
//! functions used to taper them (spec.md §4.1 "Coefficient generators").
//!
//! All generators return coefficients normalised to unity DC gain so a
//! filter built from them passes a constant signal at amplitude 1.0.

use core::f32::consts::PI;
use libm::{cosf, sinf};

/// Generate a windowed-sinc lowpass kernel.
///
/// `cutoff_hz` is the -6 dB corner, `sample_rate` the input sample rate,
/// `taps` the odd-preferred number of coefficients (an even count still
/// produces a valid, if slightly asymmetric, linear-phase filter).
///
/// The ideal (infinite) lowpass impulse response is a sinc function; a
/// Hamming window tapers it to finite length to control stopband ripple.
/// Coefficients are normalised so the DC gain is exactly 1.0.
pub fn windowed_sinc_lowpass(cutoff_hz: f32, sample_rate: f32, taps: usize) -> Vec<f32> {
    assert!(taps > 0, "filter must have at least one tap");
    let fc = (cutoff_hz / sample_rate).clamp(1e-6, 0.5 - 1e-6);
    let m = taps as f32 - 1.0;
    let window = hamming_window(taps);

    let mut coeffs = vec![0.0f32; taps];
    for n in 0..taps {
        let x = n as f32 - m / 2.0;
        let sinc = if x.abs() < 1e-7 {
            2.0 * fc
        } else {
            sinf(2.0 * PI * fc * x) / (PI * x)
        };
        coeffs[n] = sinc * window[n];
    }

    normalize_dc_gain(&mut coeffs);
    coeffs
}

/// Generate a Hamming window of the given length: `0.54 - 0.46*cos(2*pi*n/(N-1))`.
pub fn hamming_window(taps: usize) -> Vec<f32> {
    if taps == 1 {
        return vec![1.0];
    }
    let n_minus_1 = taps as f32 - 1.0;
    (0..taps)
        .map(|n| 0.54 - 0.46 * cosf(2.0 * PI * n as f32 / n_minus_1))
        .collect()
}

/// Generate a Blackman window of the given length:
/// `0.42 - 0.5*cos(2*pi*n/(N-1)) + 0.08*cos(4*pi*n/(N-1))`.
///
/// Deeper stopband attenuation than Hamming at the cost of a wider main
/// lobe (used where stopband rejection matters more than transition width).
pub fn blackman_window(taps: usize) -> Vec<f32> {
    if taps == 1 {
        return vec![1.0];
    }
    let n_minus_1 = taps as f32 - 1.0;
    (0..taps)
        .map(|n| {
            let phase = 2.0 * PI * n as f32 / n_minus_1;
            0.42 - 0.5 * cosf(phase) + 0.08 * cosf(2.0 * phase)
        })
        .collect()
}

/// Rescale `coeffs` in place so their sum (DC gain) is exactly 1.0.
fn normalize_dc_gain(coeffs: &mut [f32]) {
    let sum: f32 = coeffs.iter().sum();
    if sum.abs() > 1e-12 {
        let inv = 1.0 / sum;
        coeffs.iter_mut().for_each(|c| *c *= inv);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hamming_window_endpoints() {
        let w = hamming_window(5);
        assert_eq!(w.len(), 5);
        assert!((w[0] - 0.08).abs() < 0.01);
        assert!((w[2] - 1.0).abs() < 0.01, "center tap near 1.0, got {}", w[2]);
    }

    #[test]
    fn blackman_window_endpoints() {
        let w = blackman_window(5);
        assert!(w[0].abs() < 0.01);
        assert!((w[2] - 1.0).abs() < 0.01);
    }

    #[test]
    fn lowpass_has_unity_dc_gain() {
        let coeffs = windowed_sinc_lowpass(4000.0, 48000.0, 63);
        let sum: f32 = coeffs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-4, "DC gain should be 1.0, got {sum}");
    }

    #[test]
    fn lowpass_is_symmetric() {
        let coeffs = windowed_sinc_lowpass(4000.0, 48000.0, 63);
        for i in 0..coeffs.len() / 2 {
            assert!(
                (coeffs[i] - coeffs[coeffs.len() - 1 - i]).abs() < 1e-6,
                "linear-phase filter must be symmetric"
            );
        }
    }

    #[test]
    fn lowpass_attenuates_stopband() {
        // A filter with a low cutoff should strongly attenuate a tone well
        // above it when convolved directly (DFT-free sanity check via a
        // single-frequency correlation).
        let coeffs = windowed_sinc_lowpass(1000.0, 48000.0, 129);
        let sample_rate = 48000.0;
        let test_freq = 20_000.0; // well into the stopband
        let mut acc_re = 0.0f32;
        let mut acc_im = 0.0f32;
        for (n, &c) in coeffs.iter().enumerate() {
            let phase = 2.0 * PI * test_freq * n as f32 / sample_rate;
            acc_re += c * libm::cosf(phase);
            acc_im += c * sinf(phase);
        }
        let magnitude = (acc_re * acc_re + acc_im * acc_im).sqrt();
        assert!(
            magnitude < 0.1,
            "20kHz should be attenuated by a 1kHz lowpass, got magnitude {magnitude}"
        );
    }
}
