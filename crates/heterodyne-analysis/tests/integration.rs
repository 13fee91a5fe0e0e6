//! Integration tests for heterodyne-analysis, exercising the public API
//! against synthetic signals with known spectral properties.

use std::f32::consts::PI;

use heterodyne_analysis::{fft_peak_bin, magnitude_spectrum, power_db, Fft, Window};

fn sine(freq_hz: f32, sample_rate: f32, num_samples: usize, amplitude: f32) -> Vec<f32> {
    (0..num_samples)
        .map(|i| amplitude * (2.0 * PI * freq_hz * i as f32 / sample_rate).sin())
        .collect()
}

#[test]
fn fft_forward_inverse_roundtrips() {
    let fft = Fft::new(512);
    let input = sine(1000.0, 48_000.0, 512, 0.8);
    let spectrum = fft.forward(&input);
    let reconstructed = fft.inverse(&spectrum);
    for (a, b) in input.iter().zip(reconstructed.iter()) {
        assert!((a - b).abs() < 0.02, "{} vs {}", a, b);
    }
}

#[test]
fn fft_peak_bin_tracks_multiple_tones() {
    let sample_rate = 48_000.0;
    for freq in [440.0, 1000.0, 5000.0, 12_000.0] {
        let signal = sine(freq, sample_rate, 8192, 0.7);
        let peak = fft_peak_bin(&signal, sample_rate);
        assert!((peak - freq).abs() < 20.0, "tone {freq} detected at {peak}");
    }
}

#[test]
fn power_db_ranks_amplitudes_correctly() {
    let loud = sine(1000.0, 48_000.0, 2048, 0.9);
    let quiet = sine(1000.0, 48_000.0, 2048, 0.1);
    assert!(power_db(&loud) > power_db(&quiet));
}

#[test]
fn hann_window_tapers_to_the_edges() {
    let mut buffer = vec![1.0f32; 256];
    Window::Hann.apply(&mut buffer);
    assert!(buffer[0] < 0.01);
    assert!(buffer[255] < 0.01);
    assert!(buffer[128] > 0.9);
}

#[test]
fn magnitude_spectrum_is_nonnegative() {
    let signal = sine(2000.0, 44_100.0, 1024, 0.5);
    let spectrum = magnitude_spectrum(&signal, 1024, Window::Hann);
    assert!(spectrum.iter().all(|&m| m >= 0.0));
}
