//! Spectral analysis helpers for the heterodyne receiver core.
//!
//! Small enough to share between the `heterodyne-cli analyze` command and
//! the end-to-end property tests that assert "peak FFT bin at N Hz" and
//! "SNR > N" claims from spec.md §8, without either duplicating FFT
//! plumbing or dragging in a full offline-analysis toolkit.
//!
//! - [`fft`] - FFT wrapper with windowing functions
//! - [`spectrum`] - magnitude/phase spectra, peak-bin detection, power in dB

pub mod fft;
pub mod spectrum;

pub use fft::{Fft, Window};
pub use spectrum::{fft_peak_bin, magnitude_spectrum, phase_spectrum, power_db, spectral_centroid};
