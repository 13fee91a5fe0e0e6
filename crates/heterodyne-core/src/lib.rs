//! Heterodyne Core - DSP primitives for the SDR demodulation pipeline
//!
//! This crate provides the foundational signal-processing building blocks
//! used to turn raw tuner I/Q samples into demodulated audio, designed for
//! real-time processing with zero allocation in the hot path.
//!
//! # Core Abstractions
//!
//! ## Sample Types
//!
//! - [`RawIqBlock`] - interleaved unsigned-byte I/Q straight from a tuner
//! - [`IqBlock`] - normalised float I/Q
//! - [`AudioBlock`] - demodulated stereo (or mono-duplicated) audio
//!
//! ## Filtering and Mixing
//!
//! - [`FirFilter`] - direct-form FIR filter for channel selection
//! - [`windowed_sinc_lowpass`], [`hamming_window`], [`blackman_window`] - coefficient generators
//! - [`FrequencyShifter`] - NCO-based complex frequency translation
//! - [`RealDownsampler`] / [`ComplexDownsampler`] - nearest-sample rate reduction
//!
//! ## Demodulators
//!
//! - [`FmDiscriminator`] - product-conjugate FM discriminator
//! - [`AmEnvelopeDetector`] - AM envelope detection with DC removal
//! - [`SsbDemodulator`] - phasing-method SSB/CW demodulator
//! - [`StereoSeparator`] - 19kHz pilot PLL and L/R decode for FM stereo
//!
//! ## Post-processing
//!
//! - [`DeEmphasis`] - de-emphasis filter for broadcast FM
//! - [`Agc`] - automatic gain control
//! - [`DcBlocker`] - general-purpose one-pole DC blocker
//! - [`OnePole`] - the one-pole lowpass these all build on
//!
//! ## Utilities
//!
//! - [`BufferPool`] / [`BytePool`] / [`RingBuffer`] - allocation recycling
//! - Level/metering helpers: [`db_to_linear`], [`linear_to_db`], [`mean_power`], [`estimate_snr`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible for embedded receivers. Disable the
//! default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! heterodyne-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: no allocations in the per-sample processing path
//! - **No dependency on std**: pure `no_std` with `libm` for transcendentals
//! - **Composable primitives**: each demodulator is built from the same
//!   small set of filters, so adding a mode means assembling existing
//!   pieces rather than writing new DSP math

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod agc;
pub mod am;
pub mod coeffs;
pub mod dc_blocker;
pub mod deemphasis;
pub mod discriminator;
pub mod downsample;
pub mod fir;
pub mod math;
pub mod mixer;
pub mod one_pole;
pub mod pool;
pub mod power;
pub mod sample;
pub mod ssb;
pub mod stereo;

// Re-export main types at crate root
pub use agc::Agc;
pub use am::AmEnvelopeDetector;
pub use coeffs::{blackman_window, hamming_window, windowed_sinc_lowpass};
pub use dc_blocker::DcBlocker;
pub use deemphasis::{DeEmphasis, TAU_50_US, TAU_75_US};
pub use discriminator::FmDiscriminator;
pub use downsample::{ComplexDownsampler, RealDownsampler};
pub use fir::FirFilter;
pub use math::{clamp, db_to_linear, flush_denormal, lerp, linear_to_db};
pub use mixer::FrequencyShifter;
pub use one_pole::OnePole;
pub use pool::{BufferPool, BytePool, RingBuffer};
pub use power::{estimate_snr, mean_power, mean_power_complex, mean_power_db};
pub use sample::{AudioBlock, IqBlock, RawIqBlock};
pub use ssb::{Sideband, SsbDemodulator};
pub use stereo::StereoSeparator;
