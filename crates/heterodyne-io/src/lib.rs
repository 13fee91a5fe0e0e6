//! Tuner and audio-sink contracts for the heterodyne receiver core, plus the
//! streaming engine that drives a pipeline against them (spec.md §4.17, §5,
//! §6.1, §6.2).
//!
//! This crate provides:
//!
//! - **Tuner abstraction**: [`Tuner`] and [`SimulatedTuner`] for deterministic
//!   synthetic sources, with an optional real-device backend behind the
//!   `cpal-backend` feature.
//! - **Source adapter**: [`SourceAdapter`] turns raw tuner reads into
//!   normalised [`heterodyne_core::IqBlock`]s via recycled buffer pools.
//! - **Audio sink**: [`AudioSink`] and [`RecordingSink`] for capturing
//!   demodulated audio in tests; [`CpalSink`] for real playback.
//! - **Streaming engine**: [`StreamEngine`] keeps two reads in flight and
//!   pumps each block through a processing closure into a sink.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use heterodyne_io::{SimulatedTuner, SourceAdapter, StreamEngine, RecordingSink};
//!
//! let adapter = SourceAdapter::new(tuner, 4);
//! let mut engine = StreamEngine::start(adapter, 960)?;
//! let mut sink = RecordingSink::new(48_000);
//! engine.pump(&mut sink, |block| pipeline.process(&block))?;
//! ```

pub mod adapter;
pub mod error;
pub mod recording_sink;
pub mod simulated_tuner;
pub mod sink;
pub mod stream;
pub mod tuner;

#[cfg(feature = "cpal-backend")]
pub mod cpal_backend;

pub use adapter::SourceAdapter;
pub use error::DeviceError;
pub use recording_sink::RecordingSink;
pub use simulated_tuner::{Generator, SimulatedTuner};
pub use sink::AudioSink;
pub use stream::StreamEngine;
pub use tuner::{DirectSampling, GainSetting, Tuner, DIRECT_SAMPLING_THRESHOLD_HZ};

#[cfg(feature = "cpal-backend")]
pub use cpal_backend::{list_output_devices, CpalSink};
