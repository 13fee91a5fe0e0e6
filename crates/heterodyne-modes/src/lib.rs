//! Heterodyne Modes - demodulation pipelines built on heterodyne-core
//!
//! This crate turns a stream of tuned I/Q blocks into demodulated audio for
//! each supported reception mode:
//!
//! - [`WbfmPipeline`] - wideband (broadcast) FM, with 19kHz pilot stereo and de-emphasis
//! - [`NbfmPipeline`] - narrowband FM, for two-way radio voice channels
//! - [`AmPipeline`] - amplitude modulation envelope detection
//! - [`SsbPipeline`] - upper/lower sideband phasing-method demodulation
//! - [`CwPipeline`] - continuous-wave (Morse) beat-frequency reception
//!
//! Each pipeline implements the shared [`Pipeline`] trait so a controller can
//! hold one boxed pipeline per active mode and switch between them without
//! caring which mode is live. [`ModeParams`] is the tagged union of every
//! mode's parameter set used to reconfigure a pipeline in place.
//!
//! ## Example
//!
//! ```rust,ignore
//! use heterodyne_modes::{Pipeline, WbfmPipeline, WbfmParams};
//!
//! let mut fm = WbfmPipeline::new(960_000.0, 48_000.0, WbfmParams::new());
//! let audio = fm.process(&iq_block);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod am;
pub mod cw;
pub mod nbfm;
pub mod params;
pub mod pipeline;
pub mod ssb;
pub mod wbfm;

// Re-export main types at crate root
pub use am::AmPipeline;
pub use cw::CwPipeline;
pub use nbfm::NbfmPipeline;
pub use params::{AmParams, CwParams, ModeParams, NbfmParams, SsbParams, WbfmParams};
pub use pipeline::Pipeline;
pub use ssb::SsbPipeline;
pub use wbfm::WbfmPipeline;
