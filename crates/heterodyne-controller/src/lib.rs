//! Demodulation controller for the heterodyne SDR core (spec.md §4.16, §6.3).
//!
//! Wires a [`heterodyne_registry`] pipeline to a frequency offset, a squelch
//! tail-hold gate, and an observer list for stereo-status and radio-state
//! notifications, matching the "uniform UI-facing API" the rest of the
//! system talks to regardless of which mode is active.

pub mod controller;
pub mod error;
pub mod events;
pub mod squelch;

pub use controller::DemodController;
pub use error::ControllerError;
pub use events::{ControllerObserver, RadioState, SampleClicker, SampleClick, StereoStatus};
pub use squelch::SquelchGate;
