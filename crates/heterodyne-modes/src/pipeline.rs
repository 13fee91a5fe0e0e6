//! Common demodulation pipeline interface (spec.md §4 dependency order).
//!
//! Every mode pipeline takes normalised I/Q at the tuner's native rate and
//! produces demodulated audio at a fixed output rate, reporting a live
//! linear SNR alongside it. Squelch is not applied here: it is the
//! controller's job (spec.md §4.16), since the tail-hold window needs to
//! see every block's real SNR, not one some pipeline has already muted.

use crate::params::ModeParams;
use heterodyne_core::{AudioBlock, IqBlock};

/// A complete demodulation pipeline for one mode.
pub trait Pipeline {
    /// Demodulate one block of I/Q samples into audio.
    fn process(&mut self, iq: &IqBlock) -> AudioBlock;

    /// Reset all internal filter/PLL/AGC state, as at channel change.
    fn reset(&mut self);

    /// Update the input (tuner) and output (audio device) sample rates.
    fn set_rates(&mut self, rf_rate: f32, audio_rate: f32);

    /// Output audio sample rate this pipeline currently produces.
    fn audio_rate(&self) -> f32;

    /// Forward a parameter update for this pipeline's own mode. A mismatched
    /// variant (the caller's scheme changed along with the params) is
    /// silently ignored; callers that change scheme should construct a fresh
    /// pipeline via [`crate`]'s registry instead of calling this.
    fn set_mode_params(&mut self, params: &ModeParams);

    /// This pipeline's current parameters, wrapped in the matching
    /// [`ModeParams`] variant. Used by the controller to read the live
    /// squelch threshold without duplicating per-scheme state.
    fn mode_params(&self) -> ModeParams;
}
