//! Enumerated scheme-tag dispatch for demodulation pipelines (spec.md §9
//! "Extensibility registry").
//!
//! The original design kept a process-wide mutable map from scheme tag to
//! constructor; here the set of schemes is closed and known at compile time,
//! so dispatch is a single match over [`SchemeTag`] rather than a runtime
//! registry. User-defined schemes, if ever needed, become an explicit
//! constructor argument on the controller rather than a global table.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(not(feature = "std"))]
use alloc::boxed::Box;

use heterodyne_core::Sideband;
use heterodyne_modes::{
    AmParams, AmPipeline, CwParams, CwPipeline, ModeParams, NbfmParams, NbfmPipeline, Pipeline,
    SsbParams, SsbPipeline, WbfmParams, WbfmPipeline,
};

/// One of the six supported demodulation schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemeTag {
    /// Wideband (broadcast) FM, with optional stereo.
    Wbfm,
    /// Narrowband FM, for two-way voice channels.
    Nbfm,
    /// Amplitude modulation.
    Am,
    /// Upper sideband, suppressed carrier.
    Usb,
    /// Lower sideband, suppressed carrier.
    Lsb,
    /// Continuous wave (Morse).
    Cw,
}

impl SchemeTag {
    /// All six scheme tags, in a stable UI-facing order.
    pub const ALL: [SchemeTag; 6] = [
        SchemeTag::Wbfm,
        SchemeTag::Nbfm,
        SchemeTag::Am,
        SchemeTag::Usb,
        SchemeTag::Lsb,
        SchemeTag::Cw,
    ];

    /// Short, UI-facing name.
    pub const fn name(&self) -> &'static str {
        match self {
            SchemeTag::Wbfm => "WBFM",
            SchemeTag::Nbfm => "NBFM",
            SchemeTag::Am => "AM",
            SchemeTag::Usb => "USB",
            SchemeTag::Lsb => "LSB",
            SchemeTag::Cw => "CW",
        }
    }

    /// One-line description for UI listings.
    pub const fn description(&self) -> &'static str {
        match self {
            SchemeTag::Wbfm => "Wideband FM broadcast, optional stereo",
            SchemeTag::Nbfm => "Narrowband FM, two-way voice",
            SchemeTag::Am => "Amplitude modulation",
            SchemeTag::Usb => "Upper sideband, suppressed carrier",
            SchemeTag::Lsb => "Lower sideband, suppressed carrier",
            SchemeTag::Cw => "Continuous wave (Morse) beat-frequency reception",
        }
    }

    /// Build the default parameter record for this scheme.
    pub fn default_params(&self) -> ModeParams {
        match self {
            SchemeTag::Wbfm => ModeParams::Wbfm(WbfmParams::new()),
            SchemeTag::Nbfm => ModeParams::Nbfm(NbfmParams::new()),
            SchemeTag::Am => ModeParams::Am(AmParams::new()),
            SchemeTag::Usb => ModeParams::Ssb(SsbParams::new(Sideband::Upper)),
            SchemeTag::Lsb => ModeParams::Ssb(SsbParams::new(Sideband::Lower)),
            SchemeTag::Cw => ModeParams::Cw(CwParams::new()),
        }
    }

    /// Whether `params` is a parameter record this scheme can run with.
    pub fn accepts(&self, params: &ModeParams) -> bool {
        matches!(
            (self, params),
            (SchemeTag::Wbfm, ModeParams::Wbfm(_))
                | (SchemeTag::Nbfm, ModeParams::Nbfm(_))
                | (SchemeTag::Am, ModeParams::Am(_))
                | (SchemeTag::Usb | SchemeTag::Lsb, ModeParams::Ssb(_))
                | (SchemeTag::Cw, ModeParams::Cw(_))
        )
    }
}

/// Construct a fresh boxed pipeline for `tag`, taking `params` if it matches
/// the scheme (falling back to the scheme's defaults otherwise — the
/// controller is expected to call [`SchemeTag::accepts`] first, but dispatch
/// must never panic on a stale parameter record from a prior scheme).
pub fn create_pipeline(
    tag: SchemeTag,
    rf_rate: f32,
    audio_rate: f32,
    params: ModeParams,
) -> Box<dyn Pipeline> {
    match (tag, params) {
        (SchemeTag::Wbfm, ModeParams::Wbfm(p)) => Box::new(WbfmPipeline::new(rf_rate, audio_rate, p)),
        (SchemeTag::Nbfm, ModeParams::Nbfm(p)) => Box::new(NbfmPipeline::new(rf_rate, audio_rate, p)),
        (SchemeTag::Am, ModeParams::Am(p)) => Box::new(AmPipeline::new(rf_rate, audio_rate, p)),
        (SchemeTag::Usb | SchemeTag::Lsb, ModeParams::Ssb(p)) => {
            Box::new(SsbPipeline::new(rf_rate, audio_rate, p))
        }
        (SchemeTag::Cw, ModeParams::Cw(p)) => Box::new(CwPipeline::new(rf_rate, audio_rate, p)),
        (tag, _) => create_pipeline(tag, rf_rate, audio_rate, tag.default_params()),
    }
}

/// Descriptor for UI-facing enumeration of the supported schemes.
#[derive(Debug, Clone, Copy)]
pub struct SchemeDescriptor {
    /// The scheme tag itself.
    pub tag: SchemeTag,
    /// Short, UI-facing name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
}

/// List every supported scheme with its UI-facing metadata.
pub fn all_schemes() -> [SchemeDescriptor; 6] {
    SchemeTag::ALL.map(|tag| SchemeDescriptor {
        tag,
        name: tag.name(),
        description: tag.description(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_scheme_builds_a_working_pipeline() {
        for tag in SchemeTag::ALL {
            let mut pipeline = create_pipeline(tag, 192_000.0, 48_000.0, tag.default_params());
            let iq = heterodyne_core::IqBlock::new(vec![0.0; 1920], vec![0.0; 1920], 100_000_000.0);
            let audio = pipeline.process(&iq);
            assert!(audio.left.iter().all(|s| s.is_finite()), "{} produced non-finite audio", tag.name());
        }
    }

    #[test]
    fn usb_and_lsb_both_accept_ssb_params() {
        let params = ModeParams::Ssb(SsbParams::new(Sideband::Upper));
        assert!(SchemeTag::Usb.accepts(&params));
        assert!(SchemeTag::Lsb.accepts(&params));
        assert!(!SchemeTag::Wbfm.accepts(&params));
    }

    #[test]
    fn dispatch_falls_back_on_mismatched_params() {
        let stale = ModeParams::Am(AmParams::new());
        let mut pipeline = create_pipeline(SchemeTag::Wbfm, 192_000.0, 48_000.0, stale);
        let iq = heterodyne_core::IqBlock::new(vec![0.0; 1920], vec![0.0; 1920], 100_000_000.0);
        let audio = pipeline.process(&iq);
        assert!(audio.left.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn all_schemes_have_distinct_names() {
        let descriptors = all_schemes();
        for (i, a) in descriptors.iter().enumerate() {
            for b in &descriptors[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }
}
