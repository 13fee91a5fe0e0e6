//! Demodulation controller (spec.md §4.16): owns the active pipeline,
//! applies the frequency offset and squelch gate, and notifies observers.

use heterodyne_core::{FrequencyShifter, IqBlock};
use heterodyne_modes::{ModeParams, Pipeline};
use heterodyne_registry::{create_pipeline, SchemeTag};

use crate::error::ControllerError;
use crate::events::{ControllerObserver, RadioState, StereoStatus};
use crate::squelch::SquelchGate;
use heterodyne_io::{AudioSink, DeviceError};

/// A deferred `(expected_centre_hz, pending_offset_hz)` pair, applied the
/// first time a received block's frequency matches (spec.md §4.16
/// `expect_frequency_and_set_offset`).
struct PendingOffset {
    expected_centre_hz: f64,
    offset_hz: f32,
}

/// Owns the active demodulation pipeline and drives blocks from I/Q to
/// gated, observer-notified audio.
pub struct DemodController {
    rf_rate: f32,
    audio_rate: f32,
    scheme: SchemeTag,
    pipeline: Box<dyn Pipeline>,
    offset: FrequencyShifter,
    pending_offset: Option<PendingOffset>,
    squelch: SquelchGate,
    last_stereo: bool,
    observers: Vec<Box<dyn ControllerObserver>>,
}

/// Resolve a scheme by its UI-facing name, case-insensitively (spec.md §7
/// "UnknownScheme").
fn scheme_by_name(name: &str) -> Option<SchemeTag> {
    SchemeTag::ALL
        .into_iter()
        .find(|tag| tag.name().eq_ignore_ascii_case(name))
}

impl DemodController {
    /// Build a controller for `scheme`, running at `rf_rate` input and
    /// `audio_rate` output, with the scheme's default parameters.
    pub fn new(scheme: SchemeTag, rf_rate: f32, audio_rate: f32) -> Self {
        let pipeline = create_pipeline(scheme, rf_rate, audio_rate, scheme.default_params());
        Self {
            rf_rate,
            audio_rate,
            scheme,
            pipeline,
            offset: FrequencyShifter::new(rf_rate),
            pending_offset: None,
            squelch: SquelchGate::new(audio_rate),
            last_stereo: false,
            observers: Vec::new(),
        }
    }

    /// Register an observer for stereo-status and radio-state notifications.
    pub fn add_observer(&mut self, observer: Box<dyn ControllerObserver>) {
        self.observers.push(observer);
    }

    /// The scheme currently active.
    pub fn scheme(&self) -> SchemeTag {
        self.scheme
    }

    /// Switch to a scheme by name, e.g. from a CLI `--mode` flag. Returns
    /// [`ControllerError::UnknownScheme`] if no scheme matches.
    pub fn set_mode_by_name(&mut self, name: &str, params: ModeParams) -> Result<(), ControllerError> {
        let tag = scheme_by_name(name).ok_or_else(|| ControllerError::UnknownScheme(name.to_string()))?;
        self.set_mode(tag, params);
        Ok(())
    }

    /// Switch to `scheme`/`params` (spec.md §4.16 `set_mode`): if the scheme
    /// is unchanged, parameters are forwarded through the existing pipeline
    /// (which recomputes its own filter kernels as needed); otherwise a
    /// fresh pipeline replaces the old one.
    pub fn set_mode(&mut self, scheme: SchemeTag, params: ModeParams) {
        if scheme == self.scheme && scheme.accepts(&params) {
            self.pipeline.set_mode_params(&params);
            return;
        }
        tracing::info!(from = self.scheme.name(), to = scheme.name(), "switching demodulation scheme");
        self.scheme = scheme;
        self.pipeline = create_pipeline(scheme, self.rf_rate, self.audio_rate, params);
        self.squelch.set_sample_rate(self.audio_rate);
    }

    /// Set the baseband frequency offset immediately.
    pub fn set_frequency_offset(&mut self, offset_hz: f32) {
        self.offset.set_offset(offset_hz);
        self.pending_offset = None;
    }

    /// Store an offset to apply atomically once a block at `expected_centre_hz`
    /// arrives, so a simultaneous tuner retune and offset change never
    /// produces an audible glitch from a mismatched pairing.
    pub fn expect_frequency_and_set_offset(&mut self, expected_centre_hz: f64, offset_hz: f32) {
        self.pending_offset = Some(PendingOffset {
            expected_centre_hz,
            offset_hz,
        });
    }

    /// Replace the input (tuner) sample rate; forces pipeline reconstruction
    /// since filter kernels depend on it.
    pub fn set_sample_rate(&mut self, rf_rate: f32) {
        self.rf_rate = rf_rate;
        self.offset.set_sample_rate(rf_rate);
        self.pipeline.set_rates(rf_rate, self.audio_rate);
    }

    /// Demodulate one block, apply the squelch gate, and write it to `sink`,
    /// notifying observers of any stereo-status change (spec.md §4.16
    /// `receive`).
    pub fn receive<S: AudioSink>(&mut self, iq: &IqBlock, sink: &mut S) -> Result<(), ControllerError> {
        let audio = self.demodulate(iq);
        sink.play(&audio.left, &audio.right).map_err(|e| {
            tracing::warn!(error = %e, "audio sink rejected a block; pipeline stopping");
            for observer in &mut self.observers {
                observer.on_radio_state(RadioState::from(&e));
            }
            ControllerError::Sink(e)
        })
    }

    /// Apply the pending-offset transition, frequency offset, pipeline, and
    /// squelch gate to one I/Q block, without writing anywhere. Exposed so
    /// callers driving a [`heterodyne_io::StreamEngine`] can pass this
    /// straight in as the stream's `process` closure.
    pub fn demodulate(&mut self, iq: &IqBlock) -> heterodyne_core::AudioBlock {
        if let Some(pending) = &self.pending_offset {
            if iq.frequency_hz == pending.expected_centre_hz {
                self.offset.set_offset(pending.offset_hz);
                self.pending_offset = None;
            }
        }

        let mut i = iq.i.clone();
        let mut q = iq.q.clone();
        self.offset.process_in_place(&mut i, &mut q);
        let shifted = IqBlock::new(i, q, iq.frequency_hz);

        let mut audio = self.pipeline.process(&shifted);
        self.squelch.apply(&mut audio, self.pipeline.mode_params().squelch());

        if audio.stereo != self.last_stereo {
            self.last_stereo = audio.stereo;
            for observer in &mut self.observers {
                observer.on_stereo_status(StereoStatus(audio.stereo));
            }
        }

        audio
    }

    /// Reset all pipeline and offset state, as at channel change.
    pub fn reset(&mut self) {
        self.pipeline.reset();
        self.offset.reset_phase();
        self.pending_offset = None;
    }
}
