//! CW (Morse) pipeline (spec.md §4.15).
//!
//! The keyed carrier sits at (or near) baseband after tuning, so a narrow
//! channel filter (corner = `bandwidth_hz/2`) first isolates it from
//! neighbouring noise, then a fixed-frequency beat-frequency-oscillator mix
//! shifts it up to an audible pitch. The phasing-method demodulator then
//! recovers a single sideband of that beat, turning the on/off keyed carrier
//! into a clean audible tone rather than a tone plus its mirror image. CW
//! has no squelch (spec.md §4.16): it always passes through.

use crate::params::{CwParams, ModeParams};
use crate::pipeline::Pipeline;
use heterodyne_core::{
    Agc, AudioBlock, ComplexDownsampler, FirFilter, FrequencyShifter, IqBlock, SsbDemodulator,
    windowed_sinc_lowpass,
};

const CHANNEL_TAPS: usize = 129;

/// CW demodulation pipeline.
pub struct CwPipeline {
    rf_rate: f32,
    audio_rate: f32,
    mixer: FrequencyShifter,
    filter_i: FirFilter,
    filter_q: FirFilter,
    downsampler: ComplexDownsampler,
    demodulator: SsbDemodulator,
    agc: Agc,
    params: CwParams,
}

impl CwPipeline {
    /// Create a new pipeline for the given tuner and audio-device rates.
    pub fn new(rf_rate: f32, audio_rate: f32, params: CwParams) -> Self {
        let mut mixer = FrequencyShifter::new(rf_rate);
        mixer.set_offset(params.tone_hz);
        let coeffs = windowed_sinc_lowpass(params.bandwidth_hz / 2.0, rf_rate, CHANNEL_TAPS);
        Self {
            rf_rate,
            audio_rate,
            mixer,
            filter_i: FirFilter::new(coeffs.clone()),
            filter_q: FirFilter::new(coeffs),
            downsampler: ComplexDownsampler::new(rf_rate, audio_rate),
            demodulator: SsbDemodulator::new(params.sideband),
            agc: Agc::new(audio_rate, 0.4, 0.002, 0.2),
            params,
        }
    }

    /// Current parameters.
    pub fn params(&self) -> CwParams {
        self.params
    }

    /// Update parameters, retuning the beat-frequency mixer, sideband,
    /// and/or channel-select filter as needed.
    pub fn set_params(&mut self, params: CwParams) {
        if (params.tone_hz - self.params.tone_hz).abs() > f32::EPSILON {
            self.mixer.set_offset(params.tone_hz);
        }
        if params.sideband != self.params.sideband {
            self.demodulator.set_sideband(params.sideband);
        }
        if (params.bandwidth_hz - self.params.bandwidth_hz).abs() > f32::EPSILON {
            let coeffs = windowed_sinc_lowpass(params.bandwidth_hz / 2.0, self.rf_rate, CHANNEL_TAPS);
            self.filter_i.set_coefficients(coeffs.clone());
            self.filter_q.set_coefficients(coeffs);
        }
        self.params = params;
    }
}

impl Pipeline for CwPipeline {
    fn process(&mut self, iq: &IqBlock) -> AudioBlock {
        let total_power = heterodyne_core::mean_power_complex(&iq.i, &iq.q);

        let mut fi: Vec<f32> = iq.i.clone();
        let mut fq: Vec<f32> = iq.q.clone();
        self.filter_i.process_in_place(&mut fi);
        self.filter_q.process_in_place(&mut fq);
        self.mixer.process_in_place(&mut fi, &mut fq);

        let (di, dq) = self.downsampler.process(&fi, &fq);
        let filtered_power = heterodyne_core::mean_power_complex(&di, &dq);
        let snr = heterodyne_core::estimate_snr(
            filtered_power * self.audio_rate / self.params.bandwidth_hz,
            total_power,
        );

        let mut audio_samples = self.demodulator.process_block(&di, &dq);
        self.agc.process_in_place(&mut audio_samples);

        AudioBlock::mono(audio_samples, snr)
    }

    fn reset(&mut self) {
        self.mixer.reset_phase();
        self.filter_i.reset();
        self.filter_q.reset();
        self.downsampler.reset();
        self.demodulator.reset();
        self.agc.reset();
    }

    fn set_rates(&mut self, rf_rate: f32, audio_rate: f32) {
        *self = Self::new(rf_rate, audio_rate, self.params);
    }

    fn audio_rate(&self) -> f32 {
        self.audio_rate
    }

    fn set_mode_params(&mut self, params: &ModeParams) {
        if let ModeParams::Cw(p) = params {
            self.set_params(*p);
        }
    }

    fn mode_params(&self) -> ModeParams {
        ModeParams::Cw(self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyed_carrier_iq(rf_rate: f32, n: usize) -> IqBlock {
        // Unmodulated carrier sitting at baseband (DC) — simulates the
        // suppressed-carrier convention used for CW reception.
        let i = vec![0.3; n];
        let q = vec![0.0; n];
        IqBlock::new(i, q, 14_050_000.0)
    }

    #[test]
    fn produces_finite_tone_audio() {
        let mut pipeline = CwPipeline::new(48_000.0, 48000.0, CwParams::new());
        let iq = keyed_carrier_iq(48_000.0, 4800);
        let audio = pipeline.process(&iq);
        assert!(!audio.stereo);
        assert!(audio.left.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn set_params_retunes_beat_frequency() {
        let mut pipeline = CwPipeline::new(48_000.0, 48000.0, CwParams::new());
        let mut params = pipeline.params();
        params.set_tone_hz(900.0);
        pipeline.set_params(params);
        assert_eq!(pipeline.params().tone_hz, 900.0);
    }

    #[test]
    fn has_no_squelch_threshold() {
        let pipeline = CwPipeline::new(48_000.0, 48000.0, CwParams::new());
        assert_eq!(pipeline.mode_params().squelch(), None);
    }

    #[test]
    fn set_params_rebuilds_channel_filter_on_bandwidth_change() {
        let mut pipeline = CwPipeline::new(48_000.0, 48000.0, CwParams::new());
        let mut params = pipeline.params();
        params.set_bandwidth(50.0);
        pipeline.set_params(params);
        assert_eq!(pipeline.params().bandwidth_hz, 50.0);
    }
}
