//! SSB pipeline (spec.md §4.14 USB/LSB).
//!
//! Signal flow: channel-select FIR (corner = `bandwidth_hz/2`) → decimate to
//! audio rate → phasing-method sideband recovery → AGC.

use crate::params::{ModeParams, SsbParams};
use crate::pipeline::Pipeline;
use heterodyne_core::{
    Agc, AudioBlock, ComplexDownsampler, FirFilter, IqBlock, SsbDemodulator, windowed_sinc_lowpass,
};

const CHANNEL_TAPS: usize = 65;

/// SSB demodulation pipeline.
pub struct SsbPipeline {
    rf_rate: f32,
    audio_rate: f32,
    filter_i: FirFilter,
    filter_q: FirFilter,
    downsampler: ComplexDownsampler,
    demodulator: SsbDemodulator,
    agc: Agc,
    params: SsbParams,
}

impl SsbPipeline {
    /// Create a new pipeline for the given tuner and audio-device rates.
    pub fn new(rf_rate: f32, audio_rate: f32, params: SsbParams) -> Self {
        let coeffs = windowed_sinc_lowpass(params.bandwidth_hz / 2.0, rf_rate, CHANNEL_TAPS);
        Self {
            rf_rate,
            audio_rate,
            filter_i: FirFilter::new(coeffs.clone()),
            filter_q: FirFilter::new(coeffs),
            downsampler: ComplexDownsampler::new(rf_rate, audio_rate),
            demodulator: SsbDemodulator::new(params.sideband),
            agc: Agc::new(audio_rate, 0.5, 0.005, 0.3),
            params,
        }
    }

    /// Current parameters.
    pub fn params(&self) -> SsbParams {
        self.params
    }

    /// Update parameters, switching the demodulator's sideband and/or
    /// rebuilding the channel-select filter as needed.
    pub fn set_params(&mut self, params: SsbParams) {
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

impl Pipeline for SsbPipeline {
    fn process(&mut self, iq: &IqBlock) -> AudioBlock {
        let total_power = heterodyne_core::mean_power_complex(&iq.i, &iq.q);

        let mut fi: Vec<f32> = iq.i.clone();
        let mut fq: Vec<f32> = iq.q.clone();
        self.filter_i.process_in_place(&mut fi);
        self.filter_q.process_in_place(&mut fq);

        let (di, dq) = self.downsampler.process(&fi, &fq);
        let filtered_power = heterodyne_core::mean_power_complex(&di, &dq);
        let snr = heterodyne_core::estimate_snr(
            filtered_power * self.audio_rate / (self.params.bandwidth_hz * 2.0),
            total_power,
        );

        let mut audio_samples = self.demodulator.process_block(&di, &dq);
        self.agc.process_in_place(&mut audio_samples);

        AudioBlock::mono(audio_samples, snr)
    }

    fn reset(&mut self) {
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
        if let ModeParams::Ssb(p) = params {
            self.set_params(*p);
        }
    }

    fn mode_params(&self) -> ModeParams {
        ModeParams::Ssb(self.params)
    }
}
