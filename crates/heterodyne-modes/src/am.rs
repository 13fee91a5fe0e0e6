//! AM pipeline (spec.md §4.13).
//!
//! Signal flow: channel-select FIR (corner = `bandwidth_hz/2`) → decimate to
//! audio rate → envelope detect → optional AGC.

use crate::params::{AmParams, ModeParams};
use crate::pipeline::Pipeline;
use heterodyne_core::{
    Agc, AmEnvelopeDetector, AudioBlock, ComplexDownsampler, FirFilter, IqBlock,
    windowed_sinc_lowpass,
};

const CHANNEL_TAPS: usize = 65;

/// AM demodulation pipeline.
pub struct AmPipeline {
    rf_rate: f32,
    audio_rate: f32,
    filter_i: FirFilter,
    filter_q: FirFilter,
    downsampler: ComplexDownsampler,
    detector: AmEnvelopeDetector,
    agc: Agc,
    params: AmParams,
}

impl AmPipeline {
    /// Create a new pipeline for the given tuner and audio-device rates.
    pub fn new(rf_rate: f32, audio_rate: f32, params: AmParams) -> Self {
        let coeffs = windowed_sinc_lowpass(params.bandwidth_hz / 2.0, rf_rate, CHANNEL_TAPS);
        Self {
            rf_rate,
            audio_rate,
            filter_i: FirFilter::new(coeffs.clone()),
            filter_q: FirFilter::new(coeffs),
            downsampler: ComplexDownsampler::new(rf_rate, audio_rate),
            detector: AmEnvelopeDetector::new(audio_rate),
            agc: Agc::new(audio_rate, 0.5, 0.005, 0.3),
            params,
        }
    }

    /// Current parameters.
    pub fn params(&self) -> AmParams {
        self.params
    }

    /// Update parameters. Changing `bandwidth_hz` rebuilds the
    /// channel-select filter.
    pub fn set_params(&mut self, params: AmParams) {
        if (params.bandwidth_hz - self.params.bandwidth_hz).abs() > f32::EPSILON {
            let coeffs = windowed_sinc_lowpass(params.bandwidth_hz / 2.0, self.rf_rate, CHANNEL_TAPS);
            self.filter_i.set_coefficients(coeffs.clone());
            self.filter_q.set_coefficients(coeffs);
        }
        self.params = params;
    }
}

impl Pipeline for AmPipeline {
    fn process(&mut self, iq: &IqBlock) -> AudioBlock {
        let total_power = heterodyne_core::mean_power_complex(&iq.i, &iq.q);

        let mut fi: Vec<f32> = iq.i.clone();
        let mut fq: Vec<f32> = iq.q.clone();
        self.filter_i.process_in_place(&mut fi);
        self.filter_q.process_in_place(&mut fq);

        let (di, dq) = self.downsampler.process(&fi, &fq);
        let filtered_power = heterodyne_core::mean_power_complex(&di, &dq);
        let snr = heterodyne_core::estimate_snr(
            filtered_power * self.audio_rate / self.params.bandwidth_hz,
            total_power,
        );

        let mut audio_samples = self.detector.process_block(&di, &dq);
        if self.params.agc_enabled {
            self.agc.process_in_place(&mut audio_samples);
        }

        AudioBlock::mono(audio_samples, snr)
    }

    fn reset(&mut self) {
        self.filter_i.reset();
        self.filter_q.reset();
        self.downsampler.reset();
        self.detector.reset();
        self.agc.reset();
    }

    fn set_rates(&mut self, rf_rate: f32, audio_rate: f32) {
        *self = Self::new(rf_rate, audio_rate, self.params);
    }

    fn audio_rate(&self) -> f32 {
        self.audio_rate
    }

    fn set_mode_params(&mut self, params: &ModeParams) {
        if let ModeParams::Am(p) = params {
            self.set_params(*p);
        }
    }

    fn mode_params(&self) -> ModeParams {
        ModeParams::Am(self.params)
    }
}
