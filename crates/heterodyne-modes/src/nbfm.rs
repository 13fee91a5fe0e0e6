//! Narrowband FM pipeline (spec.md §4.12), used for two-way radio and
//! similar voice channels.
//!
//! Signal flow: channel-select FIR (corner = `max_deviation_hz`) → decimate
//! directly to audio rate → FM discriminate → AGC. No stereo pilot, no
//! de-emphasis — narrowband voice channels are not pre-emphasized the way
//! broadcast FM is.

use crate::params::{ModeParams, NbfmParams};
use crate::pipeline::Pipeline;
use heterodyne_core::{
    Agc, AudioBlock, ComplexDownsampler, FirFilter, FmDiscriminator, IqBlock,
    windowed_sinc_lowpass,
};

const CHANNEL_TAPS: usize = 65;

/// Channel-select filter corner for a given peak deviation.
fn channel_cutoff_hz(max_deviation_hz: f32) -> f32 {
    max_deviation_hz
}

/// Narrowband FM demodulation pipeline.
pub struct NbfmPipeline {
    rf_rate: f32,
    audio_rate: f32,
    filter_i: FirFilter,
    filter_q: FirFilter,
    downsampler: ComplexDownsampler,
    discriminator: FmDiscriminator,
    agc: Agc,
    params: NbfmParams,
}

impl NbfmPipeline {
    /// Create a new pipeline for the given tuner and audio-device rates.
    pub fn new(rf_rate: f32, audio_rate: f32, params: NbfmParams) -> Self {
        let coeffs = windowed_sinc_lowpass(channel_cutoff_hz(params.max_deviation_hz), rf_rate, CHANNEL_TAPS);
        Self {
            rf_rate,
            audio_rate,
            filter_i: FirFilter::new(coeffs.clone()),
            filter_q: FirFilter::new(coeffs),
            downsampler: ComplexDownsampler::new(rf_rate, audio_rate),
            discriminator: FmDiscriminator::new(params.max_deviation_hz, audio_rate),
            agc: Agc::new(audio_rate, 0.5, 0.002, 0.2),
            params,
        }
    }

    /// Current parameters.
    pub fn params(&self) -> NbfmParams {
        self.params
    }

    /// Update parameters. Changing `max_deviation_hz` rebuilds the
    /// channel-select filter and retunes the discriminator.
    pub fn set_params(&mut self, params: NbfmParams) {
        if (params.max_deviation_hz - self.params.max_deviation_hz).abs() > f32::EPSILON {
            let coeffs = windowed_sinc_lowpass(channel_cutoff_hz(params.max_deviation_hz), self.rf_rate, CHANNEL_TAPS);
            self.filter_i.set_coefficients(coeffs.clone());
            self.filter_q.set_coefficients(coeffs);
            self.discriminator.set_max_deviation(params.max_deviation_hz, self.audio_rate);
        }
        self.params = params;
    }
}

impl Pipeline for NbfmPipeline {
    fn process(&mut self, iq: &IqBlock) -> AudioBlock {
        let total_power = heterodyne_core::mean_power_complex(&iq.i, &iq.q);

        let mut fi: Vec<f32> = iq.i.clone();
        let mut fq: Vec<f32> = iq.q.clone();
        self.filter_i.process_in_place(&mut fi);
        self.filter_q.process_in_place(&mut fq);

        let (di, dq) = self.downsampler.process(&fi, &fq);
        let filtered_power = heterodyne_core::mean_power_complex(&di, &dq);
        let signal_bandwidth_hz = 2.0 * self.params.max_deviation_hz;
        let snr = heterodyne_core::estimate_snr(
            filtered_power * self.audio_rate / signal_bandwidth_hz,
            total_power,
        );

        let mut audio_samples = self.discriminator.process_block(&di, &dq);
        self.agc.process_in_place(&mut audio_samples);

        AudioBlock::mono(audio_samples, snr)
    }

    fn reset(&mut self) {
        self.filter_i.reset();
        self.filter_q.reset();
        self.downsampler.reset();
        self.discriminator.reset();
        self.agc.reset();
    }

    fn set_rates(&mut self, rf_rate: f32, audio_rate: f32) {
        *self = Self::new(rf_rate, audio_rate, self.params);
    }

    fn audio_rate(&self) -> f32 {
        self.audio_rate
    }

    fn set_mode_params(&mut self, params: &ModeParams) {
        if let ModeParams::Nbfm(p) = params {
            self.set_params(*p);
        }
    }

    fn mode_params(&self) -> ModeParams {
        ModeParams::Nbfm(self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone_iq(rf_rate: f32, freq: f32, n: usize) -> IqBlock {
        let mut i = Vec::with_capacity(n);
        let mut q = Vec::with_capacity(n);
        for k in 0..n {
            let t = k as f32 / rf_rate;
            let phase = core::f32::consts::TAU * freq * t;
            i.push(0.5 * libm::cosf(phase));
            q.push(0.5 * libm::sinf(phase));
        }
        IqBlock::new(i, q, 446_000_000.0)
    }

    #[test]
    fn produces_finite_mono_audio() {
        let mut pipeline = NbfmPipeline::new(192_000.0, 48000.0, NbfmParams::new());
        let iq = tone_iq(192_000.0, 1000.0, 1920);
        let audio = pipeline.process(&iq);
        assert!(!audio.stereo);
        assert!(audio.left.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn strong_signal_reports_high_snr() {
        let mut pipeline = NbfmPipeline::new(192_000.0, 48000.0, NbfmParams::new());
        let iq = tone_iq(192_000.0, 1000.0, 1920);
        let audio = pipeline.process(&iq);
        assert!(audio.snr > 1.0);
    }

    #[test]
    fn weak_signal_reports_low_snr() {
        let mut pipeline = NbfmPipeline::new(192_000.0, 48000.0, NbfmParams::new());
        let mut iq = tone_iq(192_000.0, 1000.0, 1920);
        for (i, q) in iq.i.iter_mut().zip(iq.q.iter_mut()) {
            *i *= 0.0001;
            *q *= 0.0001;
        }
        let audio = pipeline.process(&iq);
        assert!(audio.snr < 1.0);
    }

    #[test]
    fn set_params_retunes_discriminator_and_filter() {
        let mut pipeline = NbfmPipeline::new(192_000.0, 48000.0, NbfmParams::new());
        let mut params = pipeline.params();
        params.set_max_deviation_hz(2_500.0);
        pipeline.set_params(params);
        assert_eq!(pipeline.params().max_deviation_hz, 2_500.0);
    }
}
