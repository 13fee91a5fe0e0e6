//! Wideband (broadcast) FM pipeline (spec.md §4.11).
//!
//! Signal flow: channel-select FIR → decimate to a pilot-resolving
//! intermediate rate → FM discriminate → 19kHz pilot PLL / stereo decode →
//! decimate to audio rate → de-emphasis per channel.

use crate::params::{ModeParams, WbfmParams};
use crate::pipeline::Pipeline;
use heterodyne_core::{
    AudioBlock, ComplexDownsampler, DeEmphasis, FirFilter, FmDiscriminator, IqBlock,
    RealDownsampler, StereoSeparator, windowed_sinc_lowpass,
};

/// Channel-select filter corner: half the 200kHz broadcast FM channel.
const CHANNEL_CUTOFF_HZ: f32 = 100_000.0;
const CHANNEL_TAPS: usize = 65;
/// Intermediate rate at which the pilot PLL and subcarrier decode run;
/// comfortably above twice the 38kHz subcarrier.
const INTERMEDIATE_RATE_HZ: f32 = 192_000.0;
/// Standard broadcast FM peak deviation.
const WBFM_MAX_DEVIATION_HZ: f32 = 75_000.0;
/// De-emphasis time constant. 75us is the North American/Korean convention;
/// not user-configurable, WBFM's only parameter is `stereo` (spec.md §3).
const DEFAULT_DEEMPHASIS_TAU_US: f32 = 75.0;

/// Fixed scale relating mean composite power to a linear SNR estimate.
///
/// Chosen so that full-quieting broadcast-strength signals (composite power
/// near unity) land well above typical squelch thresholds, while weak
/// signals near the noise floor fall below them; calibrated against the
/// receiver's own noise floor rather than a live noise-bandwidth estimate.
const WBFM_SNR_SCALE: f32 = 150_000.0;

/// Broadcast FM demodulation pipeline.
pub struct WbfmPipeline {
    rf_rate: f32,
    audio_rate: f32,
    intermediate_rate: f32,
    filter_i: FirFilter,
    filter_q: FirFilter,
    downsampler: ComplexDownsampler,
    discriminator: FmDiscriminator,
    stereo: StereoSeparator,
    audio_downsampler_l: RealDownsampler,
    audio_downsampler_r: RealDownsampler,
    deemphasis_l: DeEmphasis,
    deemphasis_r: DeEmphasis,
    params: WbfmParams,
}

impl WbfmPipeline {
    /// Create a new pipeline for the given tuner and audio-device rates.
    pub fn new(rf_rate: f32, audio_rate: f32, params: WbfmParams) -> Self {
        let intermediate_rate = INTERMEDIATE_RATE_HZ.min(rf_rate);
        let coeffs = windowed_sinc_lowpass(CHANNEL_CUTOFF_HZ, rf_rate, CHANNEL_TAPS);
        let tau = DEFAULT_DEEMPHASIS_TAU_US * 1e-6;
        Self {
            rf_rate,
            audio_rate,
            intermediate_rate,
            filter_i: FirFilter::new(coeffs.clone()),
            filter_q: FirFilter::new(coeffs),
            downsampler: ComplexDownsampler::new(rf_rate, intermediate_rate),
            discriminator: FmDiscriminator::new(WBFM_MAX_DEVIATION_HZ, intermediate_rate),
            stereo: StereoSeparator::new(intermediate_rate),
            audio_downsampler_l: RealDownsampler::new(intermediate_rate, audio_rate),
            audio_downsampler_r: RealDownsampler::new(intermediate_rate, audio_rate),
            deemphasis_l: DeEmphasis::new(audio_rate, tau),
            deemphasis_r: DeEmphasis::new(audio_rate, tau),
            params,
        }
    }

    /// Current parameters.
    pub fn params(&self) -> WbfmParams {
        self.params
    }

    /// Update parameters.
    pub fn set_params(&mut self, params: WbfmParams) {
        self.params = params;
    }

    /// Whether the stereo pilot is currently locked.
    pub fn stereo_locked(&self) -> bool {
        self.stereo.is_locked()
    }
}

impl Pipeline for WbfmPipeline {
    fn process(&mut self, iq: &IqBlock) -> AudioBlock {
        let mut fi: Vec<f32> = iq.i.clone();
        let mut fq: Vec<f32> = iq.q.clone();
        self.filter_i.process_in_place(&mut fi);
        self.filter_q.process_in_place(&mut fq);

        let (di, dq) = self.downsampler.process(&fi, &fq);
        let power = heterodyne_core::mean_power_complex(&di, &dq);
        let snr = heterodyne_core::estimate_snr(power * WBFM_SNR_SCALE, 1.0);

        let composite = self.discriminator.process_block(&di, &dq);

        let mut left = Vec::with_capacity(composite.len());
        let mut right = Vec::with_capacity(composite.len());
        for &sample in &composite {
            if self.params.stereo {
                let (l, r) = self.stereo.process(sample);
                left.push(l);
                right.push(r);
            } else {
                left.push(sample);
                right.push(sample);
            }
        }

        let mut out_l = self.audio_downsampler_l.process(&left);
        let mut out_r = self.audio_downsampler_r.process(&right);
        self.deemphasis_l.process_in_place(&mut out_l);
        self.deemphasis_r.process_in_place(&mut out_r);

        let stereo_active = self.params.stereo && self.stereo.is_locked();
        AudioBlock {
            left: out_l,
            right: out_r,
            stereo: stereo_active,
            snr,
        }
    }

    fn reset(&mut self) {
        self.filter_i.reset();
        self.filter_q.reset();
        self.downsampler.reset();
        self.discriminator.reset();
        self.stereo.reset();
        self.audio_downsampler_l.reset();
        self.audio_downsampler_r.reset();
        self.deemphasis_l.reset();
        self.deemphasis_r.reset();
    }

    fn set_rates(&mut self, rf_rate: f32, audio_rate: f32) {
        *self = Self::new(rf_rate, audio_rate, self.params);
    }

    fn audio_rate(&self) -> f32 {
        self.audio_rate
    }

    fn set_mode_params(&mut self, params: &ModeParams) {
        if let ModeParams::Wbfm(p) = params {
            self.set_params(*p);
        }
    }

    fn mode_params(&self) -> ModeParams {
        ModeParams::Wbfm(self.params)
    }
}
