//! Rate reduction between pipeline stages (spec.md §4.3).
//!
//! The ratio between the tuner's native sample rate and a demodulator's
//! working rate is rarely an integer, so both downsamplers here use a
//! fractional phase accumulator and emit the **nearest** filtered sample to
//! each output instant rather than interpolating. Before that selection,
//! each downsampler runs its input through a low-pass kernel with corner
//! `out_rate / 2` so energy that would otherwise alias back into the
//! passband is suppressed ahead of decimation. When `out_rate == in_rate`
//! there is no aliasing risk and the filter is skipped entirely.

use crate::coeffs::windowed_sinc_lowpass;
use crate::fir::FirFilter;

/// Number of taps in the anti-alias kernel built into every downsampler.
const ANTIALIAS_TAPS: usize = 41;

/// Build the anti-alias low-pass kernel for a given rate pair, or an empty
/// (identity) filter when no decimation is actually happening.
fn antialias_coeffs(in_rate: f32, out_rate: f32) -> Vec<f32> {
    if in_rate > out_rate * (1.0 + 1e-6) {
        windowed_sinc_lowpass(out_rate / 2.0, in_rate, ANTIALIAS_TAPS)
    } else {
        Vec::new()
    }
}

/// Decimates a real sample stream from `in_rate` to `out_rate` (`out_rate <=
/// in_rate`), low-pass filtering (corner `out_rate/2`) ahead of
/// nearest-sample selection.
#[derive(Debug, Clone)]
pub struct RealDownsampler {
    ratio: f32,
    phase: f32,
    filter: FirFilter,
}

impl RealDownsampler {
    /// Create a downsampler for the given input/output rate pair.
    pub fn new(in_rate: f32, out_rate: f32) -> Self {
        assert!(out_rate > 0.0 && out_rate <= in_rate, "out_rate must be in (0, in_rate]");
        Self {
            ratio: in_rate / out_rate,
            phase: 0.0,
            filter: FirFilter::new(antialias_coeffs(in_rate, out_rate)),
        }
    }

    /// Update the input/output rate pair, resetting the fractional phase
    /// and recomputing the anti-alias kernel.
    pub fn set_rates(&mut self, in_rate: f32, out_rate: f32) {
        self.ratio = in_rate / out_rate;
        self.phase = 0.0;
        self.filter.set_coefficients(antialias_coeffs(in_rate, out_rate));
    }

    /// Feed one block of input samples, returning the decimated output.
    ///
    /// Consecutive calls carry the fractional phase (and filter history)
    /// across block boundaries, so the output is identical whether the
    /// input is fed in one block or split across many.
    pub fn process(&mut self, input: &[f32]) -> Vec<f32> {
        let mut out = Vec::with_capacity((input.len() as f32 / self.ratio).ceil() as usize);
        for &sample in input {
            let filtered = self.filter.process(sample);
            self.phase += 1.0;
            if self.phase >= self.ratio {
                self.phase -= self.ratio;
                out.push(filtered);
            }
        }
        out
    }

    /// Reset the fractional phase accumulator and filter history.
    pub fn reset(&mut self) {
        self.phase = 0.0;
        self.filter.reset();
    }
}

/// Decimates a complex (I/Q) sample stream: two parallel [`FirFilter`]s
/// sharing the same anti-alias kernel, followed by lockstep nearest-sample
/// selection.
#[derive(Debug, Clone)]
pub struct ComplexDownsampler {
    ratio: f32,
    phase: f32,
    filter_i: FirFilter,
    filter_q: FirFilter,
}

impl ComplexDownsampler {
    /// Create a downsampler for the given input/output rate pair.
    pub fn new(in_rate: f32, out_rate: f32) -> Self {
        assert!(out_rate > 0.0 && out_rate <= in_rate, "out_rate must be in (0, in_rate]");
        let coeffs = antialias_coeffs(in_rate, out_rate);
        Self {
            ratio: in_rate / out_rate,
            phase: 0.0,
            filter_i: FirFilter::new(coeffs.clone()),
            filter_q: FirFilter::new(coeffs),
        }
    }

    /// Update the input/output rate pair, resetting the fractional phase
    /// and recomputing the shared anti-alias kernel.
    pub fn set_rates(&mut self, in_rate: f32, out_rate: f32) {
        let coeffs = antialias_coeffs(in_rate, out_rate);
        self.ratio = in_rate / out_rate;
        self.phase = 0.0;
        self.filter_i.set_coefficients(coeffs.clone());
        self.filter_q.set_coefficients(coeffs);
    }

    /// Feed one block of I/Q input, returning the decimated `(i, q)` pair.
    ///
    /// `i` and `q` must have equal length; the same sample indices are
    /// kept for both channels so phase alignment between I and Q is
    /// preserved exactly.
    pub fn process(&mut self, i: &[f32], q: &[f32]) -> (Vec<f32>, Vec<f32>) {
        debug_assert_eq!(i.len(), q.len());
        let mut out_i = Vec::with_capacity((i.len() as f32 / self.ratio).ceil() as usize);
        let mut out_q = Vec::with_capacity(out_i.capacity());
        for (&si, &sq) in i.iter().zip(q.iter()) {
            let fi = self.filter_i.process(si);
            let fq = self.filter_q.process(sq);
            self.phase += 1.0;
            if self.phase >= self.ratio {
                self.phase -= self.ratio;
                out_i.push(fi);
                out_q.push(fq);
            }
        }
        (out_i, out_q)
    }

    /// Reset the fractional phase accumulator and both filters' history.
    pub fn reset(&mut self) {
        self.phase = 0.0;
        self.filter_i.reset();
        self.filter_q.reset();
    }
}
