//! Single-sideband demodulator (spec.md §4.7), also used directly for CW.
//!
//! Uses the phasing method: a broadband Hilbert transformer approximates a
//! 90-degree phase shift across the audio band on the quadrature branch,
//! and the in-phase branch is delayed to match the transformer's group
//! delay. Summing or differencing the two branches cancels one sideband's
//! image, leaving only the selected sideband.

use core::f32::consts::PI;

/// Which sideband to recover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sideband {
    /// Upper sideband (used for USB voice and CW above the carrier).
    Upper,
    /// Lower sideband.
    Lower,
}

/// Default number of taps for the internal Hilbert transformer. Odd, so the
/// filter has a well-defined integer group delay.
const HILBERT_TAPS: usize = 65;

/// Phasing-method SSB/CW demodulator.
pub struct SsbDemodulator {
    sideband: Sideband,
    hilbert_coeffs: Vec<f32>,
    hilbert_history: Vec<f32>,
    hilbert_pos: usize,
    delay_line: Vec<f32>,
    delay_pos: usize,
}

impl SsbDemodulator {
    /// Create a demodulator for the given sideband.
    pub fn new(sideband: Sideband) -> Self {
        let hilbert_coeffs = hilbert_kernel(HILBERT_TAPS);
        let delay = (HILBERT_TAPS - 1) / 2;
        Self {
            sideband,
            hilbert_coeffs,
            hilbert_history: vec![0.0; HILBERT_TAPS],
            hilbert_pos: 0,
            delay_line: vec![0.0; delay.max(1)],
            delay_pos: 0,
        }
    }

    /// Change which sideband is recovered. Does not reset filter state,
    /// since only the final combine sign depends on it.
    pub fn set_sideband(&mut self, sideband: Sideband) {
        self.sideband = sideband;
    }

    /// Demodulate one complex baseband sample.
    #[inline]
    pub fn process(&mut self, i: f32, q: f32) -> f32 {
        let shifted_q = self.hilbert_apply(q);
        let delayed_i = self.delay_apply(i);

        match self.sideband {
            Sideband::Upper => delayed_i - shifted_q,
            Sideband::Lower => delayed_i + shifted_q,
        }
    }

    /// Demodulate a whole block of complex samples.
    pub fn process_block(&mut self, i: &[f32], q: &[f32]) -> Vec<f32> {
        debug_assert_eq!(i.len(), q.len());
        i.iter().zip(q.iter()).map(|(&si, &sq)| self.process(si, sq)).collect()
    }

    /// Reset all internal filter/delay state.
    pub fn reset(&mut self) {
        self.hilbert_history.iter_mut().for_each(|s| *s = 0.0);
        self.hilbert_pos = 0;
        self.delay_line.iter_mut().for_each(|s| *s = 0.0);
        self.delay_pos = 0;
    }

    fn hilbert_apply(&mut self, input: f32) -> f32 {
        let n = self.hilbert_history.len();
        self.hilbert_history[self.hilbert_pos] = input;
        let mut acc = 0.0f32;
        for (k, &c) in self.hilbert_coeffs.iter().enumerate() {
            let idx = (self.hilbert_pos + n - k) % n;
            acc += c * self.hilbert_history[idx];
        }
        self.hilbert_pos = (self.hilbert_pos + 1) % n;
        acc
    }

    fn delay_apply(&mut self, input: f32) -> f32 {
        let n = self.delay_line.len();
        let out = self.delay_line[self.delay_pos];
        self.delay_line[self.delay_pos] = input;
        self.delay_pos = (self.delay_pos + 1) % n;
        out
    }
}

/// Generate a windowed, antisymmetric Hilbert-transformer kernel: zero at
/// even offsets from center, `2 / (pi * offset)` at odd offsets, tapered by
/// a Hamming window.
fn hilbert_kernel(taps: usize) -> Vec<f32> {
    assert!(taps % 2 == 1, "Hilbert kernel needs an odd tap count");
    let center = (taps - 1) as f32 / 2.0;
    let mut coeffs = vec![0.0f32; taps];
    for (n, c) in coeffs.iter_mut().enumerate() {
        let offset = n as f32 - center;
        if offset.abs() < 1e-6 {
            *c = 0.0;
        } else if (offset as i32).rem_euclid(2) == 0 {
            *c = 0.0;
        } else {
            let window = 0.54 - 0.46 * libm::cosf(2.0 * PI * n as f32 / (taps as f32 - 1.0));
            *c = (2.0 / (PI * offset)) * window;
        }
    }
    coeffs
}
