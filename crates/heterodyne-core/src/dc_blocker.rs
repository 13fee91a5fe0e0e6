//! DC blocking filter, used to remove the offset left by AM envelope detection.
//!
//! First-order highpass (Julius O. Smith's DC blocker). Transfer function:
//!
//! ```text
//! H(z) = (1 - z^-1) / (1 - R * z^-1)
//! ```
//!
//! where `R` is a coefficient close to 1.0 controlling the cutoff. The AM
//! envelope detector (§4.5) uses this internally with a corner near 20 Hz;
//! other call sites may choose their own corner via [`DcBlocker::with_cutoff`].
//!
//! Reference: Julius O. Smith, "Introduction to Digital Filters with Audio
//! Applications", Chapter on DC Blocker.

use core::f32::consts::PI;

/// DC blocking filter using a first-order highpass.
pub struct DcBlocker {
    /// R coefficient (pole position, controls cutoff frequency).
    coeff: f32,
    /// Previous input sample x\[n-1\].
    x_prev: f32,
    /// Previous output sample y\[n-1\].
    y_prev: f32,
}

impl DcBlocker {
    /// Default cutoff frequency target in Hz.
    const DEFAULT_CUTOFF_HZ: f32 = 20.0;

    /// Create a new DC blocker with the default ~20 Hz corner.
    pub fn new(sample_rate: f32) -> Self {
        Self::with_cutoff(sample_rate, Self::DEFAULT_CUTOFF_HZ)
    }

    /// Create a new DC blocker targeting a specific corner frequency.
    pub fn with_cutoff(sample_rate: f32, cutoff_hz: f32) -> Self {
        Self {
            coeff: Self::calculate_coeff(cutoff_hz, sample_rate),
            x_prev: 0.0,
            y_prev: 0.0,
        }
    }

    /// Create a new DC blocker with a specific R coefficient directly.
    ///
    /// Values are clamped to `[0.9, 0.9999]`.
    pub fn with_coeff(coeff: f32) -> Self {
        Self {
            coeff: coeff.clamp(0.9, 0.9999),
            x_prev: 0.0,
            y_prev: 0.0,
        }
    }

    /// Process a single sample: `y[n] = x[n] - x[n-1] + R * y[n-1]`.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = input - self.x_prev + self.coeff * self.y_prev;
        self.x_prev = input;
        self.y_prev = output;
        output
    }

    /// Reset the filter state to zero.
    pub fn reset(&mut self) {
        self.x_prev = 0.0;
        self.y_prev = 0.0;
    }

    /// Update the sample rate, recalculating the coefficient to maintain the
    /// default ~20 Hz corner.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.coeff = Self::calculate_coeff(Self::DEFAULT_CUTOFF_HZ, sample_rate);
    }

    /// Current R coefficient.
    pub fn coeff(&self) -> f32 {
        self.coeff
    }

    /// `R = 1 - 2*pi*fc/fs`, clamped to `[0.9, 0.9999]` for stability.
    fn calculate_coeff(cutoff_hz: f32, sample_rate: f32) -> f32 {
        let r = 1.0 - (2.0 * PI * cutoff_hz / sample_rate);
        r.clamp(0.9, 0.9999)
    }
}
