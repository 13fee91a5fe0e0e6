//! Scalar math utilities shared across the DSP primitives.
//!
//! Small, allocation-free helpers used by coefficient generation, level
//! metering, and denormal protection. All functions are `no_std` safe.
//!
//! # Level conversions
//!
//! - [`db_to_linear`] / [`linear_to_db`] convert between dB and linear
//!   amplitude ratios, used for the gain-emulation formula in the
//!   simulated source adapter and for reporting SNR.
//!
//! # Utilities
//!
//! - [`clamp`] / [`lerp`] - value limiting and linear interpolation
//! - [`flush_denormal`] - denormal protection for IIR feedback paths

use libm::{expf, logf};

/// Convert decibels to a linear amplitude ratio.
///
/// # Examples
/// ```rust
/// use heterodyne_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert a linear amplitude ratio to decibels.
///
/// Values at or below zero are clamped to a small floor before taking the
/// logarithm, so the result is always finite.
///
/// # Examples
/// ```rust
/// use heterodyne_core::linear_to_db;
///
/// assert!((linear_to_db(1.0) - 0.0).abs() < 0.001);
/// assert!((linear_to_db(0.5) - (-6.02)).abs() < 0.01);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Linear interpolation between `a` and `b` at position `t` (usually `[0, 1]`).
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Clamp `x` to the closed interval `[min, max]`.
#[inline]
pub fn clamp(x: f32, min: f32, max: f32) -> f32 {
    x.max(min).min(max)
}

/// Flush a value to zero if it is a denormal (subnormal) float.
///
/// IIR filters with feedback (de-emphasis, DC blocker, AGC, one-pole
/// smoothers) can decay into the denormal range on digital silence, which
/// is extremely slow on most FPUs. Flushing below `1e-20` is well under
/// any audible signal and keeps the feedback path numerically quiet.
#[inline]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_linear_roundtrip() {
        for db in [-40, -20, -6, 0, 3, 6, 12] {
            let db = db as f32;
            let linear = db_to_linear(db);
            let back = linear_to_db(linear);
            assert!((back - db).abs() < 0.01, "{db} dB -> {linear} -> {back} dB");
        }
    }

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(1.0, 5.0, 0.0), 1.0);
        assert_eq!(lerp(1.0, 5.0, 1.0), 5.0);
        assert_eq!(lerp(1.0, 5.0, 0.5), 3.0);
    }

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp(-5.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(5.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(0.5, 0.0, 1.0), 0.5);
    }

    #[test]
    fn flush_denormal_zeroes_tiny_values() {
        assert_eq!(flush_denormal(1e-25), 0.0);
        assert_eq!(flush_denormal(-1e-25), 0.0);
        assert_eq!(flush_denormal(0.5), 0.5);
    }
}
