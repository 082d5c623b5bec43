//! Moving-average primitives and the local MACD line.
//!
//! The scalar `sma`/`ema` pair is what the signal-line builder resamples with.
//! `ema_series` and `macd_line` produce whole series and only back the offline
//! CSV provider, which has to compute MACD itself.

pub mod macd;
pub mod moving_average;

pub use macd::macd_line;
pub use moving_average::{ema, ema_series, sma};

use thiserror::Error;

/// Errors from the numeric pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    #[error("insufficient data: need at least {required} points, got {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("invalid window: {0} (must be >= 1)")]
    InvalidWindow(usize),

    #[error("oscillator and signal lengths differ ({oscillator} vs {signal})")]
    LengthMismatch { oscillator: usize, signal: usize },

    #[error("index {index} out of range for series of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid MACD periods: fast={fast}, slow={slow} (need 1 <= fast < slow)")]
    InvalidPeriods { fast: usize, slow: usize },

    #[error("non-finite value at index {index}")]
    NonFinite { index: usize },
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
