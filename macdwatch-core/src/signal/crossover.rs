//! Crossover ("inversion") detection between an oscillator and its signal line.
//!
//! Scans adjacent pairs `(t-1, t)` from the newest backward, at most `lookback`
//! pairs, and returns the first qualifying one:
//! - Bullish: osc[t-1] <= sig[t-1], osc[t] >= sig[t], osc[t] >= osc[t-1]
//! - Bearish: osc[t-1] >= sig[t-1], osc[t] <= sig[t], osc[t] <= osc[t-1]
//!
//! A pair satisfying both (e.g. flat and equal series) is Bullish: bullish is
//! always checked first.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::indicators::IndicatorError;

/// Default number of pairs scanned.
pub const DEFAULT_LOOKBACK: usize = 100;

/// Which way the oscillator crossed its signal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrossDirection {
    Bullish,
    Bearish,
}

impl fmt::Display for CrossDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrossDirection::Bullish => write!(f, "Bullish"),
            CrossDirection::Bearish => write!(f, "Bearish"),
        }
    }
}

/// The most recent crossover: its direction and the index `t` of the second
/// point of the crossing pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crossover {
    pub direction: CrossDirection,
    pub index: usize,
}

impl Crossover {
    /// Rebase the index by `offset` (e.g. from a tail window onto the full series).
    pub fn offset_by(self, offset: usize) -> Self {
        Self {
            direction: self.direction,
            index: self.index + offset,
        }
    }
}

/// Classify a single pair `(t-1, t)`.
fn cross_at(oscillator: &[f64], signal: &[f64], t: usize) -> Option<CrossDirection> {
    let (o_prev, o_cur) = (oscillator[t - 1], oscillator[t]);
    let (s_prev, s_cur) = (signal[t - 1], signal[t]);

    if o_prev <= s_prev && o_cur >= s_cur && o_cur >= o_prev {
        Some(CrossDirection::Bullish)
    } else if o_prev >= s_prev && o_cur <= s_cur && o_cur <= o_prev {
        Some(CrossDirection::Bearish)
    } else {
        None
    }
}

/// Find the most recent crossover within the last `lookback` pairs.
///
/// `oscillator` and `signal` must be aligned index-for-index. The returned
/// index is relative to these slices. `Ok(None)` means no crossover in range.
pub fn detect_crossover(
    oscillator: &[f64],
    signal: &[f64],
    lookback: usize,
) -> Result<Option<Crossover>, IndicatorError> {
    if oscillator.len() != signal.len() {
        return Err(IndicatorError::LengthMismatch {
            oscillator: oscillator.len(),
            signal: signal.len(),
        });
    }

    let n = oscillator.len();
    if n < 2 {
        return Ok(None);
    }

    let pairs = lookback.min(n - 1);
    let found = (n - pairs..n).rev().find_map(|t| {
        cross_at(oscillator, signal, t).map(|direction| Crossover {
            direction,
            index: t,
        })
    });

    Ok(found)
}
