//! Oscillator → signal line → crossover → classification.
//!
//! The detector runs on the oscillator tail that the signal line is aligned
//! with; its index is rebased onto the full oscillator before classification,
//! so every index leaving this module is absolute.

use serde::{Deserialize, Serialize};

use super::classify::{classify, Classification};
use super::crossover::{detect_crossover, Crossover, DEFAULT_LOOKBACK};
use super::signal_line::{build_signal_line, SignalLineParams};
use crate::indicators::IndicatorError;

/// Parameters for one inversion analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InversionParams {
    pub signal_line: SignalLineParams,
    /// Maximum number of pairs scanned for a crossover.
    pub lookback: usize,
}

impl Default for InversionParams {
    fn default() -> Self {
        Self {
            signal_line: SignalLineParams::default(),
            lookback: DEFAULT_LOOKBACK,
        }
    }
}

/// Full result of analysing one oscillator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InversionReport {
    /// Signal line, aligned with the last `signal_line.len()` oscillator points.
    pub signal_line: Vec<f64>,
    /// Most recent crossover, indexed into the full oscillator.
    pub crossover: Option<Crossover>,
    pub classification: Classification,
}

impl InversionReport {
    /// Index of the first oscillator point the signal line is aligned with.
    pub fn anchor(&self, oscillator_len: usize) -> usize {
        oscillator_len.saturating_sub(self.signal_line.len())
    }
}

/// Detect and classify against a precomputed signal line.
///
/// `signal_line` is aligned with the last `signal_line.len()` points of
/// `oscillator`.
pub fn evaluate(
    oscillator: &[f64],
    signal_line: Vec<f64>,
    lookback: usize,
) -> Result<InversionReport, IndicatorError> {
    let anchor = oscillator.len().checked_sub(signal_line.len()).ok_or(
        IndicatorError::LengthMismatch {
            oscillator: oscillator.len(),
            signal: signal_line.len(),
        },
    )?;

    let crossover = detect_crossover(&oscillator[anchor..], &signal_line, lookback)?
        .map(|c| c.offset_by(anchor));
    let classification = classify(crossover.as_ref(), oscillator)?;

    Ok(InversionReport {
        signal_line,
        crossover,
        classification,
    })
}

/// Build the signal line for `oscillator`, then detect and classify.
pub fn analyze(
    oscillator: &[f64],
    params: &InversionParams,
) -> Result<InversionReport, IndicatorError> {
    let signal_line = build_signal_line(oscillator, &params.signal_line)?;
    evaluate(oscillator, signal_line, params.lookback)
}
