//! Signal line: a short-window EMA resampled over the tail of an oscillator.
//!
//! With `anchor = len - output_len`, output position `i` is
//! `ema(oscillator[anchor + i - span .. anchor + i], window)` (start clamped at 0).
//! Position `i` is aligned with oscillator index `anchor + i` and only sees
//! values strictly before it.

use serde::{Deserialize, Serialize};

use crate::indicators::{ema, IndicatorError};

/// Shape of the signal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalLineParams {
    /// EMA window applied at each position.
    pub window: usize,
    /// Number of signal values produced (aligned with the oscillator tail).
    pub output_len: usize,
    /// Width of the sub-window handed to `ema` at each position.
    pub span: usize,
}

impl Default for SignalLineParams {
    fn default() -> Self {
        Self {
            window: 5,
            output_len: 100,
            span: 100,
        }
    }
}

impl SignalLineParams {
    /// Index of the first oscillator point covered by the signal line.
    pub fn anchor(&self, oscillator_len: usize) -> Option<usize> {
        oscillator_len.checked_sub(self.output_len)
    }
}

/// Build the signal line for `oscillator`.
///
/// Fails with `InsufficientData` when the oscillator is shorter than
/// `output_len`, or when any position's sub-window has fewer than
/// `2 * window` points.
pub fn build_signal_line(
    oscillator: &[f64],
    params: &SignalLineParams,
) -> Result<Vec<f64>, IndicatorError> {
    let anchor = params
        .anchor(oscillator.len())
        .ok_or(IndicatorError::InsufficientData {
            required: params.output_len,
            available: oscillator.len(),
        })?;

    (0..params.output_len)
        .map(|i| {
            let end = anchor + i;
            let start = end.saturating_sub(params.span);
            ema(&oscillator[start..end], params.window)
        })
        .collect()
}
