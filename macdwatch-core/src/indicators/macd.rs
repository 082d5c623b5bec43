//! MACD line computed from closing prices.
//!
//! MACD[t] = EMA_fast[t] - EMA_slow[t], defined from index `slow - 1` onward.
//! The warm-up prefix is dropped, so the output has `closes.len() - (slow - 1)`
//! values (or none when there are fewer than `slow` closes).

use super::moving_average::ema_series;
use super::IndicatorError;
use crate::domain::MacdParams;

/// Compute the MACD line for `closes`. Returns the values from the first index
/// where the slow EMA is defined.
pub fn macd_line(closes: &[f64], params: &MacdParams) -> Result<Vec<f64>, IndicatorError> {
    let (fast, slow) = (params.fast_period, params.slow_period);
    if fast == 0 || fast >= slow {
        return Err(IndicatorError::InvalidPeriods { fast, slow });
    }
    if closes.len() < slow {
        return Ok(Vec::new());
    }

    let fast_ema = ema_series(closes, fast);
    let slow_ema = ema_series(closes, slow);

    Ok(fast_ema
        .iter()
        .zip(slow_ema.iter())
        .skip(slow - 1)
        .map(|(f, s)| f - s)
        .collect())
}
