//! Simple and exponential moving averages.
//!
//! `sma` and `ema` are point estimates over the tail of a series.
//! `ema` seeds from the SMA of the `window` values just before the final
//! `window`, then folds forward: EMA = c * value + (1 - c) * EMA, c = 2 / (window + 1).
//! It therefore needs at least `2 * window` points.

use super::IndicatorError;

/// Mean of the last `window` values, or `None` when there are fewer than `window`.
pub fn sma(series: &[f64], window: usize) -> Option<f64> {
    if window == 0 || series.len() < window {
        return None;
    }
    let tail = &series[series.len() - window..];
    Some(tail.iter().sum::<f64>() / window as f64)
}

/// Exponential moving average of the final `window` values.
pub fn ema(series: &[f64], window: usize) -> Result<f64, IndicatorError> {
    if window == 0 {
        return Err(IndicatorError::InvalidWindow(window));
    }
    let required = 2 * window;
    let n = series.len();
    if n < required {
        return Err(IndicatorError::InsufficientData {
            required,
            available: n,
        });
    }

    let c = 2.0 / (window as f64 + 1.0);
    let seed = sma(&series[n - required..n - window], window).ok_or(
        IndicatorError::InsufficientData {
            required,
            available: n,
        },
    )?;

    Ok(series[n - window..]
        .iter()
        .fold(seed, |prev, &value| c * value + (1.0 - c) * prev))
}

/// Full-length EMA series.
///
/// Seed: SMA of the first `period` values at index `period - 1`.
/// Values before the seed are NaN. A NaN input taints everything after it.
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if n < period || period == 0 {
        return result;
    }

    let alpha = 2.0 / (period as f64 + 1.0);

    let mut sum = 0.0;
    for &v in values.iter().take(period) {
        if v.is_nan() {
            return result;
        }
        sum += v;
    }
    let seed = sum / period as f64;
    result[period - 1] = seed;

    let mut prev = seed;
    for i in period..n {
        if values[i].is_nan() {
            return result;
        }
        let next = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = next;
        prev = next;
    }

    result
}
