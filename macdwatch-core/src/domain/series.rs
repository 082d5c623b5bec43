//! Chronological price and oscillator series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// MACD configuration tuple: fast EMA, slow EMA, signal periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MacdParams {
    pub fast_period: usize,
    pub slow_period: usize,
    pub signal_period: usize,
}

impl MacdParams {
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Self {
        Self {
            fast_period,
            slow_period,
            signal_period,
        }
    }
}

impl fmt::Display for MacdParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.fast_period, self.slow_period, self.signal_period
        )
    }
}

/// Daily closing prices for one symbol, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: String,
    dates: Vec<NaiveDate>,
    closes: Vec<f64>,
}

impl PriceSeries {
    /// Build from `(date, close)` points in any order; they are sorted by date.
    pub fn from_points(symbol: impl Into<String>, mut points: Vec<(NaiveDate, f64)>) -> Self {
        points.sort_by_key(|(date, _)| *date);
        let (dates, closes) = points.into_iter().unzip();
        Self {
            symbol: symbol.into(),
            dates,
            closes,
        }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }
}

/// MACD values for one symbol and one `MacdParams`, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OscillatorSeries {
    pub symbol: String,
    pub params: MacdParams,
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl OscillatorSeries {
    /// Build from `(date, value)` points in any order; they are sorted by date.
    pub fn from_points(
        symbol: impl Into<String>,
        params: MacdParams,
        mut points: Vec<(NaiveDate, f64)>,
    ) -> Self {
        points.sort_by_key(|(date, _)| *date);
        let (dates, values) = points.into_iter().unzip();
        Self {
            symbol: symbol.into(),
            params,
            dates,
            values,
        }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Date of the point at `index`, if any.
    pub fn date_at(&self, index: usize) -> Option<NaiveDate> {
        self.dates.get(index).copied()
    }
}
