//! Offline CSV provider.
//!
//! Reads `{dir}/{SYMBOL}.csv` files with at least `date` and `close` columns
//! (extra columns are ignored) and computes the MACD line locally. This is the
//! fallback when the remote API is unavailable or out of quota, and the way to
//! replay a scan against frozen data.

use super::provider::{DataError, MarketDataProvider};
use crate::domain::{MacdParams, OscillatorSeries, PriceSeries};
use crate::indicators::macd_line;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: NaiveDate,
    close: f64,
}

/// Provider backed by a directory of per-symbol CSV files.
#[derive(Debug, Clone)]
pub struct CsvProvider {
    dir: PathBuf,
}

impl CsvProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{symbol}.csv"))
    }

    fn read_prices(&self, symbol: &str) -> Result<PriceSeries, DataError> {
        let path = self.path_for(symbol);
        if !path.exists() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }

        let csv_err = |e: csv::Error| DataError::Csv {
            symbol: symbol.to_string(),
            reason: e.to_string(),
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&path)
            .map_err(csv_err)?;

        let points = reader
            .deserialize::<CsvRow>()
            .map(|row| {
                let r = row.map_err(csv_err)?;
                if !r.close.is_finite() {
                    return Err(DataError::Csv {
                        symbol: symbol.to_string(),
                        reason: format!("non-finite close on {}", r.date),
                    });
                }
                Ok((r.date, r.close))
            })
            .collect::<Result<Vec<_>, DataError>>()?;

        if points.is_empty() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }

        Ok(PriceSeries::from_points(symbol, points))
    }
}

impl MarketDataProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv_import"
    }

    fn fetch_prices(&self, symbol: &str) -> Result<PriceSeries, DataError> {
        self.read_prices(symbol)
    }

    fn fetch_macd(
        &self,
        symbol: &str,
        params: &MacdParams,
    ) -> Result<OscillatorSeries, DataError> {
        let prices = self.read_prices(symbol)?;
        let values = macd_line(prices.closes(), params).map_err(|source| DataError::Indicator {
            symbol: symbol.to_string(),
            source,
        })?;

        // The MACD line starts where the slow EMA is first defined.
        let skip = prices.len() - values.len();
        let points = prices.dates()[skip..]
            .iter()
            .copied()
            .zip(values)
            .collect();

        Ok(OscillatorSeries::from_points(symbol, *params, points))
    }

    fn is_available(&self) -> bool {
        self.dir.is_dir()
    }
}
