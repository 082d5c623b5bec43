//! Market data provider trait and structured error types.
//!
//! The MarketDataProvider trait abstracts over data sources (Alpha Vantage,
//! offline CSV import) so the scanner can swap implementations and tests can
//! substitute in-memory fakes.

use thiserror::Error;

use crate::domain::{MacdParams, OscillatorSeries, PriceSeries};
use crate::indicators::IndicatorError;

/// Structured error types for data operations.
///
/// Every variant is a lookup failure from the scanner's point of view.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider: {0}")]
    RateLimited(String),

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("authentication required: {0}")]
    AuthenticationRequired(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("hard stop: data provider has blocked requests (circuit breaker tripped)")]
    CircuitBreakerTripped,

    #[error("CSV error for '{symbol}': {reason}")]
    Csv { symbol: String, reason: String },

    #[error("cannot compute MACD for '{symbol}': {source}")]
    Indicator {
        symbol: String,
        #[source]
        source: IndicatorError,
    },

    #[error("data error: {0}")]
    Other(String),
}

/// Trait for market data providers.
///
/// Implementations fetch daily closes and MACD series for one symbol at a time.
/// Calls are blocking; pacing between symbols is the caller's job.
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily closing prices, oldest first.
    fn fetch_prices(&self, symbol: &str) -> Result<PriceSeries, DataError>;

    /// Fetch the daily MACD line for `params`, oldest first.
    fn fetch_macd(&self, symbol: &str, params: &MacdParams)
        -> Result<OscillatorSeries, DataError>;

    /// Check if the provider is currently available (not rate-limited, not blocked).
    fn is_available(&self) -> bool;
}
