//! Market data: provider trait, Alpha Vantage client, offline CSV import.

pub mod alpha_vantage;
pub mod circuit_breaker;
pub mod csv_import;
pub mod provider;

pub use alpha_vantage::{AlphaVantageProvider, OutputSize};
pub use circuit_breaker::{BreakerState, CircuitBreaker};
pub use csv_import::CsvProvider;
pub use provider::{DataError, MarketDataProvider};
