//! Domain types: price and oscillator series, MACD parameters, watchlist.

pub mod series;
pub mod watchlist;

pub use series::{MacdParams, OscillatorSeries, PriceSeries};
pub use watchlist::Watchlist;
