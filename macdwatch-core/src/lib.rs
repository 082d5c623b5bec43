//! MACDWatch Core: indicators, signal line, crossover detection, classification.
//!
//! This crate contains the numeric pipeline and the data plumbing it needs:
//! - Moving-average primitives (SMA, EMA) and a local MACD line
//! - Signal-line builder over a sliding EMA window
//! - Crossover ("inversion") detector over a bounded lookback
//! - Slope-based classifier producing the human-readable label
//! - Price/oscillator series and watchlist types
//! - Market data providers (Alpha Vantage, offline CSV) behind one trait

pub mod data;
pub mod domain;
pub mod indicators;
pub mod signal;
