//! Inversion analysis: signal line, crossover detection, classification.

pub mod classify;
pub mod crossover;
pub mod pipeline;
pub mod signal_line;

pub use classify::{classify, Classification, Strength};
pub use crossover::{detect_crossover, CrossDirection, Crossover, DEFAULT_LOOKBACK};
pub use pipeline::{analyze, evaluate, InversionParams, InversionReport};
pub use signal_line::{build_signal_line, SignalLineParams};
