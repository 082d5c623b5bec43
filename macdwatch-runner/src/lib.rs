//! MACDWatch Runner: watchlist scans on top of `macdwatch-core`.
//!
//! This crate provides:
//! - TOML scan configuration with compiled-in defaults
//! - Rate limiting between ticker lookups
//! - Per-configuration result mappings and dated result files
//! - PNG chart rendering
//! - A run session that writes results on every exit path
//! - The scan loop itself

pub mod chart;
pub mod config;
pub mod output;
pub mod progress;
pub mod rate_limit;
pub mod results;
pub mod scanner;
pub mod session;

pub use chart::{ChartError, ChartRenderer, NoChart, OscillatorPanel, PngChartRenderer, TickerChart};
pub use config::{ConfigError, FailurePolicy, OscillatorConfig, ScanConfig};
pub use output::{file_name, OutputError};
pub use progress::{ScanProgress, SilentProgress, StdoutProgress};
pub use rate_limit::{FixedDelay, RateLimiter, Unthrottled};
pub use results::ResultMapping;
pub use scanner::{run_scan, RunReport, ScanError, ScanServices, SkippedEntry, Termination};
pub use session::{RunSession, WrittenFile};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn config_types_are_send_sync() {
        assert_send::<ScanConfig>();
        assert_sync::<ScanConfig>();
        assert_send::<OscillatorConfig>();
        assert_sync::<OscillatorConfig>();
    }

    #[test]
    fn result_types_are_send_sync() {
        assert_send::<ResultMapping>();
        assert_sync::<ResultMapping>();
        assert_send::<RunReport>();
        assert_sync::<RunReport>();
        assert_send::<RunSession>();
    }

    #[test]
    fn limiters_are_send() {
        assert_send::<FixedDelay>();
        assert_send::<Unthrottled>();
    }

    #[test]
    fn error_types_are_send_sync() {
        assert_send::<ScanError>();
        assert_sync::<ScanError>();
        assert_send::<ConfigError>();
        assert_sync::<ConfigError>();
        assert_send::<ChartError>();
        assert_sync::<ChartError>();
    }
}
