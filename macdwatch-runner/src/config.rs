//! Scan configuration.
//!
//! Every field has a compiled-in default, so an empty TOML document (or no
//! file at all) describes the standard daily scan: the `watchlist.txt`
//! watchlist, a standard MACD(5, 35, 5) and a weekly MACD(60, 130, 45)
//! configuration, and a 30 second pause between tickers.

use macdwatch_core::domain::MacdParams;
use macdwatch_core::signal::InversionParams;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors from loading a scan configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// What to do when a ticker has too little history for the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Log a warning, leave the ticker out of the results, keep scanning.
    #[default]
    Skip,
    /// Stop the scan. Results collected so far are still written.
    Abort,
}

/// One tracked oscillator configuration. Each gets its own result file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OscillatorConfig {
    /// Display name, used in logs and chart panel order.
    pub name: String,
    /// Output file suffix: `watchlist_<suffix>-<date>.txt`. `None` gives `watchlist-<date>.txt`.
    #[serde(default)]
    pub suffix: Option<String>,
    pub macd: MacdParams,
}

impl OscillatorConfig {
    pub fn standard() -> Self {
        Self {
            name: "standard".into(),
            suffix: None,
            macd: MacdParams::new(5, 35, 5),
        }
    }

    /// Weekly (12, 26, 9) expressed in trading days.
    pub fn weekly() -> Self {
        Self {
            name: "weekly".into(),
            suffix: Some("weekly".into()),
            macd: MacdParams::new(60, 130, 45),
        }
    }
}

/// Full configuration for one scan run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Watchlist file, one ticker per line.
    pub watchlist: PathBuf,
    /// Directory for the per-configuration result files.
    pub output_dir: PathBuf,
    /// Move result files into `<output_dir>/archive/` after writing.
    pub archive: bool,
    /// Render a PNG chart per ticker.
    pub charts: bool,
    /// Directory for chart images.
    pub chart_dir: PathBuf,
    /// Pause between tickers, in seconds.
    pub delay_secs: u64,
    pub failure_policy: FailurePolicy,
    pub inversion: InversionParams,
    pub oscillators: Vec<OscillatorConfig>,
    /// Alpha Vantage key. Falls back to `ALPHAVANTAGE_API_KEY` when unset.
    pub api_key: Option<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            watchlist: PathBuf::from("watchlist.txt"),
            output_dir: PathBuf::from("."),
            archive: false,
            charts: true,
            chart_dir: PathBuf::from("."),
            delay_secs: 30,
            failure_policy: FailurePolicy::Skip,
            inversion: InversionParams::default(),
            oscillators: vec![OscillatorConfig::standard(), OscillatorConfig::weekly()],
            api_key: None,
        }
    }
}

impl ScanConfig {
    /// Parse a TOML document. Missing fields keep their defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: ScanConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.oscillators.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one oscillator configuration is required".into(),
            ));
        }

        let mut suffixes = Vec::with_capacity(self.oscillators.len());
        for osc in &self.oscillators {
            let p = osc.macd;
            if p.fast_period == 0 || p.fast_period >= p.slow_period {
                return Err(ConfigError::Invalid(format!(
                    "oscillator '{}': fast period must be positive and below slow period, got {p}",
                    osc.name
                )));
            }
            if suffixes.contains(&osc.suffix) {
                return Err(ConfigError::Invalid(format!(
                    "oscillator '{}' writes to the same file as an earlier configuration",
                    osc.name
                )));
            }
            suffixes.push(osc.suffix.clone());
        }

        let sl = &self.inversion.signal_line;
        if sl.window == 0 || sl.output_len == 0 {
            return Err(ConfigError::Invalid(
                "signal line window and output length must be positive".into(),
            ));
        }
        if sl.span < 2 * sl.window {
            return Err(ConfigError::Invalid(format!(
                "signal line span {} must be at least twice the window {}",
                sl.span, sl.window
            )));
        }
        if self.inversion.lookback == 0 {
            return Err(ConfigError::Invalid("lookback must be positive".into()));
        }
        Ok(())
    }
}
