//! Alpha Vantage data provider.
//!
//! Fetches daily closes (`TIME_SERIES_DAILY`) and MACD (`MACD`) from the
//! Alpha Vantage query API. Handles retries with exponential backoff, the
//! in-body error/notice fields, and the circuit breaker.
//!
//! Alpha Vantage answers most failures with HTTP 200 and a JSON body holding
//! `Error Message`, `Note` or `Information` instead of data, so status codes
//! alone say little.

use super::circuit_breaker::CircuitBreaker;
use super::provider::{DataError, MarketDataProvider};
use crate::domain::{MacdParams, OscillatorSeries, PriceSeries};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "ALPHAVANTAGE_API_KEY";

/// Fields Alpha Vantage uses instead of data when a call fails.
#[derive(Debug, Default, Deserialize)]
struct ApiStatus {
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

/// `TIME_SERIES_DAILY` response.
#[derive(Debug, Deserialize)]
struct DailyResponse {
    #[serde(rename = "Time Series (Daily)")]
    series: Option<BTreeMap<String, DailyBar>>,
    #[serde(flatten)]
    status: ApiStatus,
}

#[derive(Debug, Deserialize)]
struct DailyBar {
    #[serde(rename = "4. close")]
    close: String,
}

/// `MACD` technical indicator response.
#[derive(Debug, Deserialize)]
struct MacdResponse {
    #[serde(rename = "Technical Analysis: MACD")]
    series: Option<BTreeMap<String, MacdPoint>>,
    #[serde(flatten)]
    status: ApiStatus,
}

#[derive(Debug, Deserialize)]
struct MacdPoint {
    #[serde(rename = "MACD")]
    macd: String,
}

trait Payload: DeserializeOwned {
    fn status(&self) -> &ApiStatus;
}

impl Payload for DailyResponse {
    fn status(&self) -> &ApiStatus {
        &self.status
    }
}

impl Payload for MacdResponse {
    fn status(&self) -> &ApiStatus {
        &self.status
    }
}

/// How much daily history to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputSize {
    /// Latest 100 points.
    #[default]
    Compact,
    /// Full history.
    Full,
}

impl OutputSize {
    fn as_str(&self) -> &'static str {
        match self {
            OutputSize::Compact => "compact",
            OutputSize::Full => "full",
        }
    }
}

/// Alpha Vantage data provider.
pub struct AlphaVantageProvider {
    client: reqwest::blocking::Client,
    api_key: String,
    base_url: String,
    output_size: OutputSize,
    circuit_breaker: Arc<CircuitBreaker>,
    max_retries: u32,
    base_delay: Duration,
}

impl AlphaVantageProvider {
    pub fn new(
        api_key: impl Into<String>,
        circuit_breaker: Arc<CircuitBreaker>,
    ) -> Result<Self, DataError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(DataError::AuthenticationRequired(format!(
                "Alpha Vantage API key is empty (set {API_KEY_ENV})"
            )));
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            output_size: OutputSize::Compact,
            circuit_breaker,
            max_retries: 3,
            base_delay: Duration::from_secs(2),
        })
    }

    /// Read the API key from `ALPHAVANTAGE_API_KEY`.
    pub fn from_env(circuit_breaker: Arc<CircuitBreaker>) -> Result<Self, DataError> {
        let key = std::env::var(API_KEY_ENV).map_err(|_| {
            DataError::AuthenticationRequired(format!("{API_KEY_ENV} is not set"))
        })?;
        Self::new(key, circuit_breaker)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_output_size(mut self, output_size: OutputSize) -> Self {
        self.output_size = output_size;
        self
    }

    pub fn with_retries(mut self, max_retries: u32, base_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.base_delay = base_delay;
        self
    }

    /// Execute one query with retry and circuit breaker logic.
    fn query<T: Payload>(&self, symbol: &str, params: &[(&str, String)]) -> Result<T, DataError> {
        if !self.circuit_breaker.is_allowed() {
            return Err(DataError::CircuitBreakerTripped);
        }

        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.base_delay * 2u32.pow(attempt - 1);
                tracing::debug!(symbol, attempt, ?delay, "retrying Alpha Vantage request");
                std::thread::sleep(delay);
            }

            if !self.circuit_breaker.is_allowed() {
                return Err(DataError::CircuitBreakerTripped);
            }

            let response = self
                .client
                .get(&self.base_url)
                .query(params)
                .query(&[("apikey", self.api_key.as_str())])
                .send();

            let resp = match response {
                Ok(resp) => resp,
                Err(e) if e.is_connect() || e.is_timeout() => {
                    last_error = Some(DataError::NetworkUnreachable(e.to_string()));
                    continue;
                }
                Err(e) => return Err(DataError::NetworkUnreachable(e.to_string())),
            };

            let status = resp.status();
            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                self.circuit_breaker.record_failure();
                last_error = Some(DataError::RateLimited(format!("HTTP {status}")));
                continue;
            }
            if !status.is_success() {
                self.circuit_breaker.record_failure();
                last_error = Some(DataError::Other(format!("HTTP {status} for {symbol}")));
                continue;
            }

            let body = resp
                .text()
                .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;
            let payload: T = parse_body(symbol, &body)?;

            match check_status(symbol, payload.status()) {
                Ok(()) => {
                    self.circuit_breaker.record_success();
                    return Ok(payload);
                }
                Err(e @ DataError::RateLimited(_)) => {
                    self.circuit_breaker.record_failure();
                    last_error = Some(e);
                }
                Err(e @ DataError::AuthenticationRequired(_)) => {
                    self.circuit_breaker.trip();
                    return Err(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| DataError::Other("max retries exceeded".into())))
    }
}

fn parse_body<T: DeserializeOwned>(symbol: &str, body: &str) -> Result<T, DataError> {
    serde_json::from_str(body).map_err(|e| {
        DataError::ResponseFormatChanged(format!("failed to parse response for {symbol}: {e}"))
    })
}

/// Map the in-body status fields onto `DataError`.
fn check_status(symbol: &str, status: &ApiStatus) -> Result<(), DataError> {
    if let Some(message) = &status.error_message {
        tracing::debug!(symbol, %message, "Alpha Vantage rejected the call");
        return Err(DataError::SymbolNotFound {
            symbol: symbol.to_string(),
        });
    }
    if let Some(note) = &status.note {
        return Err(DataError::RateLimited(note.clone()));
    }
    if let Some(info) = &status.information {
        if info.to_lowercase().contains("rate limit") {
            return Err(DataError::RateLimited(info.clone()));
        }
        return Err(DataError::AuthenticationRequired(info.clone()));
    }
    Ok(())
}

/// Parse a `YYYY-MM-DD` key (a trailing time component is ignored).
fn parse_date(key: &str) -> Result<NaiveDate, DataError> {
    let day = key.get(..10).unwrap_or(key);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|e| DataError::ResponseFormatChanged(format!("invalid date '{key}': {e}")))
}

fn parse_value(field: &str, raw: &str) -> Result<f64, DataError> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| DataError::ResponseFormatChanged(format!("invalid {field} '{raw}': {e}")))?;
    if !value.is_finite() {
        return Err(DataError::ResponseFormatChanged(format!(
            "non-finite {field} '{raw}'"
        )));
    }
    Ok(value)
}

fn into_prices(symbol: &str, resp: DailyResponse) -> Result<PriceSeries, DataError> {
    let series = resp
        .series
        .ok_or_else(|| DataError::ResponseFormatChanged("missing 'Time Series (Daily)'".into()))?;
    if series.is_empty() {
        return Err(DataError::SymbolNotFound {
            symbol: symbol.to_string(),
        });
    }

    let points = series
        .iter()
        .map(|(date, bar)| Ok((parse_date(date)?, parse_value("close", &bar.close)?)))
        .collect::<Result<Vec<_>, DataError>>()?;

    Ok(PriceSeries::from_points(symbol, points))
}

fn into_oscillator(
    symbol: &str,
    params: &MacdParams,
    resp: MacdResponse,
) -> Result<OscillatorSeries, DataError> {
    let series = resp.series.ok_or_else(|| {
        DataError::ResponseFormatChanged("missing 'Technical Analysis: MACD'".into())
    })?;
    if series.is_empty() {
        return Err(DataError::SymbolNotFound {
            symbol: symbol.to_string(),
        });
    }

    let points = series
        .iter()
        .map(|(date, point)| Ok((parse_date(date)?, parse_value("MACD", &point.macd)?)))
        .collect::<Result<Vec<_>, DataError>>()?;

    Ok(OscillatorSeries::from_points(symbol, *params, points))
}

impl MarketDataProvider for AlphaVantageProvider {
    fn name(&self) -> &str {
        "alpha_vantage"
    }

    fn fetch_prices(&self, symbol: &str) -> Result<PriceSeries, DataError> {
        let resp: DailyResponse = self.query(
            symbol,
            &[
                ("function", "TIME_SERIES_DAILY".to_string()),
                ("symbol", symbol.to_string()),
                ("outputsize", self.output_size.as_str().to_string()),
            ],
        )?;
        into_prices(symbol, resp)
    }

    fn fetch_macd(
        &self,
        symbol: &str,
        params: &MacdParams,
    ) -> Result<OscillatorSeries, DataError> {
        let resp: MacdResponse = self.query(
            symbol,
            &[
                ("function", "MACD".to_string()),
                ("symbol", symbol.to_string()),
                ("interval", "daily".to_string()),
                ("series_type", "close".to_string()),
                ("fastperiod", params.fast_period.to_string()),
                ("slowperiod", params.slow_period.to_string()),
                ("signalperiod", params.signal_period.to_string()),
            ],
        )?;
        into_oscillator(symbol, params, resp)
    }

    fn is_available(&self) -> bool {
        self.circuit_breaker.is_allowed()
    }
}
