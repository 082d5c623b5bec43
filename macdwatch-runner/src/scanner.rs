//! Watchlist scan: the per-ticker loop around the inversion pipeline.
//!
//! For each ticker, in watchlist order:
//! 1. Fetch the price series and one oscillator per configuration
//! 2. Analyse each oscillator and record its classification
//! 3. Render the chart (failures are logged, never fatal)
//! 4. Pause on the rate limiter
//!
//! A lookup failure ends the loop. Too little history follows the configured
//! `FailurePolicy`. Whatever was recorded is written when the loop exits, on
//! every path.

use chrono::NaiveDate;
use macdwatch_core::data::{DataError, MarketDataProvider};
use macdwatch_core::domain::{OscillatorSeries, Watchlist};
use macdwatch_core::indicators::IndicatorError;
use macdwatch_core::signal::{analyze, InversionReport};
use std::path::PathBuf;
use thiserror::Error;

use crate::chart::{ChartRenderer, OscillatorPanel, TickerChart};
use crate::config::{FailurePolicy, ScanConfig};
use crate::output::OutputError;
use crate::progress::ScanProgress;
use crate::rate_limit::RateLimiter;
use crate::session::{RunSession, WrittenFile};

/// Errors that fail a scan. Result files have already been written when these are returned.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan aborted at '{ticker}' ({configuration}): {source}")]
    Aborted {
        ticker: String,
        configuration: String,
        #[source]
        source: IndicatorError,
    },

    #[error("failed to write results: {0}")]
    Output(#[from] OutputError),
}

/// A ticker/configuration pair left out of the results.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedEntry {
    pub ticker: String,
    pub configuration: String,
    pub reason: IndicatorError,
}

/// Why the loop stopped before the end of the watchlist.
#[derive(Debug)]
pub struct Termination {
    pub ticker: String,
    pub error: DataError,
}

/// Summary of a finished scan.
#[derive(Debug)]
pub struct RunReport {
    pub date: NaiveDate,
    /// Tickers in the watchlist.
    pub total: usize,
    /// Tickers fully processed (recorded or skipped) before the loop exited.
    pub processed: usize,
    pub skipped: Vec<SkippedEntry>,
    /// Set when a lookup failure ended the loop early.
    pub terminated: Option<Termination>,
    pub files: Vec<WrittenFile>,
    pub charts: Vec<PathBuf>,
}

impl RunReport {
    pub fn is_complete(&self) -> bool {
        self.terminated.is_none() && self.processed == self.total
    }
}

/// Outcome of one ticker.
enum TickerOutcome {
    Continue,
    Terminate(DataError),
    Abort(SkippedEntry),
}

/// Collaborators the scan loop calls out to.
pub struct ScanServices<'a> {
    pub provider: &'a dyn MarketDataProvider,
    pub charts: &'a dyn ChartRenderer,
    pub limiter: &'a mut dyn RateLimiter,
    pub progress: &'a dyn ScanProgress,
}

/// Scan `watchlist` and write one result file per oscillator configuration.
pub fn run_scan(
    config: &ScanConfig,
    watchlist: &Watchlist,
    services: ScanServices<'_>,
    date: NaiveDate,
) -> Result<RunReport, ScanError> {
    let ScanServices {
        provider,
        charts,
        limiter,
        progress,
    } = services;

    let mut session = RunSession::new(config, date);
    let total = watchlist.len();
    let mut processed = 0;
    let mut skipped = Vec::new();
    let mut chart_paths = Vec::new();
    let mut terminated = None;
    let mut aborted = None;

    tracing::info!(
        tickers = total,
        configurations = config.oscillators.len(),
        provider = provider.name(),
        %date,
        "scan started"
    );

    for (i, ticker) in watchlist.iter().enumerate() {
        progress.on_start(ticker, i, total);

        let outcome = scan_ticker(
            config,
            ticker,
            provider,
            charts,
            progress,
            &mut session,
            &mut skipped,
            &mut chart_paths,
        );

        match outcome {
            TickerOutcome::Continue => {
                processed += 1;
                limiter.pause();
            }
            TickerOutcome::Terminate(error) => {
                tracing::error!(ticker, error = %error, "lookup failed, ending scan");
                progress.on_failure(ticker, &error.to_string());
                terminated = Some(Termination {
                    ticker: ticker.to_string(),
                    error,
                });
                break;
            }
            TickerOutcome::Abort(entry) => {
                tracing::error!(
                    ticker,
                    configuration = %entry.configuration,
                    error = %entry.reason,
                    "insufficient data, aborting scan"
                );
                progress.on_failure(ticker, &entry.reason.to_string());
                aborted = Some(entry);
                break;
            }
        }
    }

    progress.on_scan_complete(processed, total);
    let written = session.finish();

    if let Some(entry) = aborted {
        if let Err(e) = &written {
            tracing::error!(error = %e, "results could not be written after abort");
        }
        return Err(ScanError::Aborted {
            ticker: entry.ticker,
            configuration: entry.configuration,
            source: entry.reason,
        });
    }

    let files = written?;
    tracing::info!(processed, total, skipped = skipped.len(), "scan finished");

    Ok(RunReport {
        date,
        total,
        processed,
        skipped,
        terminated,
        files,
        charts: chart_paths,
    })
}

#[allow(clippy::too_many_arguments)]
fn scan_ticker(
    config: &ScanConfig,
    ticker: &str,
    provider: &dyn MarketDataProvider,
    charts: &dyn ChartRenderer,
    progress: &dyn ScanProgress,
    session: &mut RunSession,
    skipped: &mut Vec<SkippedEntry>,
    chart_paths: &mut Vec<PathBuf>,
) -> TickerOutcome {
    let prices = match provider.fetch_prices(ticker) {
        Ok(p) => p,
        Err(e) => return TickerOutcome::Terminate(e),
    };

    let mut oscillators: Vec<OscillatorSeries> = Vec::with_capacity(config.oscillators.len());
    for osc in &config.oscillators {
        match provider.fetch_macd(ticker, &osc.macd) {
            Ok(series) => oscillators.push(series),
            Err(e) => return TickerOutcome::Terminate(e),
        }
    }

    let mut reports: Vec<(usize, InversionReport)> = Vec::with_capacity(oscillators.len());
    for (idx, (osc_config, series)) in config.oscillators.iter().zip(&oscillators).enumerate() {
        match analyze(series.values(), &config.inversion) {
            Ok(report) => {
                tracing::debug!(
                    ticker,
                    configuration = %osc_config.name,
                    crossover = ?report.crossover,
                    label = %report.classification,
                    "classified"
                );
                reports.push((idx, report));
            }
            Err(reason) => {
                let entry = SkippedEntry {
                    ticker: ticker.to_string(),
                    configuration: osc_config.name.clone(),
                    reason,
                };
                match config.failure_policy {
                    FailurePolicy::Abort => return TickerOutcome::Abort(entry),
                    FailurePolicy::Skip => {
                        tracing::warn!(
                            ticker,
                            configuration = %entry.configuration,
                            error = %entry.reason,
                            "skipping configuration"
                        );
                        progress.on_failure(ticker, &entry.reason.to_string());
                        skipped.push(entry);
                    }
                }
            }
        }
    }

    // A ticker is committed whole or not at all.
    for (idx, report) in &reports {
        let name = &config.oscillators[*idx].name;
        progress.on_result(ticker, name, &report.classification);
        session.record(*idx, ticker, report.classification);
    }

    let chart = TickerChart {
        ticker,
        prices: &prices,
        panels: reports
            .iter()
            .map(|(idx, report)| OscillatorPanel {
                name: &config.oscillators[*idx].name,
                oscillator: &oscillators[*idx],
                report,
            })
            .collect(),
    };
    match charts.render(&chart, session.date()) {
        Ok(Some(path)) => chart_paths.push(path),
        Ok(None) => {}
        Err(e) => tracing::warn!(ticker, error = %e, "chart rendering failed"),
    }

    TickerOutcome::Continue
}
