//! MACDWatch CLI: scan a watchlist for MACD signal-line inversions.
//!
//! With no flags the scan runs on compiled-in defaults: `watchlist.txt` in the
//! working directory, Alpha Vantage data (key from `ALPHAVANTAGE_API_KEY`),
//! result files and charts written to the working directory.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use macdwatch_core::data::{AlphaVantageProvider, CircuitBreaker, CsvProvider, MarketDataProvider};
use macdwatch_core::domain::Watchlist;
use macdwatch_runner::{
    run_scan, ChartRenderer, FixedDelay, NoChart, PngChartRenderer, RateLimiter, RunReport,
    ScanConfig, ScanServices, StdoutProgress, Unthrottled,
};

#[derive(Parser)]
#[command(
    name = "macdwatch",
    about = "MACDWatch: daily MACD inversion scan over a watchlist"
)]
struct Cli {
    /// Path to a TOML scan config. Defaults apply to every missing field.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read `{SYMBOL}.csv` files from this directory instead of calling Alpha Vantage.
    #[arg(long)]
    csv_dir: Option<PathBuf>,
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ScanConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ScanConfig::default(),
    };

    let watchlist = Watchlist::from_file(&config.watchlist)
        .with_context(|| format!("reading watchlist {}", config.watchlist.display()))?;
    if watchlist.is_empty() {
        tracing::warn!(path = %config.watchlist.display(), "watchlist is empty");
    }

    let provider = build_provider(&cli, &config)?;
    if !provider.is_available() {
        anyhow::bail!("data source '{}' is not available", provider.name());
    }

    let charts: Box<dyn ChartRenderer> = if config.charts {
        Box::new(PngChartRenderer::new(&config.chart_dir))
    } else {
        Box::new(NoChart)
    };

    // Local files need no pacing.
    let mut limiter: Box<dyn RateLimiter> = if cli.csv_dir.is_some() {
        Box::new(Unthrottled)
    } else {
        Box::new(FixedDelay::new(config.delay()))
    };

    let date = chrono::Local::now().date_naive();
    let report = run_scan(
        &config,
        &watchlist,
        ScanServices {
            provider: provider.as_ref(),
            charts: charts.as_ref(),
            limiter: limiter.as_mut(),
            progress: &StdoutProgress,
        },
        date,
    )?;

    print_summary(&report);
    Ok(())
}

fn build_provider(cli: &Cli, config: &ScanConfig) -> Result<Box<dyn MarketDataProvider>> {
    if let Some(dir) = &cli.csv_dir {
        return Ok(Box::new(CsvProvider::new(dir)));
    }

    let breaker = Arc::new(CircuitBreaker::default_provider());
    let provider = match &config.api_key {
        Some(key) => AlphaVantageProvider::new(key.clone(), breaker),
        None => AlphaVantageProvider::from_env(breaker),
    }
    .context("configuring Alpha Vantage")?;
    Ok(Box::new(provider))
}

fn print_summary(report: &RunReport) {
    println!();
    println!("Scan {}: {}/{} tickers", report.date, report.processed, report.total);

    if let Some(term) = &report.terminated {
        println!("  Stopped early at {}: {}", term.ticker, term.error);
    }
    for s in &report.skipped {
        println!("  Skipped {} ({}): {}", s.ticker, s.configuration, s.reason);
    }
    for f in &report.files {
        println!(
            "  {}: {} entries -> {}",
            f.configuration,
            f.entries,
            f.path.display()
        );
    }
    if !report.charts.is_empty() {
        println!("  {} charts written", report.charts.len());
    }
}
