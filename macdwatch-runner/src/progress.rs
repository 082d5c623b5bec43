//! Per-ticker progress callbacks for a scan.

use macdwatch_core::signal::Classification;

/// Progress callbacks, called from the scan thread in ticker order.
pub trait ScanProgress {
    /// Called before fetching a ticker.
    fn on_start(&self, ticker: &str, index: usize, total: usize);

    /// Called after a ticker has been classified for one configuration.
    fn on_result(&self, ticker: &str, configuration: &str, classification: &Classification);

    /// Called when a ticker was left out of the results or ended the scan.
    fn on_failure(&self, ticker: &str, reason: &str);

    /// Called once after the scan loop exits, before result files are written.
    fn on_scan_complete(&self, processed: usize, total: usize);
}

/// Prints progress to stdout.
pub struct StdoutProgress;

impl ScanProgress for StdoutProgress {
    fn on_start(&self, ticker: &str, index: usize, total: usize) {
        println!("[{}/{}] Scanning {ticker}...", index + 1, total);
    }

    fn on_result(&self, ticker: &str, configuration: &str, classification: &Classification) {
        println!("  {ticker} ({configuration}): {classification}");
    }

    fn on_failure(&self, ticker: &str, reason: &str) {
        println!("  FAIL: {ticker}: {reason}");
    }

    fn on_scan_complete(&self, processed: usize, total: usize) {
        println!("\nScan complete: {processed}/{total} tickers processed");
    }
}

/// Discards all progress events.
pub struct SilentProgress;

impl ScanProgress for SilentProgress {
    fn on_start(&self, _ticker: &str, _index: usize, _total: usize) {}
    fn on_result(&self, _ticker: &str, _configuration: &str, _classification: &Classification) {}
    fn on_failure(&self, _ticker: &str, _reason: &str) {}
    fn on_scan_complete(&self, _processed: usize, _total: usize) {}
}
