//! Watchlist: the ordered list of ticker symbols scanned in a run.
//!
//! Stored as a plain text file with one symbol per line. Line terminators and
//! surrounding whitespace are stripped; blank lines and `#` comments are skipped.
//! Order is preserved: it is the processing order of the run.

use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Watchlist {
    tickers: Vec<String>,
}

impl Watchlist {
    pub fn new(tickers: Vec<String>) -> Self {
        Self { tickers }
    }

    /// Load a watchlist from a text file.
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    /// Parse watchlist text.
    pub fn parse(content: &str) -> Self {
        let tickers = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(String::from)
            .collect();
        Self { tickers }
    }

    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tickers.iter().map(|t| t.as_str())
    }
}

impl<S: Into<String>> FromIterator<S> for Watchlist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_preserves_order() {
        let wl = Watchlist::parse("MSFT\nAAPL\nIBM\n");
        assert_eq!(wl.tickers(), &["MSFT", "AAPL", "IBM"]);
    }

    #[test]
    fn parse_strips_crlf_and_whitespace() {
        let wl = Watchlist::parse("SPY\r\n  QQQ  \r\n");
        assert_eq!(wl.tickers(), &["SPY", "QQQ"]);
    }

    #[test]
    fn parse_skips_blank_and_comment_lines() {
        let wl = Watchlist::parse("# tech\nAAPL\n\n# energy\nXOM");
        assert_eq!(wl.tickers(), &["AAPL", "XOM"]);
    }

    #[test]
    fn last_line_without_newline_is_kept() {
        let wl = Watchlist::parse("AAA\nBBB");
        assert_eq!(wl.len(), 2);
        assert_eq!(wl.iter().last(), Some("BBB"));
    }

    #[test]
    fn from_file_reads_symbols() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("watchlist.txt");
        std::fs::write(&path, "AAA\nBBB\n").unwrap();
        let wl = Watchlist::from_file(&path).unwrap();
        assert_eq!(wl.tickers(), &["AAA", "BBB"]);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Watchlist::from_file(Path::new("/nonexistent/watchlist.txt")).is_err());
    }
}
