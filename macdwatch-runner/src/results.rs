//! Per-configuration result mappings.

use macdwatch_core::signal::Classification;
use serde::{Deserialize, Serialize};

/// Ticker → classification, in processing order.
///
/// Recording the same ticker twice replaces its entry in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultMapping {
    entries: Vec<(String, Classification)>,
}

impl ResultMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, ticker: impl Into<String>, classification: Classification) {
        let ticker = ticker.into();
        match self.entries.iter_mut().find(|(t, _)| *t == ticker) {
            Some(entry) => entry.1 = classification,
            None => self.entries.push((ticker, classification)),
        }
    }

    pub fn get(&self, ticker: &str) -> Option<&Classification> {
        self.entries
            .iter()
            .find(|(t, _)| t == ticker)
            .map(|(_, c)| c)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Classification)> {
        self.entries.iter().map(|(t, c)| (t.as_str(), c))
    }

    /// File body: one `{ticker}:{label}` line per entry, `\n`-separated, no trailing newline.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|(ticker, c)| format!("{ticker}:{c}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macdwatch_core::signal::{CrossDirection, Strength};
    use proptest::prelude::*;

    fn bullish(days: usize) -> Classification {
        Classification::Inversion {
            direction: CrossDirection::Bullish,
            strength: Strength::Bullish,
            days_since: days,
            slope: Some(0.3),
        }
    }

    #[test]
    fn renders_in_insertion_order() {
        let mut mapping = ResultMapping::new();
        mapping.record("AAA", Classification::NoInversion);
        mapping.record("BBB", bullish(10));
        assert_eq!(
            mapping.render(),
            "AAA:No Inversion\nBBB:Bullish Inversion. Days since: 10"
        );
    }

    #[test]
    fn rerecording_replaces_in_place() {
        let mut mapping = ResultMapping::new();
        mapping.record("AAA", Classification::NoInversion);
        mapping.record("BBB", Classification::NoInversion);
        mapping.record("AAA", bullish(3));
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.iter().next().map(|(t, _)| t), Some("AAA"));
        assert_eq!(mapping.get("AAA"), Some(&bullish(3)));
    }

    #[test]
    fn empty_mapping_renders_empty() {
        assert_eq!(ResultMapping::new().render(), "");
    }

    proptest! {
        #[test]
        fn one_line_per_distinct_ticker(tickers in prop::collection::vec("[A-Z]{1,4}", 0..30)) {
            let mut mapping = ResultMapping::new();
            for t in &tickers {
                mapping.record(t.as_str(), Classification::NoInversion);
            }
            let mut distinct = tickers.clone();
            distinct.sort();
            distinct.dedup();

            let rendered = mapping.render();
            prop_assert_eq!(mapping.len(), distinct.len());
            prop_assert_eq!(rendered.lines().count(), distinct.len());
            prop_assert!(!rendered.ends_with('\n'));
        }
    }
}
