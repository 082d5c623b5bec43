//! Per-ticker chart rendering.
//!
//! `PngChartRenderer` writes `{ticker}-{YYYY-MM-DD}.png`: a close-price panel
//! on top, then one panel per oscillator configuration with the oscillator
//! tail (blue), its signal line (red), the zero line and a marker at the
//! detected crossover. Charts carry no text, so no font backend is needed.

use chrono::NaiveDate;
use macdwatch_core::domain::{OscillatorSeries, PriceSeries};
use macdwatch_core::signal::InversionReport;
use plotters::prelude::*;
use std::fmt::Display;
use std::ops::Range;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from chart rendering. Never fatal to a scan.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("failed to create chart dir '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("chart rendering failed: {0}")]
    Render(String),
}

/// One oscillator panel.
#[derive(Debug, Clone, Copy)]
pub struct OscillatorPanel<'a> {
    pub name: &'a str,
    pub oscillator: &'a OscillatorSeries,
    pub report: &'a InversionReport,
}

/// Everything drawn for one ticker.
#[derive(Debug, Clone)]
pub struct TickerChart<'a> {
    pub ticker: &'a str,
    pub prices: &'a PriceSeries,
    pub panels: Vec<OscillatorPanel<'a>>,
}

/// Renders a ticker chart, returning the written path (if any).
pub trait ChartRenderer {
    fn render(&self, chart: &TickerChart<'_>, date: NaiveDate)
        -> Result<Option<PathBuf>, ChartError>;
}

/// Disables chart output.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoChart;

impl ChartRenderer for NoChart {
    fn render(
        &self,
        _chart: &TickerChart<'_>,
        _date: NaiveDate,
    ) -> Result<Option<PathBuf>, ChartError> {
        Ok(None)
    }
}

/// PNG renderer on the plotters bitmap backend.
#[derive(Debug, Clone)]
pub struct PngChartRenderer {
    dir: PathBuf,
    width: u32,
    panel_height: u32,
}

impl PngChartRenderer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            width: 1000,
            panel_height: 250,
        }
    }

    pub fn with_size(mut self, width: u32, panel_height: u32) -> Self {
        self.width = width.max(1);
        self.panel_height = panel_height.max(1);
        self
    }

    pub fn path_for(&self, ticker: &str, date: NaiveDate) -> PathBuf {
        self.dir
            .join(format!("{ticker}-{}.png", date.format("%Y-%m-%d")))
    }
}

impl ChartRenderer for PngChartRenderer {
    fn render(
        &self,
        chart: &TickerChart<'_>,
        date: NaiveDate,
    ) -> Result<Option<PathBuf>, ChartError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| ChartError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.path_for(chart.ticker, date);
        let rows = chart.panels.len() + 1;
        draw(&path, chart, (self.width, self.panel_height * rows as u32))?;
        tracing::debug!(ticker = chart.ticker, path = %path.display(), "chart written");
        Ok(Some(path))
    }
}

fn render_err(e: impl Display) -> ChartError {
    ChartError::Render(e.to_string())
}

/// Y range covering `values`, padded so flat series still get a visible band.
fn value_range<'a>(values: impl IntoIterator<Item = &'a f64>) -> Range<f64> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        return -1.0..1.0;
    }
    let pad = ((hi - lo) * 0.05).max(1e-6);
    (lo - pad)..(hi + pad)
}

fn x_range(len: usize) -> Range<f64> {
    0.0..(len.max(2) - 1) as f64
}

fn draw(path: &Path, chart: &TickerChart<'_>, size: (u32, u32)) -> Result<(), ChartError> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let areas = root.split_evenly((chart.panels.len() + 1, 1));

    // ── Price panel ──
    let closes = chart.prices.closes();
    let mut price_chart = ChartBuilder::on(&areas[0])
        .margin(8)
        .build_cartesian_2d(x_range(closes.len()), value_range(closes))
        .map_err(render_err)?;
    price_chart
        .draw_series(LineSeries::new(
            closes.iter().enumerate().map(|(i, &c)| (i as f64, c)),
            &BLACK,
        ))
        .map_err(render_err)?;

    // ── Oscillator panels ──
    for (panel, area) in chart.panels.iter().zip(areas.iter().skip(1)) {
        let values = panel.oscillator.values();
        let signal = &panel.report.signal_line;
        let anchor = panel.report.anchor(values.len());
        let tail = &values[anchor..];

        let y = value_range(tail.iter().chain(signal.iter()).chain([0.0].iter()));
        let mut osc_chart = ChartBuilder::on(area)
            .margin(8)
            .build_cartesian_2d(x_range(tail.len()), y.clone())
            .map_err(render_err)?;

        osc_chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(0.0, 0.0), ((tail.len().max(2) - 1) as f64, 0.0)],
                &BLACK.mix(0.3),
            )))
            .map_err(render_err)?;
        osc_chart
            .draw_series(LineSeries::new(
                tail.iter().enumerate().map(|(i, &v)| (i as f64, v)),
                &BLUE,
            ))
            .map_err(render_err)?;
        osc_chart
            .draw_series(LineSeries::new(
                signal.iter().enumerate().map(|(i, &v)| (i as f64, v)),
                &RED,
            ))
            .map_err(render_err)?;

        if let Some(cross) = panel.report.crossover {
            let x = cross.index.saturating_sub(anchor) as f64;
            osc_chart
                .draw_series(std::iter::once(PathElement::new(
                    vec![(x, y.start), (x, y.end)],
                    &GREEN,
                )))
                .map_err(render_err)?;
        }
    }

    root.present().map_err(render_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use macdwatch_core::domain::MacdParams;
    use macdwatch_core::signal::{analyze, InversionParams};

    fn series(n: usize) -> (PriceSeries, OscillatorSeries) {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let day = |i: usize| start + chrono::Duration::days(i as i64);
        let prices =
            PriceSeries::from_points("AAA", (0..n).map(|i| (day(i), 100.0 + i as f64)).collect());
        let osc = OscillatorSeries::from_points(
            "AAA",
            MacdParams::new(5, 35, 5),
            (0..n).map(|i| (day(i), (i as f64 * 0.15).sin())).collect(),
        );
        (prices, osc)
    }

    #[test]
    fn value_range_pads_flat_series() {
        let r = value_range(&[2.0, 2.0]);
        assert!(r.start < 2.0 && r.end > 2.0);
        assert_eq!(value_range(&[] as &[f64]), -1.0..1.0);
    }

    #[test]
    fn path_uses_ticker_and_date() {
        let renderer = PngChartRenderer::new("/tmp/charts");
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(
            renderer.path_for("MSFT", date),
            PathBuf::from("/tmp/charts/MSFT-2024-03-15.png")
        );
    }

    #[test]
    fn no_chart_writes_nothing() {
        let (prices, _) = series(10);
        let chart = TickerChart {
            ticker: "AAA",
            prices: &prices,
            panels: Vec::new(),
        };
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert!(NoChart.render(&chart, date).unwrap().is_none());
    }

    #[test]
    fn png_renderer_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let (prices, osc) = series(250);
        let report = analyze(osc.values(), &InversionParams::default()).unwrap();
        let chart = TickerChart {
            ticker: "AAA",
            prices: &prices,
            panels: vec![OscillatorPanel {
                name: "standard",
                oscillator: &osc,
                report: &report,
            }],
        };
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let renderer = PngChartRenderer::new(dir.path()).with_size(200, 80);
        let path = renderer.render(&chart, date).unwrap().unwrap();
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
