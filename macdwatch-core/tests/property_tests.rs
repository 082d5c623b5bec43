//! Property tests for the numeric pipeline.
//!
//! Uses proptest to verify:
//! 1. SMA is undefined below its window and the exact tail mean otherwise
//! 2. EMA fails below twice its window and is a fixed point on constant input
//! 3. Crossover tie-break resolves flat equal series as bullish
//! 4. An oscillator that stays above its signal never crosses
//! 5. "No crossover" always classifies as "No Inversion"
//! 6. Strength tiers are monotone in slope

use macdwatch_core::indicators::{ema, sma, IndicatorError};
use macdwatch_core::signal::{classify, detect_crossover, CrossDirection, Classification, Strength};
use proptest::prelude::*;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_value() -> impl Strategy<Value = f64> {
    -1000.0..1000.0_f64
}

fn arb_series(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(arb_value(), 0..max_len)
}

fn tier_rank(strength: Strength) -> u8 {
    match strength {
        Strength::StrongBearish => 0,
        Strength::Bearish => 1,
        Strength::WeakBearish => 2,
        Strength::Neutral => 3,
        Strength::WeakBullish => 4,
        Strength::Bullish => 5,
        Strength::StrongBullish => 6,
        Strength::Fresh => u8::MAX,
    }
}

// ── 1. SMA ───────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn sma_undefined_below_window(series in arb_series(20), extra in 1usize..10) {
        let window = series.len() + extra;
        prop_assert_eq!(sma(&series, window), None);
    }

    #[test]
    fn sma_is_tail_mean(series in prop::collection::vec(arb_value(), 1..60), w in 1usize..60) {
        let window = w.min(series.len());
        let tail = &series[series.len() - window..];
        let expected = tail.iter().sum::<f64>() / window as f64;
        let actual = sma(&series, window).unwrap();
        prop_assert!((actual - expected).abs() < 1e-9);
    }
}

// ── 2. EMA ───────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn ema_fails_below_twice_window(window in 1usize..20, short in 0usize..40) {
        let len = short % (2 * window);
        let series = vec![1.0; len];
        prop_assert_eq!(
            ema(&series, window),
            Err(IndicatorError::InsufficientData { required: 2 * window, available: len })
        );
    }

    #[test]
    fn ema_of_constant_is_constant(v in arb_value(), window in 1usize..20, extra in 0usize..20) {
        let series = vec![v; 2 * window + extra];
        let result = ema(&series, window).unwrap();
        prop_assert!((result - v).abs() < 1e-9 * v.abs().max(1.0));
    }

    #[test]
    fn ema_stays_within_window_bounds(series in prop::collection::vec(arb_value(), 10..50)) {
        let window = 5;
        let tail = &series[series.len() - 10..];
        let lo = tail.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = tail.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let result = ema(&series, window).unwrap();
        prop_assert!(result >= lo - 1e-9 && result <= hi + 1e-9);
    }
}

// ── 3/4. Crossover detector ──────────────────────────────────────────

proptest! {
    #[test]
    fn flat_equal_series_are_bullish_on_last_pair(v in arb_value(), len in 2usize..150) {
        let osc = vec![v; len];
        let cross = detect_crossover(&osc, &osc, 100).unwrap().unwrap();
        prop_assert_eq!(cross.direction, CrossDirection::Bullish);
        prop_assert_eq!(cross.index, len - 1);
    }

    #[test]
    fn diverging_pair_never_crosses(
        signal in prop::collection::vec(arb_value(), 2..150),
        gaps in prop::collection::vec(0.001..100.0_f64, 150),
    ) {
        let osc: Vec<f64> = signal.iter().zip(&gaps).map(|(s, g)| s + g).collect();
        prop_assert_eq!(detect_crossover(&osc, &signal, 100).unwrap(), None);
    }

    #[test]
    fn found_index_lies_within_lookback(
        osc in prop::collection::vec(arb_value(), 2..150),
        lookback in 1usize..120,
    ) {
        let signal = vec![0.0; osc.len()];
        if let Some(cross) = detect_crossover(&osc, &signal, lookback).unwrap() {
            prop_assert!(cross.index >= 1);
            prop_assert!(cross.index < osc.len());
            prop_assert!(osc.len() - cross.index <= lookback);
        }
    }
}

// ── 5/6. Classifier ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn no_crossover_is_always_no_inversion(osc in arb_series(200)) {
        let c = classify(None, &osc).unwrap();
        prop_assert_eq!(c, Classification::NoInversion);
        prop_assert_eq!(c.label(), "No Inversion");
    }

    #[test]
    fn strength_is_monotone_in_slope(a in -5.0..5.0_f64, b in -5.0..5.0_f64) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(tier_rank(Strength::from_slope(lo)) <= tier_rank(Strength::from_slope(hi)));
    }
}
