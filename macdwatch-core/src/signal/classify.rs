//! Slope-based classification of a crossover.
//!
//! `days_since` counts steps from the crossover index to the last oscillator
//! point. The slope of the oscillator over that span picks the tier:
//!
//! | slope            | tier          |
//! |------------------|---------------|
//! | >= 1             | Strong Bullish|
//! | >= 0.2           | Bullish       |
//! | > 0              | Weak Bullish  |
//! | == 0             | Neutral       |
//! | > -0.2           | Weak Bearish  |
//! | > -1             | Bearish       |
//! | <= -1            | Strong Bearish|
//!
//! A crossover on the last point (`days_since == 0`) has no slope; it is the
//! `Fresh` tier.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::crossover::{CrossDirection, Crossover};
use crate::indicators::IndicatorError;

/// Strength tier of a classified crossover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strength {
    StrongBullish,
    Bullish,
    WeakBullish,
    Neutral,
    WeakBearish,
    Bearish,
    StrongBearish,
    Fresh,
}

impl Strength {
    /// Tier for a finite slope. Boundaries are inclusive on the strong side.
    ///
    /// NaN matches no tier and maps to `Neutral`; `classify` never passes one.
    pub fn from_slope(slope: f64) -> Self {
        if slope >= 1.0 {
            Strength::StrongBullish
        } else if slope >= 0.2 {
            Strength::Bullish
        } else if slope > 0.0 {
            Strength::WeakBullish
        } else if slope == 0.0 {
            Strength::Neutral
        } else if slope > -0.2 {
            Strength::WeakBearish
        } else if slope > -1.0 {
            Strength::Bearish
        } else if slope <= -1.0 {
            Strength::StrongBearish
        } else {
            Strength::Neutral
        }
    }

    /// Label prefix, e.g. "Weak Bullish".
    pub fn label(&self) -> &'static str {
        match self {
            Strength::StrongBullish => "Strong Bullish",
            Strength::Bullish => "Bullish",
            Strength::WeakBullish => "Weak Bullish",
            Strength::Neutral => "Neutral",
            Strength::WeakBearish => "Weak Bearish",
            Strength::Bearish => "Bearish",
            Strength::StrongBearish => "Strong Bearish",
            Strength::Fresh => "Fresh",
        }
    }
}

/// Outcome of classifying one oscillator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Classification {
    NoInversion,
    Inversion {
        direction: CrossDirection,
        strength: Strength,
        days_since: usize,
        /// `None` for `Strength::Fresh`.
        slope: Option<f64>,
    },
}

impl Classification {
    pub fn strength(&self) -> Option<Strength> {
        match self {
            Classification::NoInversion => None,
            Classification::Inversion { strength, .. } => Some(*strength),
        }
    }

    pub fn days_since(&self) -> Option<usize> {
        match self {
            Classification::NoInversion => None,
            Classification::Inversion { days_since, .. } => Some(*days_since),
        }
    }

    pub fn slope(&self) -> Option<f64> {
        match self {
            Classification::NoInversion => None,
            Classification::Inversion { slope, .. } => *slope,
        }
    }

    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::NoInversion => write!(f, "No Inversion"),
            Classification::Inversion {
                strength,
                days_since,
                ..
            } => write!(f, "{} Inversion. Days since: {days_since}", strength.label()),
        }
    }
}

/// Classify `crossover` against the full `oscillator` it was detected on.
///
/// `crossover.index` must index into `oscillator` (not a tail window). A
/// non-finite value at either end of the slope span is an error.
pub fn classify(
    crossover: Option<&Crossover>,
    oscillator: &[f64],
) -> Result<Classification, IndicatorError> {
    let Some(cross) = crossover else {
        return Ok(Classification::NoInversion);
    };

    let len = oscillator.len();
    if cross.index >= len {
        return Err(IndicatorError::IndexOutOfRange {
            index: cross.index,
            len,
        });
    }

    let last = len - 1;
    let days_since = last - cross.index;

    if days_since == 0 {
        return Ok(Classification::Inversion {
            direction: cross.direction,
            strength: Strength::Fresh,
            days_since,
            slope: None,
        });
    }

    for index in [cross.index, last] {
        if !oscillator[index].is_finite() {
            return Err(IndicatorError::NonFinite { index });
        }
    }
    let slope = (oscillator[last] - oscillator[cross.index]) / days_since as f64;

    Ok(Classification::Inversion {
        direction: cross.direction,
        strength: Strength::from_slope(slope),
        days_since,
        slope: Some(slope),
    })
}
