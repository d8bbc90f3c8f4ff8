//! Stress scoring: indicator contract and volatility normalization.

pub mod stats;
mod volatility;

pub use volatility::{VolatilityIndicator, VOLATILITY_WINDOW};

use thiserror::Error;

use crate::domain::PriceSeries;

/// Fallback score used whenever insufficient or degenerate data prevents a
/// meaningful normalized computation.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Minimum observations (price points or historical sample values) required
/// before a score is computed instead of the neutral fallback.
pub const MIN_OBSERVATIONS: usize = 10;

/// Below this, the historical sample counts as constant and cannot anchor a
/// z-score.
pub const STD_FLOOR: f64 = 1e-8;

/// Error raised by an indicator implementation.
///
/// The built-in volatility indicator degrades to [`NEUTRAL_SCORE`] instead
/// of failing; this type exists for the trait seam so future indicator kinds
/// with fallible inputs stay isolated by the aggregator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScoreError {
    #[error("indicator '{indicator}' failed for {symbol}: {message}")]
    Indicator {
        indicator: &'static str,
        symbol: String,
        message: String,
    },
}

/// A stress signal computed from one instrument's price history.
///
/// Implementations map a (possibly empty) price series to a bounded [0, 100]
/// stress score. New signal kinds (skew, momentum) plug in here without
/// touching the aggregator.
pub trait Indicator: Send + Sync {
    fn name(&self) -> &'static str;

    /// Compute the stress score for one series.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError`] only for faults the indicator cannot express
    /// as a degraded score; data-shaped degeneracy (short or constant
    /// history) must map to [`NEUTRAL_SCORE`], not an error.
    fn score(&self, series: &PriceSeries) -> Result<f64, ScoreError>;
}

/// Normalize a current reading against its own trailing history.
///
/// Z-scores `current` against the sample and maps the result through the
/// standard normal CDF onto [0, 100]. Degenerate input (short sample or
/// near-zero spread) yields [`NEUTRAL_SCORE`]. The history statistics use
/// the population (n-divisor) standard deviation.
pub fn scale_with_history(history: &[f64], current: f64) -> f64 {
    if history.len() < MIN_OBSERVATIONS {
        return NEUTRAL_SCORE;
    }

    let m = stats::mean(history);
    let s = stats::population_std(history);
    if s < STD_FLOOR {
        return NEUTRAL_SCORE;
    }

    let z = (current - m) / s;
    let score = 100.0 * stats::normal_cdf(z);
    score.max(0.0).min(100.0)
}
