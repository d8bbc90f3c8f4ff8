use crate::domain::PriceSeries;
use crate::scoring::stats::{rolling_std, simple_returns};
use crate::scoring::{scale_with_history, Indicator, ScoreError, MIN_OBSERVATIONS, NEUTRAL_SCORE};

/// Rolling window length, in return observations.
pub const VOLATILITY_WINDOW: usize = 10;

/// Percentile-style stress score from rolling return volatility.
///
/// The current reading is the most recent rolling value and is normalized
/// against the full rolling series, so the current point is also a member of
/// its own comparison history. That self-inclusion is intentional and kept
/// for score continuity with the long-running index.
#[derive(Debug, Clone, Copy)]
pub struct VolatilityIndicator {
    window: usize,
}

impl VolatilityIndicator {
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(2),
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

impl Default for VolatilityIndicator {
    fn default() -> Self {
        Self::new(VOLATILITY_WINDOW)
    }
}

impl Indicator for VolatilityIndicator {
    fn name(&self) -> &'static str {
        "volatility"
    }

    fn score(&self, series: &PriceSeries) -> Result<f64, ScoreError> {
        if series.len() < MIN_OBSERVATIONS {
            return Ok(NEUTRAL_SCORE);
        }

        let closes = series.closes();
        let returns = simple_returns(&closes);

        // Rolling return volatility, expressed in percent.
        let volatility: Vec<f64> = rolling_std(&returns, self.window)
            .into_iter()
            .map(|value| value * 100.0)
            .filter(|value| value.is_finite())
            .collect();

        let Some(&current) = volatility.last() else {
            return Ok(NEUTRAL_SCORE);
        };

        Ok(scale_with_history(&volatility, current))
    }
}
