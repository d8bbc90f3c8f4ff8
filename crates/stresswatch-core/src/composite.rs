//! Composite index aggregation.

use serde::{Deserialize, Serialize};

use crate::domain::{DateRange, Symbol};
use crate::markets::StressConfig;
use crate::provider::HistoryProvider;
use crate::scoring::{Indicator, VolatilityIndicator, NEUTRAL_SCORE};

/// One instrument's contribution to a composite reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentScore {
    pub symbol: Symbol,
    pub name: String,
    pub score: f64,
    pub weight: f64,
}

/// Composite index plus the per-instrument breakdown, aligned to the
/// configured instrument order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeReading {
    pub composite: f64,
    pub components: Vec<ComponentScore>,
}

/// Runs the configured indicator over the instrument table and combines the
/// scores into one weighted composite.
pub struct CompositeAggregator {
    config: StressConfig,
    indicator: Box<dyn Indicator>,
}

impl CompositeAggregator {
    /// Aggregator over the rolling-volatility indicator.
    pub fn new(config: StressConfig) -> Self {
        Self::with_indicator(config, Box::new(VolatilityIndicator::default()))
    }

    /// Aggregator over a custom stress indicator.
    pub fn with_indicator(config: StressConfig, indicator: Box<dyn Indicator>) -> Self {
        Self { config, indicator }
    }

    pub fn config(&self) -> &StressConfig {
        &self.config
    }

    /// Score every configured instrument over `range` and combine.
    ///
    /// Never fails: a fetch failure arrives as an empty series (neutral
    /// score), and an indicator error on one instrument is logged and
    /// substituted with the neutral score so a single bad instrument cannot
    /// abort the composite computation.
    pub async fn aggregate(&self, provider: &HistoryProvider, range: &DateRange) -> CompositeReading {
        let mut components = Vec::with_capacity(self.config.len());

        for instrument in self.config.instruments() {
            let series = provider.fetch(instrument.symbol(), range).await;
            let score = match self.indicator.score(&series) {
                Ok(score) => score,
                Err(error) => {
                    tracing::error!(
                        symbol = %instrument.symbol(),
                        indicator = self.indicator.name(),
                        error = %error,
                        "indicator failed; substituting neutral score"
                    );
                    NEUTRAL_SCORE
                }
            };

            components.push(ComponentScore {
                symbol: instrument.symbol().clone(),
                name: instrument.name().to_owned(),
                score,
                weight: instrument.weight(),
            });
        }

        let composite = combine(&components);
        CompositeReading {
            composite,
            components,
        }
    }
}

/// Weighted average of component scores, clamped to [0, 100].
///
/// A non-positive total weight (misconfiguration) falls back to the
/// unweighted arithmetic mean rather than failing.
fn combine(components: &[ComponentScore]) -> f64 {
    if components.is_empty() {
        return NEUTRAL_SCORE;
    }

    let total_weight: f64 = components.iter().map(|c| c.weight).sum();
    let composite = if total_weight > 0.0 {
        components
            .iter()
            .map(|c| c.score * c.weight)
            .sum::<f64>()
            / total_weight
    } else {
        components.iter().map(|c| c.score).sum::<f64>() / components.len() as f64
    };

    composite.max(0.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(symbol: &str, score: f64, weight: f64) -> ComponentScore {
        ComponentScore {
            symbol: Symbol::parse(symbol).expect("symbol must parse"),
            name: symbol.to_owned(),
            score,
            weight,
        }
    }

    #[test]
    fn weighted_average_of_two_components() {
        let components = vec![component("^VIX", 80.0, 0.75), component("GC=F", 40.0, 0.25)];
        assert!((combine(&components) - 70.0).abs() < 1e-12);
    }

    #[test]
    fn weights_need_not_sum_to_one() {
        let normalized = vec![component("^VIX", 80.0, 0.6), component("GC=F", 20.0, 0.4)];
        let scaled = vec![component("^VIX", 80.0, 6.0), component("GC=F", 20.0, 4.0)];
        assert!((combine(&normalized) - combine(&scaled)).abs() < 1e-12);
    }

    #[test]
    fn zero_total_weight_falls_back_to_mean() {
        let components = vec![
            component("^VIX", 90.0, 0.0),
            component("GC=F", 30.0, 0.0),
            component("CL=F", 60.0, 0.0),
        ];
        assert!((combine(&components) - 60.0).abs() < 1e-12);
    }

    #[test]
    fn composite_is_clamped_under_adversarial_scores() {
        let high = vec![component("^VIX", 500.0, 1.0)];
        assert_eq!(combine(&high), 100.0);

        let low = vec![component("^VIX", -500.0, 1.0)];
        assert_eq!(combine(&low), 0.0);
    }

    #[test]
    fn composite_stays_within_component_bounds() {
        let components = vec![
            component("^VIX", 72.0, 0.23),
            component("GC=F", 41.0, 0.10),
            component("CL=F", 55.0, 0.67),
        ];
        let composite = combine(&components);
        assert!(composite >= 41.0);
        assert!(composite <= 72.0);
    }
}
