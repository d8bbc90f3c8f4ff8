//! Day-over-day comparison of composite readings.

use serde::{Deserialize, Serialize};
use time::Weekday;

use crate::composite::{CompositeAggregator, CompositeReading};
use crate::domain::{DateRange, TradingDate};
use crate::provider::HistoryProvider;

/// Calendar days in the standard evaluation lookback (three years).
pub const DEFAULT_LOOKBACK_DAYS: i64 = 3 * 365;

/// Composite readings for the target range and for the equivalent range
/// ending on the prior business day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparativePair {
    pub current: CompositeReading,
    pub previous: CompositeReading,
    /// End date of the comparison range.
    pub previous_session: TradingDate,
}

impl ComparativePair {
    /// Directional day-over-day change of the composite.
    pub fn delta(&self) -> f64 {
        self.current.composite - self.previous.composite
    }
}

/// Last weekday strictly before `date`.
///
/// Weekday-aware only: exchange holiday calendars are not modeled, so a
/// Monday maps to the preceding Friday but a holiday Monday is not skipped.
pub fn previous_business_day(date: TradingDate) -> TradingDate {
    let mut day = date.previous_day();
    while matches!(day.weekday(), Weekday::Saturday | Weekday::Sunday) {
        day = day.previous_day();
    }
    day
}

/// Runs the aggregator for a target range and the prior session's
/// equivalent range.
pub struct ComparativeRunner {
    aggregator: CompositeAggregator,
}

impl ComparativeRunner {
    pub fn new(aggregator: CompositeAggregator) -> Self {
        Self { aggregator }
    }

    pub fn aggregator(&self) -> &CompositeAggregator {
        &self.aggregator
    }

    /// Aggregate `range` and the same-length lookback ending on the prior
    /// business day, with two independent passes (the provider cache makes
    /// the overlap cheap). The delta itself is never smoothed or cached.
    pub async fn compare_to_previous_session(
        &self,
        provider: &HistoryProvider,
        range: &DateRange,
    ) -> ComparativePair {
        let previous_session = previous_business_day(range.end());
        let previous_range = DateRange::trailing(previous_session, DEFAULT_LOOKBACK_DAYS);

        let current = self.aggregator.aggregate(provider, range).await;
        let previous = self.aggregator.aggregate(provider, &previous_range).await;

        ComparativePair {
            current,
            previous,
            previous_session,
        }
    }
}
