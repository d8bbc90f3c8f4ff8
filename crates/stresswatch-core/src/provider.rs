//! Fail-soft history provider.

use std::sync::Arc;

use crate::cache::SeriesCache;
use crate::domain::{DateRange, PriceSeries, Symbol};
use crate::source::{HistoryRequest, HistorySource};

/// Caching, fail-soft front of a [`HistorySource`].
///
/// `fetch` never fails: any source error is logged and converted into an
/// empty series, so downstream scoring treats "no data" as a valid
/// degenerate input instead of a fatal condition. Results (including the
/// empty series recorded for a failed fetch — there are no retry loops) are
/// memoized per (symbol, start, end) for the lifetime of this instance.
#[derive(Clone)]
pub struct HistoryProvider {
    source: Arc<dyn HistorySource>,
    cache: SeriesCache,
}

impl HistoryProvider {
    pub fn new(source: Arc<dyn HistorySource>) -> Self {
        Self {
            source,
            cache: SeriesCache::with_default_capacity(),
        }
    }

    pub fn with_cache(source: Arc<dyn HistorySource>, cache: SeriesCache) -> Self {
        Self { source, cache }
    }

    pub async fn fetch(&self, symbol: &Symbol, range: &DateRange) -> PriceSeries {
        let request = HistoryRequest::new(symbol.clone(), *range);

        if let Some(hit) = self.cache.get(&request).await {
            tracing::debug!(symbol = %symbol, source = self.source.name(), "history cache hit");
            return hit;
        }

        let series = match self.source.history(request.clone()).await {
            Ok(series) => {
                tracing::debug!(
                    symbol = %symbol,
                    source = self.source.name(),
                    points = series.len(),
                    "history fetched"
                );
                series
            }
            Err(error) => {
                tracing::warn!(
                    symbol = %symbol,
                    source = self.source.name(),
                    error = %error,
                    "history fetch failed; substituting empty series"
                );
                PriceSeries::empty(symbol.clone())
            }
        };

        self.cache.put(request, series.clone()).await;
        series
    }
}
