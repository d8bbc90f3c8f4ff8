//! Bounded in-memory caching of fetched price series.

use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::Arc;

use crate::domain::PriceSeries;
use crate::source::HistoryRequest;

/// Default capacity, sized to comfortably hold two comparative passes over
/// the eight-instrument table.
pub const DEFAULT_CACHE_CAPACITY: usize = 32;

#[derive(Debug)]
struct CacheInner {
    map: HashMap<HistoryRequest, PriceSeries>,
    // Recency order, least recently used at the front.
    order: VecDeque<HistoryRequest>,
    capacity: usize,
}

impl CacheInner {
    fn new(capacity: usize) -> Self {
        Self {
            map: HashMap::new(),
            order: VecDeque::new(),
            capacity,
        }
    }

    fn touch(&mut self, key: &HistoryRequest) {
        if let Some(position) = self.order.iter().position(|entry| entry == key) {
            self.order.remove(position);
        }
        self.order.push_back(key.clone());
    }

    fn get(&mut self, key: &HistoryRequest) -> Option<PriceSeries> {
        let hit = self.map.get(key).cloned();
        if hit.is_some() {
            self.touch(key);
        }
        hit
    }

    fn put(&mut self, key: HistoryRequest, series: PriceSeries) {
        if self.capacity == 0 {
            return;
        }

        if !self.map.contains_key(&key) && self.map.len() == self.capacity {
            if let Some(evicted) = self.order.pop_front() {
                self.map.remove(&evicted);
            }
        }

        self.touch(&key);
        self.map.insert(key, series);
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

/// Fixed-capacity LRU cache keyed by (symbol, start, end).
///
/// Lifetime is scoped to one provider instance; nothing persists between
/// process runs. Safe for one aggregation pass to read/write through the
/// internal lock, including concurrent inserts for distinct keys.
#[derive(Debug, Clone)]
pub struct SeriesCache {
    inner: Arc<tokio::sync::Mutex<CacheInner>>,
}

impl SeriesCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(tokio::sync::Mutex::new(CacheInner::new(capacity))),
        }
    }

    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }

    /// Disabled cache: every lookup misses, every insert is a no-op.
    pub fn disabled() -> Self {
        Self::new(0)
    }

    pub async fn get(&self, key: &HistoryRequest) -> Option<PriceSeries> {
        let mut store = self.inner.lock().await;
        store.get(key)
    }

    pub async fn put(&self, key: HistoryRequest, series: PriceSeries) {
        let mut store = self.inner.lock().await;
        store.put(key, series);
    }

    pub async fn len(&self) -> usize {
        let store = self.inner.lock().await;
        store.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DateRange, Symbol, TradingDate};

    fn key(symbol: &str, start: &str, end: &str) -> HistoryRequest {
        HistoryRequest::new(
            Symbol::parse(symbol).expect("symbol must parse"),
            DateRange::new(
                TradingDate::parse(start).expect("date must parse"),
                TradingDate::parse(end).expect("date must parse"),
            )
            .expect("range must be valid"),
        )
    }

    fn series_for(key: &HistoryRequest) -> PriceSeries {
        PriceSeries::empty(key.symbol.clone())
    }

    #[tokio::test]
    async fn basic_put_and_get() {
        let cache = SeriesCache::new(4);
        let vix = key("^VIX", "2025-01-01", "2025-02-01");

        assert!(cache.get(&vix).await.is_none());
        cache.put(vix.clone(), series_for(&vix)).await;
        assert!(cache.get(&vix).await.is_some());
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn distinct_ranges_are_distinct_keys() {
        let cache = SeriesCache::new(4);
        let january = key("^VIX", "2025-01-01", "2025-02-01");
        let february = key("^VIX", "2025-02-01", "2025-03-01");

        cache.put(january.clone(), series_for(&january)).await;
        assert!(cache.get(&february).await.is_none());
    }

    #[tokio::test]
    async fn evicts_least_recently_used_at_capacity() {
        let cache = SeriesCache::new(2);
        let vix = key("^VIX", "2025-01-01", "2025-02-01");
        let gold = key("GC=F", "2025-01-01", "2025-02-01");
        let oil = key("CL=F", "2025-01-01", "2025-02-01");

        cache.put(vix.clone(), series_for(&vix)).await;
        cache.put(gold.clone(), series_for(&gold)).await;

        // Touch VIX so gold becomes the eviction candidate.
        assert!(cache.get(&vix).await.is_some());

        cache.put(oil.clone(), series_for(&oil)).await;
        assert_eq!(cache.len().await, 2);
        assert!(cache.get(&gold).await.is_none());
        assert!(cache.get(&vix).await.is_some());
        assert!(cache.get(&oil).await.is_some());
    }

    #[tokio::test]
    async fn overwriting_existing_key_does_not_evict() {
        let cache = SeriesCache::new(2);
        let vix = key("^VIX", "2025-01-01", "2025-02-01");
        let gold = key("GC=F", "2025-01-01", "2025-02-01");

        cache.put(vix.clone(), series_for(&vix)).await;
        cache.put(gold.clone(), series_for(&gold)).await;
        cache.put(vix.clone(), series_for(&vix)).await;

        assert_eq!(cache.len().await, 2);
        assert!(cache.get(&gold).await.is_some());
    }

    #[tokio::test]
    async fn disabled_cache_never_stores() {
        let cache = SeriesCache::disabled();
        let vix = key("^VIX", "2025-01-01", "2025-02-01");

        cache.put(vix.clone(), series_for(&vix)).await;
        assert!(cache.get(&vix).await.is_none());
        assert!(cache.is_empty().await);
    }
}
