//! Shared fixtures for the behavior test suites.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use stresswatch_core::{
    DateRange, HistoryRequest, HistorySource, Indicator, PricePoint, PriceSeries, ScoreError,
    SourceError, Symbol, TradingDate,
};

pub fn date(value: &str) -> TradingDate {
    TradingDate::parse(value).expect("test date must parse")
}

pub fn range(start: &str, end: &str) -> DateRange {
    DateRange::new(date(start), date(end)).expect("test range must be valid")
}

pub fn symbol(value: &str) -> Symbol {
    Symbol::parse(value).expect("test symbol must parse")
}

/// Series with one point per calendar day starting 2024-01-02.
pub fn daily_series(symbol: &Symbol, closes: &[f64]) -> PriceSeries {
    let first = date("2024-01-02");
    let points = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let day = TradingDate::new(first.into_inner() + time::Duration::days(i as i64));
            PricePoint::new(day, close)
        })
        .collect();
    PriceSeries::new(symbol.clone(), points)
}

/// Alternating price path with enough observations for a full scoring pass.
pub fn choppy_closes(len: usize, base: f64, swing: f64) -> Vec<f64> {
    (0..len)
        .map(|i| base + if i % 2 == 0 { swing } else { -swing })
        .collect()
}

/// In-memory history source serving canned closes per symbol; unknown
/// symbols get an empty series.
#[derive(Default)]
pub struct FixtureSource {
    series: HashMap<String, Vec<f64>>,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, symbol: &str, closes: Vec<f64>) -> Self {
        self.series.insert(symbol.to_owned(), closes);
        self
    }
}

impl HistorySource for FixtureSource {
    fn name(&self) -> &'static str {
        "fixture"
    }

    fn history<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceSeries, SourceError>> + Send + 'a>> {
        let closes = self
            .series
            .get(req.symbol.as_str())
            .cloned()
            .unwrap_or_default();
        Box::pin(async move { Ok(daily_series(&req.symbol, &closes)) })
    }
}

/// Source that always fails, for exercising the fail-soft provider contract.
#[derive(Default)]
pub struct FailingSource;

impl HistorySource for FailingSource {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn history<'a>(
        &'a self,
        _req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceSeries, SourceError>> + Send + 'a>> {
        Box::pin(async move { Err(SourceError::unavailable("fixture outage")) })
    }
}

/// Wrapper counting upstream calls, for cache-behavior assertions.
pub struct CountingSource {
    inner: Arc<dyn HistorySource>,
    calls: Arc<AtomicUsize>,
}

impl CountingSource {
    pub fn new(inner: Arc<dyn HistorySource>) -> Self {
        Self {
            inner,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl HistorySource for CountingSource {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn history<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceSeries, SourceError>> + Send + 'a>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.history(req)
    }
}

/// Indicator returning canned scores per symbol, for aggregation arithmetic.
pub struct StubIndicator {
    scores: HashMap<String, f64>,
    default: f64,
}

impl StubIndicator {
    pub fn new(default: f64) -> Self {
        Self {
            scores: HashMap::new(),
            default,
        }
    }

    pub fn with_score(mut self, symbol: &str, score: f64) -> Self {
        self.scores.insert(symbol.to_owned(), score);
        self
    }
}

impl Indicator for StubIndicator {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn score(&self, series: &PriceSeries) -> Result<f64, ScoreError> {
        Ok(*self
            .scores
            .get(series.symbol.as_str())
            .unwrap_or(&self.default))
    }
}

/// Indicator that fails for one symbol and scores the rest neutrally, for
/// per-instrument isolation tests.
pub struct FailingIndicator {
    fail_for: String,
    fallback: f64,
}

impl FailingIndicator {
    pub fn new(fail_for: &str, fallback: f64) -> Self {
        Self {
            fail_for: fail_for.to_owned(),
            fallback,
        }
    }
}

impl Indicator for FailingIndicator {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn score(&self, series: &PriceSeries) -> Result<f64, ScoreError> {
        if series.symbol.as_str() == self.fail_for {
            return Err(ScoreError::Indicator {
                indicator: "failing",
                symbol: series.symbol.as_str().to_owned(),
                message: "fixture fault".to_owned(),
            });
        }
        Ok(self.fallback)
    }
}
