use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;

use crate::domain::{PricePoint, PriceSeries, Symbol, TradingDate};
use crate::http_client::{HttpClient, HttpRequest, NoopHttpClient};
use crate::source::{HistoryRequest, HistorySource, SourceError};

const CHART_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Yahoo Finance daily-history adapter.
///
/// With a real transport it calls the v8 chart endpoint; with the no-op
/// transport it synthesizes deterministic per-symbol closes so every layer
/// above it can run offline.
#[derive(Clone)]
pub struct YahooHistory {
    http_client: Arc<dyn HttpClient>,
    timeout_ms: u64,
    use_real_api: bool,
}

impl Default for YahooHistory {
    fn default() -> Self {
        Self {
            http_client: Arc::new(NoopHttpClient),
            timeout_ms: 10_000,
            use_real_api: false,
        }
    }
}

impl YahooHistory {
    pub fn with_http_client(http_client: Arc<dyn HttpClient>) -> Self {
        let use_real_api = !http_client.is_mock();
        Self {
            http_client,
            timeout_ms: 10_000,
            use_real_api,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    fn chart_url(&self, req: &HistoryRequest) -> String {
        format!(
            "{}/{}?period1={}&period2={}&interval=1d&events=history",
            CHART_BASE_URL,
            urlencoding::encode(req.symbol.as_str()),
            req.range.start().unix_timestamp(),
            req.range.end().unix_timestamp(),
        )
    }

    async fn fetch_real_history(&self, req: &HistoryRequest) -> Result<PriceSeries, SourceError> {
        let endpoint = self.chart_url(req);
        let request = HttpRequest::get(&endpoint)
            .with_header("referer", "https://finance.yahoo.com/")
            .with_timeout_ms(self.timeout_ms);

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| SourceError::unavailable(format!("yahoo transport error: {}", e.message())))?;

        if response.status == 429 {
            return Err(SourceError::rate_limited("yahoo returned status 429"));
        }
        if !response.is_success() {
            return Err(SourceError::unavailable(format!(
                "yahoo returned status {}",
                response.status
            )));
        }

        parse_chart_body(&response.body, &req.symbol)
    }

    /// Deterministic fixture series: one point per weekday in range, with a
    /// per-symbol base level and a repeating wobble so rolling volatility is
    /// well defined and stable across runs.
    fn fetch_fake_history(&self, req: &HistoryRequest) -> PriceSeries {
        let seed = symbol_seed(&req.symbol);
        let base = 40.0 + (seed % 240) as f64 / 2.0;

        let mut points = Vec::new();
        let mut day = req.range.start();
        let mut index: u64 = 0;
        while day < req.range.end() {
            if !day.is_weekend() {
                let wobble = ((seed.wrapping_add(index.wrapping_mul(7))) % 23) as f64;
                let close = base * (1.0 + (wobble - 11.0) / 100.0);
                points.push(PricePoint::new(day, close));
                index += 1;
            }
            day = TradingDate::new(day.into_inner() + time::Duration::days(1));
        }

        PriceSeries::new(req.symbol.clone(), points)
    }
}

impl HistorySource for YahooHistory {
    fn name(&self) -> &'static str {
        "yahoo"
    }

    fn history<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceSeries, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            if self.use_real_api {
                self.fetch_real_history(&req).await
            } else {
                Ok(self.fetch_fake_history(&req))
            }
        })
    }
}

fn symbol_seed(symbol: &Symbol) -> u64 {
    symbol
        .as_str()
        .bytes()
        .fold(17_u64, |acc, byte| acc.wrapping_mul(31).wrapping_add(byte as u64))
}

fn parse_chart_body(body: &str, symbol: &Symbol) -> Result<PriceSeries, SourceError> {
    let chart_response: YahooChartResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::internal(format!("failed to parse yahoo chart: {e}")))?;

    if let Some(error) = &chart_response.chart.error {
        return Err(SourceError::unavailable(format!(
            "yahoo chart API error: {} ({})",
            error.description, error.code
        )));
    }

    let Some(result) = chart_response.chart.result.first() else {
        // No result and no error: treat as an empty history rather than a fault.
        return Ok(PriceSeries::empty(symbol.clone()));
    };

    let Some(timestamps) = result.timestamp.as_ref() else {
        return Ok(PriceSeries::empty(symbol.clone()));
    };
    let quote = result
        .indicators
        .quote
        .first()
        .ok_or_else(|| SourceError::internal("no quote data in yahoo chart response"))?;

    let mut points = Vec::with_capacity(timestamps.len());
    for (index, &seconds) in timestamps.iter().enumerate() {
        // Null closes mark non-trading sessions; skip them.
        let Some(Some(close)) = quote.close.get(index).copied() else {
            continue;
        };
        if !close.is_finite() {
            continue;
        }
        let date = TradingDate::from_unix_timestamp(seconds)
            .map_err(|e| SourceError::internal(format!("invalid chart timestamp: {e}")))?;
        points.push(PricePoint::new(date, close));
    }

    Ok(PriceSeries::new(symbol.clone(), points))
}

// ============================================================================
// Yahoo chart API response structures
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResponse {
    chart: YahooChartData,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartData {
    #[serde(default)]
    result: Vec<YahooChartResult>,
    #[serde(default)]
    error: Option<YahooChartError>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: YahooChartIndicators,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartIndicators {
    quote: Vec<YahooChartQuote>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartQuote {
    close: Vec<Option<f64>>,
}
