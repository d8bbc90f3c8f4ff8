//! # Stresswatch Core
//!
//! Scoring engine for the composite market stress index: provider boundary,
//! rolling-volatility stress scoring, weighted aggregation and day-over-day
//! comparison.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | History source adapters (Yahoo Finance) |
//! | [`cache`] | Bounded LRU cache of fetched price series |
//! | [`comparative`] | Prior-session comparison runner |
//! | [`composite`] | Weighted composite aggregation |
//! | [`domain`] | Domain models (Symbol, TradingDate, PriceSeries) |
//! | [`error`] | Validation errors |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`markets`] | Instrument/weight configuration |
//! | [`provider`] | Fail-soft caching history provider |
//! | [`scoring`] | Indicator contract and volatility scoring |
//! | [`source`] | History source trait and request types |
//!
//! ## Error handling
//!
//! The scoring pipeline is infallible by construction: fetch failures become
//! empty series, empty or degenerate series become the neutral score 50.0,
//! and a failing indicator is isolated per instrument. Hard `Result`s exist
//! only at the validation boundary (symbols, dates, weights) and inside the
//! transport, where the provider absorbs them.

pub mod adapters;
pub mod cache;
pub mod comparative;
pub mod composite;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod markets;
pub mod provider;
pub mod scoring;
pub mod source;

// Re-export commonly used types at crate root for convenience

pub use adapters::YahooHistory;

pub use cache::{SeriesCache, DEFAULT_CACHE_CAPACITY};

pub use comparative::{
    previous_business_day, ComparativePair, ComparativeRunner, DEFAULT_LOOKBACK_DAYS,
};

pub use composite::{ComponentScore, CompositeAggregator, CompositeReading};

pub use domain::{DateRange, PricePoint, PriceSeries, Symbol, TradingDate};

pub use error::ValidationError;

pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient,
};

pub use markets::{Instrument, StressConfig};

pub use provider::HistoryProvider;

pub use scoring::{
    scale_with_history, Indicator, ScoreError, VolatilityIndicator, MIN_OBSERVATIONS,
    NEUTRAL_SCORE, STD_FLOOR, VOLATILITY_WINDOW,
};

pub use source::{HistoryRequest, HistorySource, SourceError, SourceErrorKind};
