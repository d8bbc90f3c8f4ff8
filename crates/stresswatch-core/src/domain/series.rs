use serde::{Deserialize, Serialize};

use crate::domain::date::TradingDate;
use crate::domain::symbol::Symbol;

/// One daily observation: calendar date and closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: TradingDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: TradingDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Time-ordered daily closing prices for one instrument.
///
/// A series may be empty: the provider boundary converts fetch failures into
/// empty series, and scoring treats "no data" as a valid degenerate input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: Symbol,
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(symbol: Symbol, mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|point| point.date);
        Self { symbol, points }
    }

    pub fn empty(symbol: Symbol) -> Self {
        Self {
            symbol,
            points: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Closing prices in time order.
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.close).collect()
    }
}
