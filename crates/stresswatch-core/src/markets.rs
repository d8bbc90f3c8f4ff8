//! Instrument table configuration.

use serde::{Deserialize, Serialize};

use crate::domain::Symbol;
use crate::ValidationError;

/// One tracked instrument: ticker, display name, composite weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    symbol: Symbol,
    name: String,
    weight: f64,
}

impl Instrument {
    pub fn new(
        symbol: Symbol,
        name: impl Into<String>,
        weight: f64,
    ) -> Result<Self, ValidationError> {
        if !weight.is_finite() {
            return Err(ValidationError::NonFiniteWeight {
                symbol: symbol.as_str().to_owned(),
            });
        }
        if weight < 0.0 {
            return Err(ValidationError::NegativeWeight {
                symbol: symbol.as_str().to_owned(),
            });
        }

        Ok(Self {
            symbol,
            name: name.into(),
            weight,
        })
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn weight(&self) -> f64 {
        self.weight
    }
}

/// Immutable, ordered instrument table handed to the aggregator.
///
/// The order is the presentation order: component vectors, table output and
/// the CSV artifact all follow it. Weights need not sum to 1; the
/// aggregator normalizes by the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressConfig {
    instruments: Vec<Instrument>,
}

impl StressConfig {
    pub fn new(instruments: Vec<Instrument>) -> Result<Self, ValidationError> {
        if instruments.is_empty() {
            return Err(ValidationError::EmptyInstrumentTable);
        }
        Ok(Self { instruments })
    }

    /// The eight-market table the index was designed around: FX and dollar
    /// stress, safe-haven and commodity complexes, and the two implied
    /// volatility gauges carrying the largest weights.
    pub fn default_markets() -> Self {
        let table = [
            ("EURUSD=X", "EUR/USD", 0.07),
            ("GC=F", "Gold", 0.10),
            ("CL=F", "Crude Oil", 0.10),
            ("DX-Y.NYB", "DXY", 0.05),
            ("^BCOM", "Bloomberg Commodity Index", 0.10),
            ("^SPGSCI", "S&P GSCI", 0.10),
            ("^VIX", "VIX", 0.23),
            ("^GVZ", "GVZ", 0.25),
        ];

        let instruments = table
            .into_iter()
            .map(|(symbol, name, weight)| {
                let symbol = Symbol::parse(symbol).expect("default market symbol must be valid");
                Instrument::new(symbol, name, weight).expect("default market weight must be valid")
            })
            .collect();

        Self { instruments }
    }

    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.instruments.iter().map(Instrument::weight).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_has_eight_markets_in_fixed_order() {
        let config = StressConfig::default_markets();
        assert_eq!(config.len(), 8);

        let symbols: Vec<&str> = config
            .instruments()
            .iter()
            .map(|i| i.symbol().as_str())
            .collect();
        assert_eq!(
            symbols,
            vec!["EURUSD=X", "GC=F", "CL=F", "DX-Y.NYB", "^BCOM", "^SPGSCI", "^VIX", "^GVZ"]
        );
    }

    #[test]
    fn default_weights_sum_to_one() {
        let config = StressConfig::default_markets();
        assert!((config.total_weight() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_negative_weight() {
        let symbol = Symbol::parse("^VIX").expect("must parse");
        let err = Instrument::new(symbol, "VIX", -0.1).expect_err("must fail");
        assert!(matches!(err, ValidationError::NegativeWeight { .. }));
    }

    #[test]
    fn rejects_non_finite_weight() {
        let symbol = Symbol::parse("^VIX").expect("must parse");
        let err = Instrument::new(symbol, "VIX", f64::NAN).expect_err("must fail");
        assert!(matches!(err, ValidationError::NonFiniteWeight { .. }));
    }

    #[test]
    fn rejects_empty_table() {
        let err = StressConfig::new(Vec::new()).expect_err("must fail");
        assert!(matches!(err, ValidationError::EmptyInstrumentTable));
    }

    #[test]
    fn zero_weight_is_allowed() {
        let symbol = Symbol::parse("GC=F").expect("must parse");
        let instrument = Instrument::new(symbol, "Gold", 0.0).expect("zero weight is valid");
        assert_eq!(instrument.weight(), 0.0);
    }
}
