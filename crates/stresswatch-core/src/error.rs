use thiserror::Error;

/// Validation and contract errors exposed by `stresswatch-core`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("date must be YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },
    #[error("date range start '{start}' must be before end '{end}'")]
    InvalidDateRange { start: String, end: String },

    #[error("instrument '{symbol}' weight must be finite")]
    NonFiniteWeight { symbol: String },
    #[error("instrument '{symbol}' weight must be non-negative")]
    NegativeWeight { symbol: String },
    #[error("instrument table cannot be empty")]
    EmptyInstrumentTable,
}
