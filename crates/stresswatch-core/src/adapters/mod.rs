//! History source adapters.

mod yahoo;

pub use yahoo::YahooHistory;
