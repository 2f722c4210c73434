//! Exchange rate data
//!
//! `fx` holds the quote types, the `RateSource` trait and the fallback
//! lookup; `sources` holds the network-backed implementations.

pub mod fx;
pub mod sources;

pub use fx::{lookup_rate, ExchangeQuote, RateSource};
