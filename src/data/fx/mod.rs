//! Foreign Exchange (FX) rate system
//!
//! Provides historical mid-rate lookup with fallback to the latest earlier
//! publication day.
//!
//! # Components
//!
//! - **base**: Core types and traits (ExchangeQuote, RateSource, lookup_rate)
//! - **in_memory**: Exact-date quotes held in memory (offline file, tests)
//! - **exploding**: Testing stub that panics on any quote request
//!
//! The HTTP-backed NBP source lives in `data::sources`.
//!
//! # Example
//!
//! ```rust
//! use invoice_fx::currency::Currency;
//! use invoice_fx::data::fx::{lookup_rate, InMemoryRateSource};
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//!
//! let mut source = InMemoryRateSource::new();
//! let friday = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
//! source.add_rate(Currency::GBP, friday, Decimal::new(50300, 4)).unwrap();
//!
//! // Sunday resolves to Friday's quote
//! let sunday = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
//! let quote = lookup_rate(&source, Currency::GBP, sunday).unwrap();
//! assert_eq!(quote.date, friday);
//! assert_eq!(quote.rate, Decimal::new(50300, 4));
//! ```

pub mod base;
pub mod exploding;
pub mod in_memory;

pub use base::{lookup_rate, ExchangeQuote, RateSource};
pub use exploding::ExplodingRateSource;
pub use in_memory::InMemoryRateSource;
