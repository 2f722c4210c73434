//! Exploding rate source - testing stub
//!
//! Panics on any quote request. Used to prove that a flow settles without
//! touching the rate source, e.g. a PLN invoice paid in PLN.

use super::base::{ExchangeQuote, RateSource};
use crate::currency::Currency;
use crate::error::Result;
use chrono::NaiveDate;

/// Exploding rate source
///
/// # Example
/// ```should_panic
/// use invoice_fx::currency::Currency;
/// use invoice_fx::data::fx::{ExplodingRateSource, RateSource};
/// use chrono::NaiveDate;
///
/// let source = ExplodingRateSource::new();
/// let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
///
/// // This will panic!
/// source.fetch_quote(Currency::EUR, day).unwrap();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplodingRateSource {
    /// Custom panic message
    message: Option<&'static str>,
}

impl ExplodingRateSource {
    pub fn new() -> Self {
        Self { message: None }
    }

    pub fn with_message(message: &'static str) -> Self {
        Self {
            message: Some(message),
        }
    }

    fn panic_message(&self) -> &'static str {
        self.message
            .unwrap_or("Exchange rate access not allowed! This session should need no conversion.")
    }
}

impl RateSource for ExplodingRateSource {
    fn fetch_quote(&self, currency: Currency, date: NaiveDate) -> Result<ExchangeQuote> {
        panic!(
            "{}\n\nAttempted lookup: {} on {}",
            self.panic_message(),
            currency,
            date
        );
    }

    fn name(&self) -> &str {
        "exploding"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fx::lookup_rate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
    }

    #[test]
    fn test_domestic_lookup_allowed() {
        let source = ExplodingRateSource::new();
        let quote = lookup_rate(&source, Currency::PLN, day()).unwrap();
        assert_eq!(quote.currency, Currency::PLN);
    }

    #[test]
    #[should_panic(expected = "Exchange rate access not allowed")]
    fn test_foreign_lookup_panics() {
        let source = ExplodingRateSource::new();
        let _ = lookup_rate(&source, Currency::EUR, day());
    }

    #[test]
    #[should_panic(expected = "Custom error message")]
    fn test_custom_message() {
        let source = ExplodingRateSource::with_message("Custom error message");
        let _ = source.fetch_quote(Currency::USD, day());
    }
}
