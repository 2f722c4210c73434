//! In-memory rate source
//!
//! Holds published quotes per currency in a BTreeMap keyed by date. Answers
//! exact-date requests only, exactly like the HTTP source, so the fallback
//! in `lookup_rate` behaves the same offline. Backs the `--rates-file`
//! option and the test suites.

use super::base::{ExchangeQuote, RateSource};
use crate::calendar::DATE_FORMAT;
use crate::currency::Currency;
use crate::error::{InvoiceFxError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::cell::Cell;
use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::str::FromStr;

/// In-memory quote storage
///
/// # Example
/// ```
/// use invoice_fx::currency::Currency;
/// use invoice_fx::data::fx::{InMemoryRateSource, RateSource};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
/// let mut source = InMemoryRateSource::new();
/// source.add_rate(Currency::USD, day, Decimal::new(39432, 4)).unwrap();
///
/// let quote = source.fetch_quote(Currency::USD, day).unwrap();
/// assert_eq!(quote.rate, Decimal::new(39432, 4));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryRateSource {
    /// currency -> (publication date -> mid rate)
    rates: HashMap<Currency, BTreeMap<NaiveDate, Decimal>>,
    /// Number of fetch_quote calls served, hits and misses alike
    requests: Cell<usize>,
}

#[derive(Debug, Deserialize)]
struct RateRow {
    date: String,
    currency: String,
    rate: String,
}

impl InMemoryRateSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single quote
    pub fn add_rate(&mut self, currency: Currency, date: NaiveDate, rate: Decimal) -> Result<()> {
        if rate <= Decimal::ZERO {
            return Err(InvoiceFxError::InvalidData(format!(
                "Exchange rate must be positive, got: {}",
                rate
            )));
        }
        if currency.is_domestic() {
            return Err(InvoiceFxError::InvalidData(format!(
                "{} is the domestic currency and has no quote",
                currency
            )));
        }

        self.rates.entry(currency).or_default().insert(date, rate);
        Ok(())
    }

    /// Load quotes from CSV with a `date,currency,rate` header
    ///
    /// Rows for currencies outside the supported set are skipped with a
    /// warning; any other malformed row fails the whole load.
    pub fn load_from_csv<R: Read>(&mut self, reader: R) -> Result<usize> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let mut count = 0;

        for result in csv_reader.records() {
            let record = result?;
            let line = record.position().map_or(0, |p| p.line());
            let row: RateRow = record.deserialize(Some(&headers))?;

            let Some(currency) = Currency::from_code(&row.currency) else {
                log::warn!("Skipping line {}: unsupported currency {}", line, row.currency);
                continue;
            };
            let date = NaiveDate::parse_from_str(&row.date, DATE_FORMAT).map_err(|e| {
                InvoiceFxError::InvalidData(format!("Invalid date at line {}: {}", line, e))
            })?;
            let rate = Decimal::from_str(&row.rate).map_err(|e| {
                InvoiceFxError::InvalidData(format!("Invalid rate at line {}: {}", line, e))
            })?;

            self.add_rate(currency, date, rate)?;
            count += 1;
        }

        log::debug!("Loaded {} quotes into in-memory rate source", count);
        Ok(count)
    }

    /// Total number of stored quotes
    pub fn num_entries(&self) -> usize {
        self.rates.values().map(|tree| tree.len()).sum()
    }

    /// How many lookups this source has answered
    pub fn requests(&self) -> usize {
        self.requests.get()
    }
}

impl RateSource for InMemoryRateSource {
    fn fetch_quote(&self, currency: Currency, date: NaiveDate) -> Result<ExchangeQuote> {
        self.requests.set(self.requests.get() + 1);
        self.rates
            .get(&currency)
            .and_then(|tree| tree.get(&date))
            .map(|rate| ExchangeQuote::new(currency, date, *rate))
            .ok_or_else(|| InvoiceFxError::RateNotFound {
                currency: currency.code().to_string(),
                date,
            })
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_exact_date_only() {
        let mut source = InMemoryRateSource::new();
        source.add_rate(Currency::EUR, date(2024, 1, 5), dec!(4.348)).unwrap();

        assert!(source.fetch_quote(Currency::EUR, date(2024, 1, 5)).is_ok());
        let miss = source.fetch_quote(Currency::EUR, date(2024, 1, 6)).unwrap_err();
        assert!(miss.is_missing_rate());
        let other = source.fetch_quote(Currency::USD, date(2024, 1, 5)).unwrap_err();
        assert!(other.is_missing_rate());
        assert_eq!(source.requests(), 3);
    }

    #[test]
    fn test_rejects_non_positive_rate() {
        let mut source = InMemoryRateSource::new();
        assert!(source.add_rate(Currency::EUR, date(2024, 1, 5), dec!(0)).is_err());
        assert!(source.add_rate(Currency::EUR, date(2024, 1, 5), dec!(-1.2)).is_err());
        assert_eq!(source.num_entries(), 0);
    }

    #[test]
    fn test_rejects_domestic_quote() {
        let mut source = InMemoryRateSource::new();
        assert!(source.add_rate(Currency::PLN, date(2024, 1, 5), dec!(1)).is_err());
    }

    #[test]
    fn test_load_from_csv() {
        let data = "date,currency,rate\n\
                    # weekend gap follows\n\
                    2024-01-05,EUR,4.3480\n\
                    2024-01-05, usd ,3.9432\n\
                    2024-01-05,CHF,4.6500\n\
                    2024-01-08,EUR,4.3424\n";
        let mut source = InMemoryRateSource::new();
        let count = source.load_from_csv(data.as_bytes()).unwrap();

        assert_eq!(count, 3);
        assert_eq!(source.num_entries(), 3);
        let quote = source.fetch_quote(Currency::USD, date(2024, 1, 5)).unwrap();
        assert_eq!(quote.rate, dec!(3.9432));
    }

    #[test]
    fn test_load_from_csv_bad_rate() {
        let data = "date,currency,rate\n2024-01-05,EUR,abc\n";
        let mut source = InMemoryRateSource::new();
        let err = source.load_from_csv(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_load_from_csv_bad_date() {
        let data = "date,currency,rate\n05.01.2024,EUR,4.34\n";
        let mut source = InMemoryRateSource::new();
        assert!(matches!(
            source.load_from_csv(data.as_bytes()),
            Err(InvoiceFxError::InvalidData(_))
        ));
    }
}
