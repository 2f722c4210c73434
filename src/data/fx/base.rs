//! Base FX system - ExchangeQuote, the RateSource trait and the rate lookup

use crate::calendar::previous_day;
use crate::currency::Currency;
use crate::error::{InvoiceFxError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;

/// Mid rate of one currency against the domestic currency on one day
///
/// `rate` is the number of PLN per one unit of `currency`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeQuote {
    pub currency: Currency,
    /// Day the quote was published; may precede the requested day
    pub date: NaiveDate,
    pub rate: Decimal,
    /// Source table number, e.g. "005/A/NBP/2024"
    pub table_no: Option<String>,
}

impl ExchangeQuote {
    pub fn new(currency: Currency, date: NaiveDate, rate: Decimal) -> Self {
        Self {
            currency,
            date,
            rate,
            table_no: None,
        }
    }

    pub fn with_table_no(mut self, table_no: impl Into<String>) -> Self {
        self.table_no = Some(table_no.into());
        self
    }

    /// The domestic currency against itself
    pub fn domestic(date: NaiveDate) -> Self {
        Self::new(Currency::DOMESTIC, date, Decimal::ONE)
    }
}

impl fmt::Display for ExchangeQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "1 {} = {} {} ({})",
            self.currency,
            self.rate,
            Currency::DOMESTIC,
            self.date
        )?;
        if let Some(no) = &self.table_no {
            write!(f, ", table {}", no)?;
        }
        Ok(())
    }
}

/// Trait for fetching exchange quotes
///
/// Implementations answer for the exact date only. A day without a quote
/// must be reported as `InvoiceFxError::RateNotFound`; `lookup_rate` turns
/// that into a search for the previous published day.
pub trait RateSource {
    /// Quote for `currency` published exactly on `date`
    fn fetch_quote(&self, currency: Currency, date: NaiveDate) -> Result<ExchangeQuote>;

    /// Short name used in log output
    fn name(&self) -> &str;
}

impl<S: RateSource + ?Sized> RateSource for &S {
    fn fetch_quote(&self, currency: Currency, date: NaiveDate) -> Result<ExchangeQuote> {
        (**self).fetch_quote(currency, date)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<S: RateSource + ?Sized> RateSource for Box<S> {
    fn fetch_quote(&self, currency: Currency, date: NaiveDate) -> Result<ExchangeQuote> {
        (**self).fetch_quote(currency, date)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Find the quote for `currency` on `date`, or the latest one before it
///
/// Missing days (weekends, bank holidays) are skipped one calendar day at a
/// time with no lower bound; callers keep `date` inside the source's history.
/// Any error other than a missing quote ends the search immediately.
///
/// # Example
/// ```
/// use invoice_fx::currency::Currency;
/// use invoice_fx::data::fx::{lookup_rate, InMemoryRateSource};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let friday = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
/// let saturday = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
///
/// let mut source = InMemoryRateSource::new();
/// source.add_rate(Currency::EUR, friday, Decimal::new(43480, 4)).unwrap();
///
/// let quote = lookup_rate(&source, Currency::EUR, saturday).unwrap();
/// assert_eq!(quote.date, friday);
/// ```
pub fn lookup_rate<S: RateSource + ?Sized>(
    source: &S,
    currency: Currency,
    date: NaiveDate,
) -> Result<ExchangeQuote> {
    if currency.is_domestic() {
        return Ok(ExchangeQuote::domestic(date));
    }

    let mut current = date;
    loop {
        log::debug!("Requesting {} rate for {} from {}", currency, current, source.name());
        match source.fetch_quote(currency, current) {
            Ok(quote) => {
                if current != date {
                    log::info!(
                        "No {} rate on {}, using {} from {}",
                        currency,
                        date,
                        quote.rate,
                        quote.date
                    );
                }
                return Ok(quote);
            }
            Err(e) if e.is_missing_rate() => {
                current = previous_day(current).ok_or_else(|| InvoiceFxError::RateNotFound {
                    currency: currency.code().to_string(),
                    date,
                })?;
                log::debug!("No {} quote, falling back to {}", currency, current);
            }
            Err(e) => return Err(e),
        }
    }
}
