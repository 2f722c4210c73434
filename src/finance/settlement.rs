//! Settlement of a single payment against an invoice
//!
//! Two regimes, picked by the invoice currency:
//!
//! - **Domestic invoice**: payments in any currency. Foreign payments are
//!   converted at the payment-day rate (`value * rate`).
//! - **Foreign invoice**: payments in the invoice currency or in PLN.
//!   PLN payments are converted at the invoice-currency rate of the payment
//!   day (`value / rate`). Payments in the invoice currency reduce the
//!   balance as they are and additionally report the exchange rate
//!   difference `value * (payment_rate - invoice_rate)` in PLN. That
//!   difference is informational and never touches the balance.

use crate::currency::{round_amount, Currency, Money};
use crate::data::fx::{lookup_rate, ExchangeQuote, RateSource};
use crate::error::{InvoiceFxError, Result};
use crate::types::{Invoice, Payment};
use rust_decimal::Decimal;
use std::fmt;

/// How one payment affects the invoice balance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// Same currency as the invoice, no rate involved
    Direct { payment: Payment },

    /// Converted into the invoice currency through `quote`
    Converted {
        payment: Payment,
        quote: ExchangeQuote,
        converted: Money,
    },

    /// Foreign invoice paid in its own currency; the balance takes the raw
    /// value, `difference` is reported in PLN
    ExchangeDifference {
        payment: Payment,
        invoice_quote: ExchangeQuote,
        payment_quote: ExchangeQuote,
        difference: Money,
    },
}

impl Settlement {
    pub fn payment(&self) -> &Payment {
        match self {
            Settlement::Direct { payment }
            | Settlement::Converted { payment, .. }
            | Settlement::ExchangeDifference { payment, .. } => payment,
        }
    }

    /// Amount, in invoice currency, that comes off the balance
    pub fn applied(&self) -> Decimal {
        match self {
            Settlement::Direct { payment } | Settlement::ExchangeDifference { payment, .. } => {
                payment.value
            }
            Settlement::Converted { converted, .. } => converted.amount,
        }
    }

    /// Exchange rate gain (positive) or loss (negative), if any
    pub fn difference(&self) -> Option<Money> {
        match self {
            Settlement::ExchangeDifference { difference, .. } => Some(*difference),
            _ => None,
        }
    }
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Settlement::Direct { payment } => {
                write!(f, "Applied {} without conversion", payment.amount())
            }
            Settlement::Converted {
                payment,
                quote,
                converted,
            } => write!(
                f,
                "Converted {} to {} using rate {} {}/{} from {}",
                payment.amount(),
                converted,
                quote.rate,
                Currency::DOMESTIC,
                quote.currency,
                quote.date
            ),
            Settlement::ExchangeDifference {
                invoice_quote,
                payment_quote,
                difference,
                ..
            } => write!(
                f,
                "Exchange rate difference: {} (invoice rate {} from {}, payment rate {} from {})",
                difference,
                invoice_quote.rate,
                invoice_quote.date,
                payment_quote.rate,
                payment_quote.date
            ),
        }
    }
}

/// Work out how `payment` settles against `invoice`
///
/// Rates are looked up fresh for every call. Converted amounts and the
/// difference are rounded to the target currency's minor units.
pub fn settle_payment<S: RateSource + ?Sized>(
    source: &S,
    invoice: &Invoice,
    payment: &Payment,
) -> Result<Settlement> {
    if payment.date < invoice.date {
        return Err(InvoiceFxError::InvalidData(format!(
            "Payment dated {} precedes invoice dated {}",
            payment.date, invoice.date
        )));
    }

    match (invoice.is_domestic(), payment.currency == invoice.currency) {
        (true, true) => Ok(Settlement::Direct { payment: *payment }),

        (true, false) => {
            let quote = lookup_rate(source, payment.currency, payment.date)?;
            let converted = payment
                .value
                .checked_mul(quote.rate)
                .ok_or_else(|| overflow(payment, &quote))?;
            let converted = round_amount(converted, invoice.currency);
            Ok(Settlement::Converted {
                payment: *payment,
                quote,
                converted: Money::new(converted, invoice.currency),
            })
        }

        (false, true) => {
            let invoice_quote = lookup_rate(source, invoice.currency, invoice.date)?;
            let payment_quote = lookup_rate(source, payment.currency, payment.date)?;
            let difference = payment_quote
                .rate
                .checked_sub(invoice_quote.rate)
                .and_then(|movement| payment.value.checked_mul(movement))
                .ok_or_else(|| overflow(payment, &payment_quote))?;
            let difference = round_amount(difference, Currency::DOMESTIC);
            Ok(Settlement::ExchangeDifference {
                payment: *payment,
                invoice_quote,
                payment_quote,
                difference: Money::new(difference, Currency::DOMESTIC),
            })
        }

        (false, false) if payment.currency.is_domestic() => {
            let quote = lookup_rate(source, invoice.currency, payment.date)?;
            let converted = payment.value.checked_div(quote.rate).ok_or_else(|| {
                InvoiceFxError::InvalidData(format!(
                    "Cannot convert with rate {} for {}",
                    quote.rate, quote.currency
                ))
            })?;
            Ok(Settlement::Converted {
                payment: *payment,
                quote,
                converted: Money::new(round_amount(converted, invoice.currency), invoice.currency),
            })
        }

        (false, false) => Err(InvoiceFxError::InvalidData(format!(
            "An invoice in {} cannot be paid in {}",
            invoice.currency, payment.currency
        ))),
    }
}

fn overflow(payment: &Payment, quote: &ExchangeQuote) -> InvoiceFxError {
    InvoiceFxError::InvalidData(format!(
        "Payment of {} is too large to convert at rate {} PLN/{}",
        payment.amount(),
        quote.rate,
        quote.currency
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fx::{ExplodingRateSource, InMemoryRateSource};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn source() -> InMemoryRateSource {
        let mut source = InMemoryRateSource::new();
        source.add_rate(Currency::EUR, date(2024, 1, 5), dec!(4.50)).unwrap();
        source.add_rate(Currency::EUR, date(2024, 2, 9), dec!(4.30)).unwrap();
        source.add_rate(Currency::USD, date(2024, 2, 9), dec!(4.00)).unwrap();
        source
    }

    #[test]
    fn test_domestic_same_currency_needs_no_rate() {
        let invoice = Invoice::new(date(2024, 1, 5), dec!(1000), Currency::PLN);
        let payment = Payment::new(date(2024, 1, 8), dec!(400), Currency::PLN);
        let settlement = settle_payment(&ExplodingRateSource::new(), &invoice, &payment).unwrap();
        assert_eq!(settlement, Settlement::Direct { payment });
        assert_eq!(settlement.applied(), dec!(400));
    }

    #[test]
    fn test_domestic_invoice_foreign_payment_multiplies() {
        let invoice = Invoice::new(date(2024, 1, 5), dec!(1000), Currency::PLN);
        // Saturday, falls back to Friday's 4.00
        let payment = Payment::new(date(2024, 2, 10), dec!(100), Currency::USD);
        let settlement = settle_payment(&source(), &invoice, &payment).unwrap();

        assert_eq!(settlement.applied(), dec!(400.00));
        match settlement {
            Settlement::Converted { quote, converted, .. } => {
                assert_eq!(quote.date, date(2024, 2, 9));
                assert_eq!(converted.currency, Currency::PLN);
            }
            other => panic!("unexpected settlement {:?}", other),
        }
    }

    #[test]
    fn test_foreign_invoice_domestic_payment_divides() {
        let invoice = Invoice::new(date(2024, 1, 5), dec!(100), Currency::USD);
        let payment = Payment::new(date(2024, 2, 9), dec!(400), Currency::PLN);
        let settlement = settle_payment(&source(), &invoice, &payment).unwrap();
        assert_eq!(settlement.applied(), dec!(100));
        assert!(settlement.difference().is_none());
    }

    #[test]
    fn test_foreign_same_currency_reports_difference() {
        let invoice = Invoice::new(date(2024, 1, 5), dec!(100), Currency::EUR);
        let payment = Payment::new(date(2024, 2, 9), dec!(100), Currency::EUR);
        let settlement = settle_payment(&source(), &invoice, &payment).unwrap();

        // balance moves by the raw EUR value, not by the difference
        assert_eq!(settlement.applied(), dec!(100));
        assert_eq!(
            settlement.difference(),
            Some(Money::new(dec!(-20.00), Currency::PLN))
        );
        assert_eq!(
            settlement.to_string(),
            "Exchange rate difference: -20.00 PLN (invoice rate 4.50 from 2024-01-05, payment rate 4.30 from 2024-02-09)"
        );
    }

    #[test]
    fn test_conversion_rounds_to_minor_units() {
        let mut source = InMemoryRateSource::new();
        source.add_rate(Currency::USD, date(2024, 2, 9), dec!(3.9432)).unwrap();
        let invoice = Invoice::new(date(2024, 1, 5), dec!(100), Currency::USD);
        let payment = Payment::new(date(2024, 2, 9), dec!(100), Currency::PLN);

        let settlement = settle_payment(&source, &invoice, &payment).unwrap();
        // 100 / 3.9432 = 25.3601...
        assert_eq!(settlement.applied(), dec!(25.36));
    }

    #[test]
    fn test_conversion_overflow_is_an_error() {
        let invoice = Invoice::new(date(2024, 1, 5), dec!(1000), Currency::PLN);
        let payment = Payment::new(date(2024, 2, 9), Decimal::MAX, Currency::USD);
        let err = settle_payment(&source(), &invoice, &payment).unwrap_err();
        assert!(matches!(err, InvoiceFxError::InvalidData(_)));
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_difference_overflow_is_an_error() {
        let mut source = InMemoryRateSource::new();
        source.add_rate(Currency::EUR, date(2024, 1, 5), dec!(1.00)).unwrap();
        source.add_rate(Currency::EUR, date(2024, 2, 9), dec!(3.00)).unwrap();
        let invoice = Invoice::new(date(2024, 1, 5), Decimal::MAX, Currency::EUR);
        let payment = Payment::new(date(2024, 2, 9), Decimal::MAX, Currency::EUR);
        assert!(matches!(
            settle_payment(&source, &invoice, &payment),
            Err(InvoiceFxError::InvalidData(_))
        ));
    }

    #[test]
    fn test_cross_foreign_payment_rejected() {
        let invoice = Invoice::new(date(2024, 1, 5), dec!(100), Currency::EUR);
        let payment = Payment::new(date(2024, 2, 9), dec!(100), Currency::USD);
        let err = settle_payment(&source(), &invoice, &payment).unwrap_err();
        assert!(matches!(err, InvoiceFxError::InvalidData(_)));
    }

    #[test]
    fn test_payment_before_invoice_rejected() {
        let invoice = Invoice::new(date(2024, 1, 5), dec!(100), Currency::PLN);
        let payment = Payment::new(date(2024, 1, 4), dec!(100), Currency::PLN);
        assert!(settle_payment(&ExplodingRateSource::new(), &invoice, &payment).is_err());
    }

    #[test]
    fn test_converted_display() {
        let invoice = Invoice::new(date(2024, 1, 5), dec!(1000), Currency::PLN);
        let payment = Payment::new(date(2024, 2, 9), dec!(100), Currency::USD);
        let settlement = settle_payment(&source(), &invoice, &payment).unwrap();
        assert_eq!(
            settlement.to_string(),
            "Converted 100.00 USD to 400.00 PLN using rate 4.00 PLN/USD from 2024-02-09"
        );
    }
}
