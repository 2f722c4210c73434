//! Invoice and payment records

use crate::currency::{Currency, Money};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;

/// An issued invoice; fixed once entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invoice {
    pub date: NaiveDate,
    pub value: Decimal,
    pub currency: Currency,
}

impl Invoice {
    pub fn new(date: NaiveDate, value: Decimal, currency: Currency) -> Self {
        Self {
            date,
            value,
            currency,
        }
    }

    pub fn amount(&self) -> Money {
        Money::new(self.value, self.currency)
    }

    pub fn is_domestic(&self) -> bool {
        self.currency.is_domestic()
    }

    /// Currencies a payment against this invoice may be made in
    pub fn payment_currencies(&self) -> Vec<Currency> {
        self.currency.payment_currencies()
    }

    pub fn accepts(&self, payment: &Payment) -> bool {
        payment.date >= self.date && self.payment_currencies().contains(&payment.currency)
    }
}

impl fmt::Display for Invoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.date, self.amount())
    }
}

/// A single payment towards an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payment {
    pub date: NaiveDate,
    pub value: Decimal,
    pub currency: Currency,
}

impl Payment {
    pub fn new(date: NaiveDate, value: Decimal, currency: Currency) -> Self {
        Self {
            date,
            value,
            currency,
        }
    }

    pub fn amount(&self) -> Money {
        Money::new(self.value, self.currency)
    }
}

impl fmt::Display for Payment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.date, self.amount())
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
    fn test_invoice_display() {
        let invoice = Invoice::new(date(2024, 1, 5), dec!(1000), Currency::PLN);
        assert_eq!(invoice.to_string(), "2024-01-05, 1000.00 PLN");
    }

    #[test]
    fn test_foreign_invoice_accepts() {
        let invoice = Invoice::new(date(2024, 1, 5), dec!(100), Currency::EUR);
        assert!(invoice.accepts(&Payment::new(date(2024, 1, 5), dec!(1), Currency::EUR)));
        assert!(invoice.accepts(&Payment::new(date(2024, 2, 1), dec!(1), Currency::PLN)));
        assert!(!invoice.accepts(&Payment::new(date(2024, 2, 1), dec!(1), Currency::USD)));
        assert!(!invoice.accepts(&Payment::new(date(2024, 1, 4), dec!(1), Currency::EUR)));
    }

    #[test]
    fn test_domestic_invoice_accepts_any_currency() {
        let invoice = Invoice::new(date(2024, 1, 5), dec!(100), Currency::PLN);
        for currency in Currency::all() {
            assert!(invoice.accepts(&Payment::new(date(2024, 1, 5), dec!(1), currency)));
        }
    }
}
