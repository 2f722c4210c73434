//! Input validation for console answers
//!
//! Each parser turns one raw line into a value or an `InputRejection`. The
//! rejection's message is shown to the user before asking again; it is never
//! a program error.

use crate::calendar::{RangeViolation, SupportedRange, DATE_FORMAT};
use crate::currency::Currency;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

/// Why an answer was not accepted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputRejection {
    #[error("Invalid amount: {0:?}")]
    NotANumber(String),

    #[error("The amount is negative")]
    NegativeAmount,

    #[error("The amount is too large")]
    AmountTooLarge,

    #[error("Invalid currency: {0:?}")]
    UnknownCurrency(String),

    #[error("Invalid date format, expected YYYY-MM-DD")]
    BadDateFormat,

    #[error("Dates earlier than {0} are not supported")]
    BeforeHistory(NaiveDate),

    #[error("The date cannot be in the future")]
    InFuture,

    #[error("The payment date cannot be earlier than the invoice date ({0})")]
    BeforeInvoice(NaiveDate),

    #[error("Invalid answer, choose Y or N")]
    InvalidChoice,
}

pub type Validated<T> = std::result::Result<T, InputRejection>;

/// Non-negative decimal amount, no upper bound
///
/// Accepts plain (`12.50`) and scientific (`1e3`) notation.
pub fn parse_amount(raw: &str) -> Validated<Decimal> {
    let text = raw.trim();
    let amount = Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| out_of_range(text))?;

    if amount < Decimal::ZERO {
        return Err(InputRejection::NegativeAmount);
    }
    Ok(amount)
}

/// Classify text `Decimal` refused: a well-formed number beyond its range,
/// or not a number at all
fn out_of_range(text: &str) -> InputRejection {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() && value <= -1.0 => InputRejection::NegativeAmount,
        Ok(value) if value.is_finite() && value >= 1.0 => InputRejection::AmountTooLarge,
        _ => InputRejection::NotANumber(text.to_string()),
    }
}

/// Currency code from the allowed set, case-insensitive
pub fn parse_currency(raw: &str, allowed: &[Currency]) -> Validated<Currency> {
    let code = raw.trim().to_uppercase();
    Currency::from_code(&code)
        .filter(|currency| allowed.contains(currency))
        .ok_or(InputRejection::UnknownCurrency(code))
}

/// `YYYY-MM-DD` date inside the supported range
pub fn parse_date(raw: &str, range: &SupportedRange) -> Validated<NaiveDate> {
    let date = NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| InputRejection::BadDateFormat)?;

    range.check(date).map_err(|violation| match violation {
        RangeViolation::BeforeHistory(first) => InputRejection::BeforeHistory(first),
        RangeViolation::InFuture(_) => InputRejection::InFuture,
    })?;
    Ok(date)
}

/// Payment date: a supported date on or after the invoice date
pub fn parse_payment_date(
    raw: &str,
    range: &SupportedRange,
    invoice_date: NaiveDate,
) -> Validated<NaiveDate> {
    let date = parse_date(raw, range)?;
    if date < invoice_date {
        return Err(InputRejection::BeforeInvoice(invoice_date));
    }
    Ok(date)
}

/// `y`/`n` answer, case-insensitive
pub fn parse_yes_no(raw: &str) -> Validated<bool> {
    match raw.trim().to_uppercase().as_str() {
        "Y" | "YES" => Ok(true),
        "N" | "NO" => Ok(false),
        _ => Err(InputRejection::InvalidChoice),
    }
}
