//! Currency types and money amounts

use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

/// Currencies the session accepts (ISO 4217 codes)
///
/// PLN is the domestic currency; every other variant must be quoted in NBP
/// table A. Adding a currency only means adding a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    /// Polish Zloty
    PLN,
    /// Euro
    EUR,
    /// US Dollar
    USD,
    /// British Pound Sterling
    GBP,
}

impl Currency {
    /// The home currency all rates are quoted in
    pub const DOMESTIC: Currency = Currency::PLN;

    /// Get ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::PLN => "PLN",
            Currency::EUR => "EUR",
            Currency::USD => "USD",
            Currency::GBP => "GBP",
        }
    }

    /// Parse from ISO code, case-insensitive
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "PLN" => Some(Currency::PLN),
            "EUR" => Some(Currency::EUR),
            "USD" => Some(Currency::USD),
            "GBP" => Some(Currency::GBP),
            _ => None,
        }
    }

    /// Get all supported currencies, domestic first
    pub fn all() -> Vec<Currency> {
        vec![Currency::PLN, Currency::EUR, Currency::USD, Currency::GBP]
    }

    pub fn is_domestic(&self) -> bool {
        *self == Currency::DOMESTIC
    }

    /// Number of minor-unit digits used when rounding amounts
    pub fn minor_units(&self) -> u32 {
        2
    }

    /// Currencies a payment against an invoice in `self` may use
    ///
    /// A domestic invoice can be paid in anything; a foreign invoice only in
    /// its own currency or in the domestic one.
    pub fn payment_currencies(&self) -> Vec<Currency> {
        if self.is_domestic() {
            Currency::all()
        } else {
            vec![Currency::DOMESTIC, *self]
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Decimal amount tagged with its currency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Money {
    pub amount: Decimal,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Round to the currency's minor units with banker's rounding
    pub fn rounded(&self) -> Self {
        Self::new(round_amount(self.amount, self.currency), self.currency)
    }

    pub fn abs(&self) -> Self {
        Self::new(self.amount.abs(), self.currency)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let places = self.currency.minor_units() as usize;
        write!(f, "{:.*} {}", places, self.rounded().amount, self.currency)
    }
}

/// Round half to even at the currency's minor-unit precision
pub fn round_amount(amount: Decimal, currency: Currency) -> Decimal {
    amount.round_dp_with_strategy(currency.minor_units(), RoundingStrategy::MidpointNearestEven)
}
