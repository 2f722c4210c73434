//! Invoice ledger - running balance and settlement status
//!
//! The balance is kept in the invoice currency and only ever decremented by
//! `Settlement::applied`. Exchange rate differences are accumulated on the
//! side for the session summary.

use super::settlement::Settlement;
use crate::currency::{Currency, Money};
use crate::error::{InvoiceFxError, Result};
use crate::types::Invoice;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::fmt;

/// Where the invoice stands after the latest payment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceStatus {
    /// Still owed
    Outstanding(Money),
    /// Paid exactly
    Settled,
    /// Paid in excess by the given surplus
    Overpaid(Money),
}

impl BalanceStatus {
    pub fn from_balance(balance: Money) -> Self {
        match balance.amount.cmp(&Decimal::ZERO) {
            Ordering::Greater => BalanceStatus::Outstanding(balance),
            Ordering::Equal => BalanceStatus::Settled,
            Ordering::Less => BalanceStatus::Overpaid(balance.abs()),
        }
    }

    /// Nothing more is owed; overpayment counts as settled
    pub fn is_settled(&self) -> bool {
        !matches!(self, BalanceStatus::Outstanding(_))
    }
}

impl fmt::Display for BalanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BalanceStatus::Outstanding(remaining) => write!(f, "Remaining to pay: {}", remaining),
            BalanceStatus::Settled => write!(f, "Invoice fully settled"),
            BalanceStatus::Overpaid(surplus) => {
                write!(f, "Overpayment of {}. Invoice fully settled", surplus)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct InvoiceLedger {
    invoice: Invoice,
    balance: Decimal,
    payments: usize,
    exchange_difference: Decimal,
}

impl InvoiceLedger {
    pub fn new(invoice: Invoice) -> Self {
        Self {
            invoice,
            balance: invoice.value,
            payments: 0,
            exchange_difference: Decimal::ZERO,
        }
    }

    pub fn invoice(&self) -> &Invoice {
        &self.invoice
    }

    /// Outstanding amount in invoice currency; negative when overpaid
    pub fn balance(&self) -> Money {
        Money::new(self.balance, self.invoice.currency)
    }

    /// Status at the displayed precision, so a balance that prints as
    /// 0.00 counts as settled
    pub fn status(&self) -> BalanceStatus {
        BalanceStatus::from_balance(self.balance().rounded())
    }

    /// Number of payments applied so far
    pub fn payments(&self) -> usize {
        self.payments
    }

    /// Sum of all reported exchange rate differences, in PLN
    pub fn exchange_difference(&self) -> Money {
        Money::new(self.exchange_difference, Currency::DOMESTIC)
    }

    /// Take one settled payment off the balance
    pub fn apply(&mut self, settlement: &Settlement) -> Result<BalanceStatus> {
        let payment = settlement.payment();
        if !self.invoice.accepts(payment) {
            return Err(InvoiceFxError::InvalidData(format!(
                "Payment {} does not belong to invoice {}",
                payment, self.invoice
            )));
        }

        let balance = self.balance.checked_sub(settlement.applied()).ok_or_else(|| {
            InvoiceFxError::InvalidData(format!(
                "Payment {} takes the balance out of range",
                payment
            ))
        })?;
        let exchange_difference = match settlement.difference() {
            Some(difference) => self
                .exchange_difference
                .checked_add(difference.amount)
                .ok_or_else(|| {
                    InvoiceFxError::InvalidData("Exchange rate difference out of range".to_string())
                })?,
            None => self.exchange_difference,
        };

        self.balance = balance;
        self.exchange_difference = exchange_difference;
        self.payments += 1;

        log::debug!(
            "Payment #{} applied {} {}, balance now {}",
            self.payments,
            settlement.applied(),
            self.invoice.currency,
            self.balance
        );
        Ok(self.status())
    }
}
