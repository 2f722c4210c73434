//! Interactive settlement session
//!
//! Drives the console through one invoice and as many payments as it takes:
//!
//! ```text
//! CollectingInvoice -> CollectingPayment -> ReportingStatus -+-> Done (balance <= 0)
//!                            ^                               |
//!                            +---- yes ---- AskContinue <----+-> Done (no)
//! ```
//!
//! The ledger (running balance, payment counter) is owned by `run` and
//! dropped with it; nothing outlives a session.

use crate::calendar::SupportedRange;
use crate::console::Console;
use crate::currency::Money;
use crate::data::fx::RateSource;
use crate::error::{InvoiceFxError, Result};
use crate::finance::{settle_payment, BalanceStatus, InvoiceLedger, Settlement};
use crate::types::Invoice;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    CollectingInvoice,
    CollectingPayment,
    ReportingStatus,
    AskContinue,
    Done,
}

impl SessionState {
    /// Settled or overpaid invoices end the session without asking
    pub fn after_status(status: BalanceStatus) -> Self {
        if status.is_settled() {
            SessionState::Done
        } else {
            SessionState::AskContinue
        }
    }

    pub fn after_answer(another_payment: bool) -> Self {
        if another_payment {
            SessionState::CollectingPayment
        } else {
            SessionState::Done
        }
    }
}

/// Outcome of a finished session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub invoice: Invoice,
    pub payments: usize,
    pub status: BalanceStatus,
    pub balance: Money,
    /// Sum of reported exchange rate differences, PLN
    pub exchange_difference: Money,
}

impl From<&InvoiceLedger> for SessionSummary {
    fn from(ledger: &InvoiceLedger) -> Self {
        Self {
            invoice: *ledger.invoice(),
            payments: ledger.payments(),
            status: ledger.status(),
            balance: ledger.balance(),
            exchange_difference: ledger.exchange_difference(),
        }
    }
}

pub struct Session<S, R, W> {
    source: S,
    console: Console<R, W>,
    range: SupportedRange,
}

impl<S: RateSource, R: BufRead, W: Write> Session<S, R, W> {
    pub fn new(source: S, console: Console<R, W>, range: SupportedRange) -> Self {
        Self {
            source,
            console,
            range,
        }
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    /// Run the session until the invoice is settled or the user stops
    pub fn run(&mut self) -> Result<SessionSummary> {
        let mut state = SessionState::CollectingInvoice;
        let mut ledger: Option<InvoiceLedger> = None;

        loop {
            log::debug!("Session state: {:?}", state);
            state = match state {
                SessionState::CollectingInvoice => {
                    ledger = Some(self.collect_invoice()?);
                    SessionState::CollectingPayment
                }
                SessionState::CollectingPayment => {
                    self.collect_payment(active(&mut ledger)?)?;
                    SessionState::ReportingStatus
                }
                SessionState::ReportingStatus => {
                    let status = active(&mut ledger)?.status();
                    self.console.say(status.to_string())?;
                    SessionState::after_status(status)
                }
                SessionState::AskContinue => {
                    let another = self.console.confirm("Add another payment?")?;
                    SessionState::after_answer(another)
                }
                SessionState::Done => break,
            };
        }

        let ledger = active(&mut ledger)?;
        let summary = SessionSummary::from(&*ledger);
        if !summary.exchange_difference.amount.is_zero() {
            self.console.say(format!(
                "Total exchange rate difference: {}",
                summary.exchange_difference
            ))?;
        }
        Ok(summary)
    }

    fn collect_invoice(&mut self) -> Result<InvoiceLedger> {
        let invoice = self.console.read_invoice(&self.range)?;
        self.console.say(format!("Invoice: {}", invoice))?;
        Ok(InvoiceLedger::new(invoice))
    }

    fn collect_payment(&mut self, ledger: &mut InvoiceLedger) -> Result<()> {
        let payment = self.console.read_payment(ledger.invoice(), &self.range)?;
        self.console
            .say(format!("Payment #{}: {}", ledger.payments() + 1, payment))?;

        let settlement = settle_payment(&self.source, ledger.invoice(), &payment)?;
        if !matches!(settlement, Settlement::Direct { .. }) {
            self.console.say(settlement.to_string())?;
        }
        ledger.apply(&settlement)?;
        Ok(())
    }
}

fn active(ledger: &mut Option<InvoiceLedger>) -> Result<&mut InvoiceLedger> {
    ledger
        .as_mut()
        .ok_or_else(|| InvoiceFxError::InvalidData("No invoice entered yet".to_string()))
}
