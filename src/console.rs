//! Line-oriented console prompts
//!
//! Wraps any `BufRead`/`Write` pair so the prompt loops run the same against
//! stdin/stdout and against scripted input in tests. Invalid answers are
//! reported and asked again without limit; only I/O failures and a closed
//! input stream surface as errors.

use crate::calendar::SupportedRange;
use crate::currency::{Currency, Money};
use crate::error::{InvoiceFxError, Result};
use crate::input::{self, Validated};
use crate::types::{Invoice, Payment};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::io::{BufRead, Write};

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the output sink, e.g. to inspect a transcript
    pub fn into_output(self) -> W {
        self.output
    }

    /// Print one line
    pub fn say(&mut self, line: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "{}", line.as_ref())?;
        Ok(())
    }

    /// Print `text` without a newline and read the answer
    fn prompt(&mut self, text: &str, what: &'static str) -> Result<String> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InvoiceFxError::InputClosed(what));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Ask until `parse` accepts the answer
    fn ask<T>(
        &mut self,
        text: &str,
        what: &'static str,
        mut parse: impl FnMut(&str) -> Validated<T>,
    ) -> Result<T> {
        loop {
            let answer = self.prompt(text, what)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(rejection) => {
                    log::debug!("Rejected {} {:?}: {}", what, answer, rejection);
                    self.say(rejection.to_string())?;
                }
            }
        }
    }

    pub fn read_amount(&mut self) -> Result<Decimal> {
        self.ask("Enter amount: ", "an amount", input::parse_amount)
    }

    /// Currency code from `allowed`; the choices are listed before each try
    pub fn read_currency(&mut self, allowed: &[Currency]) -> Result<Currency> {
        let choices = allowed
            .iter()
            .map(Currency::code)
            .collect::<Vec<_>>()
            .join(", ");
        loop {
            self.say(format!("Available currencies: {}", choices))?;
            let answer = self.prompt("Enter currency: ", "a currency")?;
            match input::parse_currency(&answer, allowed) {
                Ok(currency) => return Ok(currency),
                Err(rejection) => self.say(rejection.to_string())?,
            }
        }
    }

    /// Amount first, then currency
    pub fn read_money(&mut self, allowed: &[Currency]) -> Result<Money> {
        let amount = self.read_amount()?;
        let currency = self.read_currency(allowed)?;
        Ok(Money::new(amount, currency))
    }

    pub fn read_date(&mut self, range: &SupportedRange) -> Result<NaiveDate> {
        self.ask("Enter date YYYY-MM-DD: ", "a date", |raw| {
            input::parse_date(raw, range)
        })
    }

    pub fn read_invoice(&mut self, range: &SupportedRange) -> Result<Invoice> {
        self.say("Enter invoice details:")?;
        let date = self.read_date(range)?;
        let value = self.read_money(&Currency::all())?;
        Ok(Invoice::new(date, value.amount, value.currency))
    }

    /// Payment dated on or after the invoice, in an eligible currency
    pub fn read_payment(&mut self, invoice: &Invoice, range: &SupportedRange) -> Result<Payment> {
        self.say("Enter payment details:")?;
        let date = self.ask("Enter date YYYY-MM-DD: ", "a payment date", |raw| {
            input::parse_payment_date(raw, range, invoice.date)
        })?;
        let value = self.read_money(&invoice.payment_currencies())?;
        Ok(Payment::new(date, value.amount, value.currency))
    }

    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        let text = format!("{} (Y/N): ", question);
        self.ask(&text, "an answer", input::parse_yes_no)
    }
}
