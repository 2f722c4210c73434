//! # invoice_fx
//!
//! Records an invoice and the payments made against it, converting foreign
//! currency amounts with historical NBP mid rates and reporting the
//! outstanding balance and exchange rate differences.
//!
//! Days without a published rate (weekends, bank holidays) fall back to the
//! most recent earlier publication.
//!
//! ## Example
//!
//! ```rust
//! use invoice_fx::prelude::*;
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//!
//! let mut source = InMemoryRateSource::new();
//! let friday = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
//! source.add_rate(Currency::EUR, friday, Decimal::new(435, 2)).unwrap();
//!
//! let invoice = Invoice::new(friday, Decimal::new(1000, 0), Currency::PLN);
//! let saturday = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
//! let payment = Payment::new(saturday, Decimal::new(100, 0), Currency::EUR);
//!
//! let settlement = settle_payment(&source, &invoice, &payment).unwrap();
//! let mut ledger = InvoiceLedger::new(invoice);
//! let status = ledger.apply(&settlement).unwrap();
//! assert_eq!(status.to_string(), "Remaining to pay: 565.00 PLN");
//! ```

pub mod calendar;
pub mod config;
pub mod console;
pub mod currency;
pub mod data;
pub mod error;
pub mod finance;
pub mod input;
pub mod session;
pub mod types;

pub mod prelude {
    //! Commonly used types and traits
    pub use crate::calendar::SupportedRange;
    pub use crate::config::SourceConfig;
    pub use crate::console::Console;
    pub use crate::currency::{Currency, Money};
    pub use crate::data::fx::{
        lookup_rate, ExchangeQuote, ExplodingRateSource, InMemoryRateSource, RateSource,
    };
    pub use crate::data::sources::NbpRateSource;
    pub use crate::error::{InvoiceFxError, Result};
    pub use crate::finance::{settle_payment, BalanceStatus, InvoiceLedger, Settlement};
    pub use crate::session::{Session, SessionState, SessionSummary};
    pub use crate::types::{Invoice, Payment};
}
