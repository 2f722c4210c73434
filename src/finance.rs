//! Invoice accounting
//!
//! `settlement` decides what a payment is worth in invoice currency;
//! `ledger` keeps the running balance that those amounts come off.

pub mod ledger;
pub mod settlement;

pub use ledger::{BalanceStatus, InvoiceLedger};
pub use settlement::{settle_payment, Settlement};
