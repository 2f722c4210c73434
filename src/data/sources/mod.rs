//! External rate source integrations
//!
//! - NBP: National Bank of Poland archive of table A mid rates

pub mod nbp;

pub use nbp::{classify_status, parse_quote, NbpRateSource};
