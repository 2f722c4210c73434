//! Error types for invoice_fx

use chrono::NaiveDate;
use thiserror::Error;

/// Main error type for invoice_fx
#[derive(Error, Debug)]
pub enum InvoiceFxError {
    /// The rate source has no quote for this exact date (weekend, holiday).
    /// Recovered by the backward scan in `lookup_rate`.
    #[error("No exchange rate for {currency} on {date}")]
    RateNotFound { currency: String, date: NaiveDate },

    /// The rate source rejected the request itself; retrying cannot help.
    #[error("Invalid rate request: {0}")]
    InvalidRequest(String),

    #[error("Rate source error: {0}")]
    SourceError(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Input closed before {0} was entered")]
    InputClosed(&'static str),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl InvoiceFxError {
    /// True for the one error the lookup recovers from by stepping back a day
    pub fn is_missing_rate(&self) -> bool {
        matches!(self, InvoiceFxError::RateNotFound { .. })
    }
}

/// Result type alias for invoice_fx operations
pub type Result<T> = std::result::Result<T, InvoiceFxError>;
