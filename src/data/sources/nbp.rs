//! NBP Web API rate source
//!
//! Fetches table A mid rates from the National Bank of Poland archive. The
//! API answers 404 for days without a published table (weekends, bank
//! holidays) and 400 for requests it cannot parse.

use crate::calendar::DATE_FORMAT;
use crate::config::SourceConfig;
use crate::currency::Currency;
use crate::data::fx::{ExchangeQuote, RateSource};
use crate::error::{InvoiceFxError, Result};
use chrono::NaiveDate;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Table A is the only table quoting a mid rate for every supported currency
const RATE_TABLE: &str = "a";

/// NBP exchange rate source (no API key required)
pub struct NbpRateSource {
    client: Client,
    config: SourceConfig,
}

#[derive(Debug, Deserialize)]
struct NbpResponse {
    code: Option<String>,
    rates: Vec<NbpRate>,
}

#[derive(Debug, Deserialize)]
struct NbpRate {
    no: Option<String>,
    #[serde(rename = "effectiveDate")]
    effective_date: Option<String>,
    mid: Option<Decimal>,
}

impl NbpRateSource {
    /// Create a new NBP source from validated settings
    pub fn new(config: SourceConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|e| InvoiceFxError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// URL of the quote for one currency on one day
    pub fn quote_url(&self, currency: Currency, date: NaiveDate) -> String {
        format!(
            "{}/{}/{}/{}/?format=json",
            self.config.base_url.trim_end_matches('/'),
            RATE_TABLE,
            currency.code().to_lowercase(),
            date.format(DATE_FORMAT)
        )
    }
}

/// Map an HTTP status onto the lookup's error taxonomy
///
/// 404 is a missing quote (the caller steps back a day), 400 a request the
/// API will never accept, anything else non-2xx a source failure.
pub fn classify_status(
    status: StatusCode,
    currency: Currency,
    date: NaiveDate,
    detail: &str,
) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }

    let detail = detail.trim();
    match status {
        StatusCode::NOT_FOUND => Err(InvoiceFxError::RateNotFound {
            currency: currency.code().to_string(),
            date,
        }),
        StatusCode::BAD_REQUEST => Err(InvoiceFxError::InvalidRequest(format!(
            "{} for {} on {}: {}",
            status, currency, date, detail
        ))),
        _ => Err(InvoiceFxError::SourceError(format!(
            "NBP API returned {} for {} on {}: {}",
            status, currency, date, detail
        ))),
    }
}

/// Parse an NBP `rates` response body into a quote
///
/// Uses the first entry of `rates`. The publication date comes from
/// `effectiveDate` when present, otherwise the requested date is kept.
pub fn parse_quote(body: &str, currency: Currency, requested: NaiveDate) -> Result<ExchangeQuote> {
    let response: NbpResponse = serde_json::from_str(body)?;

    if let Some(code) = &response.code {
        if !code.eq_ignore_ascii_case(currency.code()) {
            return Err(InvoiceFxError::ParseError(format!(
                "Asked for {} but NBP answered with {}",
                currency, code
            )));
        }
    }

    let first = response.rates.first().ok_or_else(|| {
        InvoiceFxError::ParseError(format!("NBP response for {} has no rates", currency))
    })?;
    let rate = first.mid.ok_or_else(|| {
        InvoiceFxError::ParseError(format!("NBP response for {} has no mid rate", currency))
    })?;
    if rate <= Decimal::ZERO {
        return Err(InvoiceFxError::ParseError(format!(
            "Non-positive mid rate {} for {}",
            rate, currency
        )));
    }

    let date = match &first.effective_date {
        Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map_err(|e| InvoiceFxError::ParseError(format!("Invalid effectiveDate {}: {}", raw, e)))?,
        None => requested,
    };

    let quote = ExchangeQuote::new(currency, date, rate);
    Ok(match &first.no {
        Some(no) => quote.with_table_no(no.clone()),
        None => quote,
    })
}

impl RateSource for NbpRateSource {
    fn fetch_quote(&self, currency: Currency, date: NaiveDate) -> Result<ExchangeQuote> {
        let url = self.quote_url(currency, date);
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| InvoiceFxError::SourceError(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| InvoiceFxError::SourceError(format!("Failed to read response: {}", e)))?;

        classify_status(status, currency, date, &body)?;
        parse_quote(&body, currency, date)
    }

    fn name(&self) -> &str {
        "NBP"
    }
}
