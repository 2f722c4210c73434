//! Rate source configuration

use crate::error::{InvoiceFxError, Result};
use std::time::Duration;

/// Public NBP exchange rate API
pub const DEFAULT_API_URL: &str = "https://api.nbp.pl/api/exchangerates/rates";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for the HTTP rate source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// Base URL; requests go to `{base_url}/a/{code}/{date}/`
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("invoice-fx/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl SourceConfig {
    /// Builder-style override of the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check the settings before any request is made
    pub fn validate(&self) -> Result<()> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(InvoiceFxError::ConfigError(
                "API URL must not be empty".to_string(),
            ));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(InvoiceFxError::ConfigError(format!(
                "API URL must start with http:// or https://, got: {}",
                url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(InvoiceFxError::ConfigError(
                "Timeout must be at least one second".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SourceConfig::default();
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.user_agent.starts_with("invoice-fx/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_url() {
        let config = SourceConfig::default().with_base_url("");
        assert!(matches!(config.validate(), Err(InvoiceFxError::ConfigError(_))));

        let config = SourceConfig::default().with_base_url("ftp://example.com");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_timeout() {
        assert!(SourceConfig::default().with_timeout_secs(0).validate().is_err());
        assert!(SourceConfig::default().with_timeout_secs(1).validate().is_ok());
    }
}
