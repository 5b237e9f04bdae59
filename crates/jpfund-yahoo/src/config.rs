//! Client configuration.

use crate::{Result, error::YahooError};
use std::{env, time::Duration};

/// Default base URL for Yahoo query endpoints.
pub(crate) const DEFAULT_QUERY_BASE_URL: &str = "https://query2.finance.yahoo.com";

/// Default URL that hands out the session cookie.
pub(crate) const DEFAULT_COOKIE_URL: &str = "https://fc.yahoo.com";

/// Yahoo rejects requests without a browser-like user agent.
pub(crate) const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for [`crate::YahooClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the query API (crumb and quoteSummary endpoints).
    pub query_base_url: String,
    /// URL visited first to obtain the session cookie.
    pub cookie_url: String,
    /// User agent sent with every request.
    pub user_agent: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            query_base_url: DEFAULT_QUERY_BASE_URL.to_string(),
            cookie_url: DEFAULT_COOKIE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Build a config from `JPFUND_*` environment variables.
    ///
    /// This will also load from a `.env` file if present. Unset variables
    /// keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if `JPFUND_TIMEOUT_SECS` is not a whole number.
    pub fn from_env() -> Result<Self> {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if `JPFUND_TIMEOUT_SECS` is not a whole number.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup("JPFUND_YAHOO_BASE_URL") {
            config.query_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = lookup("JPFUND_YAHOO_COOKIE_URL") {
            config.cookie_url = url;
        }
        if let Some(agent) = lookup("JPFUND_USER_AGENT") {
            config.user_agent = agent;
        }
        if let Some(secs) = lookup("JPFUND_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                YahooError::Config(format!(
                    "JPFUND_TIMEOUT_SECS must be a whole number, got {secs:?}"
                ))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.query_base_url, "https://query2.finance.yahoo.com");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("JPFUND_YAHOO_BASE_URL", "http://localhost:8080/"),
            ("JPFUND_YAHOO_COOKIE_URL", "http://localhost:8080/cookie"),
            ("JPFUND_USER_AGENT", "jpfund-test"),
            ("JPFUND_TIMEOUT_SECS", "3"),
        ]))
        .unwrap();

        assert_eq!(config.query_base_url, "http://localhost:8080");
        assert_eq!(config.cookie_url, "http://localhost:8080/cookie");
        assert_eq!(config.user_agent, "jpfund-test");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_invalid_timeout() {
        let err =
            ClientConfig::from_lookup(lookup(&[("JPFUND_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(matches!(err, YahooError::Config(_)));
        assert!(err.to_string().contains("JPFUND_TIMEOUT_SECS"));
    }
}
