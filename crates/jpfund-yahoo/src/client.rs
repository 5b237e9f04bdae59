//! Yahoo Finance API client implementation.

use crate::{
    ClientConfig, Result,
    error::YahooError,
    types::{QUOTE_SUMMARY_MODULES, parse_crumb, parse_quote_summary},
};
use jpfund_core::{InfoProvider, TickerInfo};
use reqwest::{
    Client, StatusCode,
    header::{HeaderMap, HeaderValue, REFERER},
};
use tracing::debug;

/// Referer Yahoo expects on API calls.
const YAHOO_REFERER: &str = "https://finance.yahoo.com/";

/// Yahoo Finance API client.
///
/// Cookies set by Yahoo are kept in the client's cookie store for the
/// lifetime of the client.
#[derive(Debug, Clone)]
pub struct YahooClient {
    client: Client,
    config: ClientConfig,
}

impl YahooClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, HeaderValue::from_static(YAHOO_REFERER));

        let client = Client::builder()
            .cookie_store(true)
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a new client configured from `JPFUND_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// The configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn crumb_url(&self) -> String {
        format!("{}/v1/test/getcrumb", self.config.query_base_url)
    }

    fn quote_summary_url(&self, symbol: &str, crumb: &str) -> String {
        format!(
            "{}/v10/finance/quoteSummary/{}?modules={}&formatted=false&corsDomain=finance.yahoo.com&crumb={}",
            self.config.query_base_url,
            urlencoding::encode(symbol),
            QUOTE_SUMMARY_MODULES.join(","),
            urlencoding::encode(crumb)
        )
    }

    /// Establish a session and return its crumb.
    async fn crumb(&self) -> Result<String> {
        // Only the Set-Cookie headers matter here; the status is usually 404.
        let cookie_response = self.client.get(&self.config.cookie_url).send().await?;
        debug!(status = %cookie_response.status(), "session cookie response");

        let response = self.client.get(self.crumb_url()).send().await?;
        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(YahooError::RateLimitExceeded);
        }
        if !response.status().is_success() {
            let status = response.status();
            return Err(YahooError::Crumb(format!("HTTP {status}")));
        }

        parse_crumb(&response.text().await?)
    }

    /// Get the flattened `quoteSummary` info for a provider symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Provider symbol, already suffixed (e.g., "7203.T")
    ///
    /// # Errors
    ///
    /// Returns an error if the session handshake or the request fails, if
    /// Yahoo reports an error for the symbol, or if the body cannot be parsed.
    pub async fn quote_summary(&self, symbol: &str) -> Result<TickerInfo> {
        let crumb = self.crumb().await?;
        let url = self.quote_summary_url(symbol, &crumb);
        debug!(symbol, "requesting quoteSummary");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(YahooError::RateLimitExceeded);
        }

        let text = response.text().await?;
        let info = parse_quote_summary(symbol, status, &text)?;
        debug!(symbol, %status, keys = info.len(), "parsed quoteSummary");

        Ok(info)
    }
}

impl InfoProvider for YahooClient {
    async fn ticker_info(&self, symbol: &str) -> jpfund_core::Result<TickerInfo> {
        Ok(self.quote_summary(symbol).await?)
    }
}
