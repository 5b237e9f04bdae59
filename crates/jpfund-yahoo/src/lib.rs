//! Yahoo Finance client for jpfund.
//!
//! This crate fetches the `quoteSummary` payload for one symbol from
//! [Yahoo Finance](https://finance.yahoo.com/) and flattens its modules into
//! a [`jpfund_core::TickerInfo`] bag, the same key names the Yahoo web pages
//! use (`trailingPE`, `returnOnEquity`, ...).
//!
//! # Usage
//!
//! ```rust,ignore
//! use jpfund_yahoo::YahooClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = YahooClient::from_env()?;
//!
//!     let info = client.quote_summary("7203.T").await?;
//!     println!("{:?}", info.number("trailingPE"));
//!
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! All optional; also read from a `.env` file:
//!
//! ```bash
//! JPFUND_YAHOO_BASE_URL=https://query2.finance.yahoo.com
//! JPFUND_YAHOO_COOKIE_URL=https://fc.yahoo.com
//! JPFUND_USER_AGENT="Mozilla/5.0 ..."
//! JPFUND_TIMEOUT_SECS=10
//! ```

mod client;
mod config;
mod error;
mod types;

pub use client::YahooClient;
pub use config::ClientConfig;
pub use error::YahooError;
pub use types::QUOTE_SUMMARY_MODULES;

/// Result type for Yahoo operations.
pub type Result<T> = std::result::Result<T, YahooError>;
