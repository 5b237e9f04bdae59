#![doc(issue_tracker_base_url = "https://github.com/factordynamics/jpfund/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types for the jpfund fundamentals fetcher.
//!
//! This crate turns a ticker symbol into a [`FinancialRecord`]: it normalizes
//! the symbol to the Tokyo Stock Exchange convention, asks an [`InfoProvider`]
//! for the provider's key-value bag of fundamentals, and maps a fixed subset
//! of keys into the output schema.
//!
//! # Usage
//!
//! ```rust,ignore
//! use jpfund_core::{fetch_financials, InfoProvider};
//!
//! async fn show(provider: &impl InfoProvider) -> jpfund_core::Result<()> {
//!     let record = fetch_financials(provider, "7203").await?;
//!     println!("{}", serde_json::to_string(&record).unwrap());
//!     Ok(())
//! }
//! ```

/// The version of the jpfund-core crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod info;
pub mod provider;
pub mod record;
pub mod symbol;

pub use error::{Result, RetrievalError};
pub use info::TickerInfo;
pub use provider::{InfoProvider, fetch_financials};
#[cfg(any(test, feature = "test-util"))]
pub use provider::StaticProvider;
pub use record::{ErrorRecord, FinancialRecord};
pub use symbol::{MARKET_SUFFIX, normalize_symbol};
