//! The market-data provider seam and the fetch operation.

use crate::{FinancialRecord, Result, TickerInfo, normalize_symbol};
#[cfg(any(test, feature = "test-util"))]
use crate::RetrievalError;
use std::future::Future;
#[cfg(any(test, feature = "test-util"))]
use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
};
use tracing::{debug, warn};

/// A source of per-symbol fundamentals.
///
/// Implementations perform the remote lookup for an already-normalized
/// symbol and return the provider's key-value bag.
pub trait InfoProvider {
    /// Look up the info bag for `symbol`.
    fn ticker_info(&self, symbol: &str) -> impl Future<Output = Result<TickerInfo>> + Send;
}

/// Fetch fundamentals for `symbol` and map them into a record.
///
/// The symbol is normalized before the lookup; the returned record carries
/// the caller's original symbol.
///
/// # Errors
///
/// Returns the provider's error unchanged. No retry is attempted.
pub async fn fetch_financials<P: InfoProvider>(
    provider: &P,
    symbol: &str,
) -> Result<FinancialRecord> {
    let normalized = normalize_symbol(symbol);
    debug!(symbol, normalized = %normalized, "looking up ticker info");

    let info = provider.ticker_info(&normalized).await.inspect_err(|e| {
        warn!(symbol = %normalized, kind = e.kind(), error = %e, "ticker info lookup failed");
    })?;
    debug!(keys = info.len(), "received ticker info");

    Ok(FinancialRecord::from_info(symbol, &info))
}

/// In-memory provider answering from a fixed table.
///
/// Symbols missing from the table fail with [`RetrievalError::NotFound`].
/// Every lookup is recorded and can be inspected with [`Self::calls`].
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Default)]
pub struct StaticProvider {
    entries: HashMap<String, Result<TickerInfo>>,
    calls: Mutex<Vec<String>>,
}

#[cfg(any(test, feature = "test-util"))]
impl StaticProvider {
    /// Create an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer lookups of `symbol` with `info`.
    #[must_use]
    pub fn with_info(mut self, symbol: impl Into<String>, info: TickerInfo) -> Self {
        self.entries.insert(symbol.into(), Ok(info));
        self
    }

    /// Answer lookups of `symbol` with `err`.
    #[must_use]
    pub fn with_error(mut self, symbol: impl Into<String>, err: RetrievalError) -> Self {
        self.entries.insert(symbol.into(), Err(err));
        self
    }

    /// Symbols looked up so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(any(test, feature = "test-util"))]
impl InfoProvider for StaticProvider {
    async fn ticker_info(&self, symbol: &str) -> Result<TickerInfo> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(symbol.to_string());
        self.entries.get(symbol).cloned().unwrap_or_else(|| {
            Err(RetrievalError::NotFound(format!(
                "Quote not found for symbol: {symbol}"
            )))
        })
    }
}
