//! Ticker symbol normalization.

/// Suffix the provider expects on Tokyo Stock Exchange codes.
pub const MARKET_SUFFIX: &str = ".T";

/// Normalize a local ticker code to the provider's symbol format.
///
/// Appends [`MARKET_SUFFIX`] unless the input already contains it. The
/// symbol is not otherwise validated.
///
/// ```
/// use jpfund_core::normalize_symbol;
///
/// assert_eq!(normalize_symbol("7203"), "7203.T");
/// assert_eq!(normalize_symbol("7203.T"), "7203.T");
/// ```
#[must_use]
pub fn normalize_symbol(symbol: &str) -> String {
    if symbol.contains(MARKET_SUFFIX) {
        symbol.to_string()
    } else {
        format!("{symbol}{MARKET_SUFFIX}")
    }
}
