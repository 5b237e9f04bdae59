//! Output records.
//!
//! [`FinancialRecord`] is the success payload and [`ErrorRecord`] the
//! failure payload. Both serialize to a single flat JSON object.

use crate::{RetrievalError, TickerInfo};
use serde::{Deserialize, Serialize, Serializer};

/// Scale from provider fractions to percentages.
const PERCENT_SCALE: f64 = 100.0;

/// Largest magnitude below which every whole `f64` is an exact integer (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Write whole numbers as JSON integers (`45000000000000`, not `45000000000000.0`).
fn serialize_number<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match *value {
        Some(v) if v.fract() == 0.0 && v.abs() < MAX_EXACT_INTEGER => {
            serializer.serialize_i64(v as i64)
        }
        Some(v) => serializer.serialize_f64(v),
        None => serializer.serialize_none(),
    }
}

/// Fundamentals for one security.
///
/// Every numeric field is either a finite number or `None`, which
/// serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRecord {
    /// Symbol as given by the caller, before normalization.
    pub symbol: String,
    /// Company name; the symbol when the provider has none.
    pub company_name: String,
    /// Market capitalization.
    #[serde(serialize_with = "serialize_number")]
    pub market_cap: Option<f64>,
    /// Trailing price/earnings, or forward P/E when trailing is missing.
    #[serde(serialize_with = "serialize_number")]
    pub per: Option<f64>,
    /// Price-to-book ratio.
    #[serde(serialize_with = "serialize_number")]
    pub pbr: Option<f64>,
    /// Trailing earnings per share.
    #[serde(serialize_with = "serialize_number")]
    pub eps: Option<f64>,
    /// Dividend yield in percent.
    #[serde(serialize_with = "serialize_number")]
    pub dividend_yield: Option<f64>,
    /// Return on equity in percent.
    #[serde(serialize_with = "serialize_number")]
    pub roe: Option<f64>,
    /// Debt-to-equity ratio.
    #[serde(serialize_with = "serialize_number")]
    pub debt_to_equity: Option<f64>,
    /// Current ratio.
    #[serde(serialize_with = "serialize_number")]
    pub current_ratio: Option<f64>,
    /// Operating margin in percent.
    #[serde(serialize_with = "serialize_number")]
    pub operating_margin: Option<f64>,
    /// Net profit margin in percent.
    #[serde(serialize_with = "serialize_number")]
    pub profit_margin: Option<f64>,
    /// Total revenue.
    #[serde(serialize_with = "serialize_number")]
    pub revenue: Option<f64>,
    /// Net income attributable to common shareholders.
    #[serde(serialize_with = "serialize_number")]
    pub net_income: Option<f64>,
    /// Total assets.
    #[serde(serialize_with = "serialize_number")]
    pub total_assets: Option<f64>,
    /// Total debt.
    #[serde(serialize_with = "serialize_number")]
    pub total_debt: Option<f64>,
    /// Total shareholders' equity.
    #[serde(serialize_with = "serialize_number")]
    pub shareholders_equity: Option<f64>,
}

impl FinancialRecord {
    /// Map the provider's info bag into a record for `symbol`.
    #[must_use]
    pub fn from_info(symbol: &str, info: &TickerInfo) -> Self {
        // Zero means "not reported" for ratios and fractions.
        let nonzero = |key: &str| info.number(key).filter(|v| *v != 0.0);
        let percent = |key: &str| nonzero(key).map(|v| v * PERCENT_SCALE);

        Self {
            symbol: symbol.to_string(),
            company_name: info
                .text("longName")
                .or_else(|| info.text("shortName"))
                .unwrap_or(symbol)
                .to_string(),
            market_cap: info.number("marketCap"),
            per: nonzero("trailingPE").or_else(|| nonzero("forwardPE")),
            pbr: info.number("priceToBook"),
            eps: info.number("trailingEps"),
            dividend_yield: percent("dividendYield"),
            roe: percent("returnOnEquity"),
            debt_to_equity: info.number("debtToEquity"),
            current_ratio: info.number("currentRatio"),
            operating_margin: percent("operatingMargins"),
            profit_margin: percent("profitMargins"),
            revenue: info.number("totalRevenue"),
            net_income: info.number("netIncomeToCommon"),
            total_assets: info.number("totalAssets"),
            total_debt: info.number("totalDebt"),
            shareholders_equity: info.number("totalStockholdersEquity"),
        }
    }
}

/// Failure payload: `{"error": true, "message": ..., "symbol": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorRecord {
    error: bool,
    /// Description of the failure.
    pub message: String,
    /// Symbol the failure relates to; omitted for invocation errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl ErrorRecord {
    /// Error record without a symbol, used for malformed invocations.
    #[must_use]
    pub fn usage(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
            symbol: None,
        }
    }

    /// Error record for a failed lookup of `symbol`.
    #[must_use]
    pub fn retrieval(symbol: impl Into<String>, err: &RetrievalError) -> Self {
        Self::for_symbol(symbol, err.message())
    }

    /// Error record for `symbol` with an arbitrary message.
    #[must_use]
    pub fn for_symbol(symbol: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
            symbol: Some(symbol.into()),
        }
    }
}
