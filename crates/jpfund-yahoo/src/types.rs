//! Wire types for the Yahoo `quoteSummary` endpoint and their flattening.

use crate::{Result, error::YahooError};
use jpfund_core::TickerInfo;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Modules requested from `quoteSummary`, in merge order.
pub const QUOTE_SUMMARY_MODULES: &[&str] = &[
    "financialData",
    "quoteType",
    "defaultKeyStatistics",
    "assetProfile",
    "summaryDetail",
    "price",
];

/// Longest crumb accepted from the crumb endpoint.
const MAX_CRUMB_LEN: usize = 100;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteSummaryResponse {
    quote_summary: QuoteSummary,
}

#[derive(Debug, Deserialize)]
struct QuoteSummary {
    #[serde(default)]
    result: Option<Vec<Map<String, Value>>>,
    #[serde(default)]
    error: Option<QuoteSummaryError>,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
}

impl QuoteSummaryError {
    fn into_error(self) -> YahooError {
        if self.code == "Not Found" {
            YahooError::NotFound(self.description)
        } else if self.description.is_empty() {
            YahooError::Api(self.code)
        } else {
            YahooError::Api(format!("{}: {}", self.code, self.description))
        }
    }
}

/// Parse a `quoteSummary` response body into a flat info bag.
pub(crate) fn parse_quote_summary(
    symbol: &str,
    status: StatusCode,
    body: &str,
) -> Result<TickerInfo> {
    let response: QuoteSummaryResponse = match serde_json::from_str(body) {
        Ok(response) => response,
        Err(_) if !status.is_success() => {
            return Err(YahooError::Api(format!("HTTP {status}: {body}")));
        }
        Err(e) => return Err(YahooError::Json(e)),
    };

    if let Some(error) = response.quote_summary.error {
        return Err(error.into_error());
    }
    if !status.is_success() {
        return Err(YahooError::Api(format!("HTTP {status}: {body}")));
    }

    let modules = response
        .quote_summary
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| YahooError::NoData(symbol.to_string()))?;

    Ok(flatten_modules(&modules))
}

/// Merge the requested modules into one key-value bag.
///
/// A later module overwrites keys set by an earlier one; `null` values are
/// skipped and never replace anything.
pub(crate) fn flatten_modules(modules: &Map<String, Value>) -> TickerInfo {
    let mut info = TickerInfo::new();

    for name in QUOTE_SUMMARY_MODULES {
        let Some(Value::Object(fields)) = modules.get(*name) else {
            continue;
        };
        for (key, value) in fields {
            match unwrap_value(value) {
                Some(Value::Null) | None => {}
                Some(value) => {
                    info.insert(key.clone(), value);
                }
            }
        }
    }

    info
}

/// Reduce a formatted value to its raw form.
///
/// `{"raw": 1.5, "fmt": "1.50"}` becomes `1.5`; `{}` and `{"fmt": ...}`
/// carry no usable value and are dropped.
fn unwrap_value(value: &Value) -> Option<Value> {
    match value {
        Value::Object(object) => {
            if let Some(raw) = object.get("raw") {
                Some(raw.clone())
            } else if object.keys().all(|k| k == "fmt" || k == "longFmt") {
                None
            } else {
                Some(value.clone())
            }
        }
        other => Some(other.clone()),
    }
}

/// Validate the body returned by the crumb endpoint.
pub(crate) fn parse_crumb(body: &str) -> Result<String> {
    let crumb = body.trim();

    if crumb.is_empty() {
        return Err(YahooError::Crumb("empty response".to_string()));
    }
    if crumb.contains("<html") || crumb.contains("<!DOCTYPE") {
        return Err(YahooError::Crumb("received an HTML page".to_string()));
    }
    if crumb.to_lowercase().contains("too many requests") {
        return Err(YahooError::RateLimitExceeded);
    }
    if crumb.len() >= MAX_CRUMB_LEN || crumb.contains(char::is_whitespace) {
        return Err(YahooError::Crumb(format!("unexpected crumb {crumb:?}")));
    }

    Ok(crumb.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TOYOTA_BODY: &str = r#"{
        "quoteSummary": {
            "result": [{
                "financialData": {
                    "maxAge": 86400,
                    "currentRatio": {"raw": 1.23, "fmt": "1.23"},
                    "debtToEquity": {"raw": 105.3, "fmt": "105.30%"},
                    "returnOnEquity": {"raw": 0.1217, "fmt": "12.17%"},
                    "totalRevenue": {"raw": 45095325000000, "fmt": "45.1T", "longFmt": "45,095,325,000,000"},
                    "operatingMargins": {"raw": 0.109, "fmt": "10.90%"},
                    "profitMargins": {"raw": 0.1, "fmt": "10.00%"},
                    "totalDebt": {"raw": 38000000000000, "fmt": "38T"},
                    "targetMeanPrice": {}
                },
                "quoteType": {
                    "symbol": "7203.T",
                    "longName": "Toyota Motor Corporation",
                    "shortName": "TOYOTA MOTOR CORP"
                },
                "defaultKeyStatistics": {
                    "priceToBook": {"raw": 1.1, "fmt": "1.10"},
                    "trailingEps": {"raw": 365.94, "fmt": "365.94"},
                    "netIncomeToCommon": {"raw": 4944933000000, "fmt": "4.94T"},
                    "forwardPE": {"raw": 9.8, "fmt": "9.80"}
                },
                "summaryDetail": {
                    "trailingPE": {"raw": 10.5, "fmt": "10.50"},
                    "forwardPE": {"raw": 9.7, "fmt": "9.70"},
                    "dividendYield": {"raw": 0.025, "fmt": "2.50%"},
                    "marketCap": {"raw": 45000000000000, "fmt": "45T"}
                },
                "price": {
                    "longName": null,
                    "marketCap": {"raw": 46000000000000, "fmt": "46T"}
                }
            }],
            "error": null
        }
    }"#;

    const NOT_FOUND_BODY: &str = r#"{
        "quoteSummary": {
            "result": null,
            "error": {"code": "Not Found", "description": "Quote not found for symbol: 9999.T"}
        }
    }"#;

    #[test]
    fn test_parse_flattens_modules() {
        let info = parse_quote_summary("7203.T", StatusCode::OK, TOYOTA_BODY).unwrap();

        assert_eq!(info.text("longName"), Some("Toyota Motor Corporation"));
        assert_eq!(info.number("trailingPE"), Some(10.5));
        assert_eq!(info.number("dividendYield"), Some(0.025));
        assert_eq!(info.number("returnOnEquity"), Some(0.1217));
        assert_eq!(info.number("totalRevenue"), Some(45_095_325_000_000.0));
        assert_eq!(info.number("maxAge"), Some(86400.0));
        assert!(info.get("targetMeanPrice").is_none());
    }

    #[test]
    fn test_later_module_wins() {
        let info = parse_quote_summary("7203.T", StatusCode::OK, TOYOTA_BODY).unwrap();

        // summaryDetail follows defaultKeyStatistics, price follows summaryDetail.
        assert_eq!(info.number("forwardPE"), Some(9.7));
        assert_eq!(info.number("marketCap"), Some(46_000_000_000_000.0));
        // A later null never replaces a value.
        assert_eq!(info.text("longName"), Some("Toyota Motor Corporation"));
    }

    #[test]
    fn test_null_is_replaced_by_later_module() {
        let modules = json!({
            "quoteType": {"longName": null},
            "price": {"longName": "Sony Group Corporation"}
        });
        let info = flatten_modules(modules.as_object().unwrap());
        assert_eq!(info.text("longName"), Some("Sony Group Corporation"));
    }

    #[test]
    fn test_overwrite_follows_module_order() {
        let modules = json!({
            "summaryDetail": {"forwardPE": {"raw": 9.7, "fmt": "9.70"}},
            "defaultKeyStatistics": {"forwardPE": {"raw": 9.8, "fmt": "9.80"}},
            "price": {"forwardPE": null}
        });
        let info = flatten_modules(modules.as_object().unwrap());
        assert_eq!(info.number("forwardPE"), Some(9.7));
    }

    #[test]
    fn test_null_only_key_is_absent() {
        let modules = json!({"price": {"longName": null}});
        assert!(flatten_modules(modules.as_object().unwrap()).get("longName").is_none());
    }

    #[test]
    fn test_unrequested_modules_are_ignored() {
        let modules = json!({"earnings": {"earningsChart": {"raw": 1}}});
        assert!(flatten_modules(modules.as_object().unwrap()).is_empty());
    }

    #[test]
    fn test_unformatted_values_pass_through() {
        let modules = json!({
            "summaryDetail": {"trailingPE": 10.5, "dividendYield": "Infinity"},
            "assetProfile": {"companyOfficers": [{"name": "Koji Sato"}]}
        });
        let info = flatten_modules(modules.as_object().unwrap());

        assert_eq!(info.number("trailingPE"), Some(10.5));
        assert_eq!(info.get("dividendYield"), Some(&json!("Infinity")));
        assert_eq!(info.number("dividendYield"), None);
        assert!(info.get("companyOfficers").unwrap().is_array());
    }

    #[test]
    fn test_unwrap_value() {
        assert_eq!(unwrap_value(&json!({"raw": 2, "fmt": "2"})), Some(json!(2)));
        assert_eq!(unwrap_value(&json!({})), None);
        assert_eq!(unwrap_value(&json!({"fmt": "N/A"})), None);
        assert_eq!(unwrap_value(&json!("JPY")), Some(json!("JPY")));
        assert_eq!(unwrap_value(&json!({"a": 1})), Some(json!({"a": 1})));
    }

    #[test]
    fn test_not_found() {
        let err = parse_quote_summary("9999.T", StatusCode::NOT_FOUND, NOT_FOUND_BODY).unwrap_err();
        assert!(matches!(err, YahooError::NotFound(_)));
        assert_eq!(err.to_string(), "Quote not found for symbol: 9999.T");
    }

    #[test]
    fn test_other_api_error() {
        let body = r#"{"quoteSummary":{"result":null,
            "error":{"code":"Unauthorized","description":"Invalid Crumb"}}}"#;
        let err = parse_quote_summary("7203.T", StatusCode::UNAUTHORIZED, body).unwrap_err();
        assert_eq!(err.to_string(), "Yahoo Finance API error: Unauthorized: Invalid Crumb");
    }

    #[test]
    fn test_empty_result_is_no_data() {
        let body = r#"{"quoteSummary":{"result":[],"error":null}}"#;
        let err = parse_quote_summary("7203.T", StatusCode::OK, body).unwrap_err();
        assert!(matches!(err, YahooError::NoData(ref s) if s == "7203.T"));
    }

    #[test]
    fn test_unexpected_shape() {
        let err = parse_quote_summary("7203.T", StatusCode::OK, r#"{"chart": {}}"#).unwrap_err();
        assert!(matches!(err, YahooError::Json(_)));

        let err = parse_quote_summary("7203.T", StatusCode::BAD_GATEWAY, "<html>bad gateway</html>")
            .unwrap_err();
        assert!(matches!(err, YahooError::Api(ref m) if m.starts_with("HTTP 502")));
    }

    #[test]
    fn test_parse_crumb() {
        assert_eq!(parse_crumb("Ab1.cD/eF\n").unwrap(), "Ab1.cD/eF");
        assert!(matches!(parse_crumb(""), Err(YahooError::Crumb(_))));
        assert!(matches!(parse_crumb("<!DOCTYPE html><html>"), Err(YahooError::Crumb(_))));
        assert!(matches!(parse_crumb("Too Many Requests"), Err(YahooError::RateLimitExceeded)));
        assert!(matches!(parse_crumb("two words"), Err(YahooError::Crumb(_))));
        assert!(matches!(parse_crumb(&"x".repeat(100)), Err(YahooError::Crumb(_))));
    }
}
