use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Response from GET /api/mf/graph
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphResponse {
    #[serde(default)]
    pub historical: Option<Vec<RawRecord>>,
    #[serde(default)]
    pub predictions: Option<Vec<RawRecord>>,
}

impl GraphResponse {
    /// True when neither array carries a single record
    pub fn is_empty(&self) -> bool {
        let historical = self.historical.as_ref().map_or(0, Vec::len);
        let predictions = self.predictions.as_ref().map_or(0, Vec::len);
        historical == 0 && predictions == 0
    }
}

/// One unvalidated `{Date, Price}` record as served by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Date", default)]
    pub date: Option<String>,
    /// Usually a number, sometimes a numeric string, null for missing quotes
    #[serde(rename = "Price", default)]
    pub price: Option<Value>,
}

#[cfg(test)]
impl RawRecord {
    pub fn new(date: &str, price: f64) -> Self {
        Self {
            date: Some(date.to_string()),
            price: Some(Value::from(price)),
        }
    }
}

/// Comprehensive error type for API operations
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// 404 Not Found
    #[error("Not Found: {0}")]
    NotFound(String),
    /// 429 Too Many Requests
    #[error("Rate Limited: {0}")]
    RateLimited(String),
    /// 5xx Server Error
    #[error("Server Error ({0}): {1}")]
    ServerError(u16, String),
    /// Other HTTP errors
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, String),
    /// Network/request error
    #[error("Request Error: {0}")]
    RequestError(String),
    /// Body was not the expected JSON
    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_arrays_deserialize_as_none() {
        let response: GraphResponse = serde_json::from_str("{}").unwrap();
        assert!(response.historical.is_none());
        assert!(response.predictions.is_none());
        assert!(response.is_empty());
    }

    #[test]
    fn test_null_price_and_missing_date() {
        let response: GraphResponse = serde_json::from_str(
            r#"{"historical":[{"Date":"2024-01-01","Price":null},{"Price":5}],"predictions":[]}"#,
        )
        .unwrap();

        let historical = response.historical.as_ref().unwrap();
        assert_eq!(historical[0].date.as_deref(), Some("2024-01-01"));
        assert!(historical[0].price.is_none());
        assert!(historical[1].date.is_none());
        assert!(!response.is_empty());
    }
}
