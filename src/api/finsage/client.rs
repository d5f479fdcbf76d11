use reqwest::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use super::models::{ApiError, GraphResponse};
use crate::models::ChartRange;
use tracing::{debug, warn};

/// Client for the fund graph endpoint
#[derive(Clone)]
pub struct FinsageClient {
    http_client: HttpClient,
    base_url: String,
}

impl FinsageClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://finsage.onrender.com";

    /// Create a client against the production host
    pub fn new() -> Self {
        Self::with_base_url(Self::DEFAULT_BASE_URL.to_string())
    }

    /// Create a new client with custom base URL (for testing)
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn create_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// Map a non-success response onto an error
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();

        match status_code {
            404 => ApiError::NotFound(body_text),
            429 => {
                warn!("Graph endpoint is rate limiting us");
                ApiError::RateLimited(body_text)
            }
            500..=599 => {
                warn!("Server error {}: {}", status_code, body_text);
                ApiError::ServerError(status_code, body_text)
            }
            _ => ApiError::HttpError(status_code, body_text),
        }
    }

    /// GET /api/mf/graph?range={range}&isin={isin}
    ///
    /// The identifier is passed through verbatim; only query encoding is applied.
    pub async fn get_graph(
        &self,
        range: ChartRange,
        isin: &str,
    ) -> Result<GraphResponse, ApiError> {
        let url = format!("{}/api/mf/graph", self.base_url);
        debug!("GET {} range={} isin={}", url, range, isin);

        let response = self.http_client
            .get(&url)
            .headers(Self::create_headers())
            .query(&[("range", range.as_str()), ("isin", isin)])
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::RequestError(format!("Failed to read body: {}", e)))?;

        serde_json::from_str::<GraphResponse>(&body)
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }
}

impl Default for FinsageClient {
    fn default() -> Self {
        Self::new()
    }
}
