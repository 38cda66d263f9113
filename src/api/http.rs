//! HTTP utilities for REST API calls

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use serde_json::Value;
use url::Url;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

pub const LINK_HEADER: &str = "link";
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let cut = (0..=MAX_LOG_BODY_LENGTH)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Body and pagination headers of a successful response
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub link: Option<String>,
    pub total_count: Option<String>,
    /// `Value::Null` for an empty body
    pub body: Value,
}

/// HTTP client wrapper for REST API calls
#[derive(Clone)]
pub struct ApiHttpClient {
    client: Client,
}

impl ApiHttpClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("seastatus/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Send one request and read the JSON response.
    ///
    /// Non-2xx statuses are errors; the body is only logged, sanitized.
    pub async fn send(
        &self,
        method: Method,
        url: Url,
        token: Option<&str>,
        body: Option<(&Value, &str)>,
    ) -> Result<ApiResponse> {
        tracing::debug!("{} {}", method, url);

        let mut request: RequestBuilder = self.client.request(method, url);

        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        if let Some((body, content_type)) = body {
            let bytes = serde_json::to_vec(body).context("Failed to encode request body")?;
            request = request.header(CONTENT_TYPE, content_type).body(bytes);
        }

        let response = request.send().await.context("Failed to send request")?;

        let status = response.status();
        let link = header_string(response.headers(), LINK_HEADER);
        let total_count = header_string(response.headers(), TOTAL_COUNT_HEADER);
        let response_body = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&response_body));
            return Err(anyhow::anyhow!(
                "Request failed with status code {}",
                status.as_u16()
            ));
        }

        // Handle empty response
        let body = if response_body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&response_body).context("Failed to parse response JSON")?
        };

        Ok(ApiResponse {
            status: status.as_u16(),
            link,
            total_count,
            body,
        })
    }
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

/// Render an error for storage in the snapshot, context chain included
pub fn format_api_error(error: &anyhow::Error) -> String {
    format!("{:#}", error)
}
