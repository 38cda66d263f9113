//! API Client
//!
//! Resolves request paths against the configured base URL and sends them
//! with the configured credentials.

use super::http::{ApiHttpClient, ApiResponse};
use anyhow::{Context, Result};
use reqwest::Method;
use serde_json::Value;
use url::Url;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const MERGE_PATCH_CONTENT_TYPE: &str = "application/merge-patch+json";

/// Description of one outbound call, built before anything is sent
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the base URL, query string included
    pub path: String,
    pub body: Option<Value>,
    pub content_type: &'static str,
}

impl ApiRequest {
    pub fn get(path: String) -> Self {
        Self {
            method: Method::GET,
            path,
            body: None,
            content_type: JSON_CONTENT_TYPE,
        }
    }

    pub fn post(path: String, body: Value) -> Self {
        Self {
            method: Method::POST,
            path,
            body: Some(body),
            content_type: JSON_CONTENT_TYPE,
        }
    }

    pub fn put(path: String, body: Value) -> Self {
        Self {
            method: Method::PUT,
            path,
            body: Some(body),
            content_type: JSON_CONTENT_TYPE,
        }
    }

    pub fn patch(path: String, body: Value) -> Self {
        Self {
            method: Method::PATCH,
            path,
            body: Some(body),
            content_type: MERGE_PATCH_CONTENT_TYPE,
        }
    }

    pub fn delete(path: String) -> Self {
        Self {
            method: Method::DELETE,
            path,
            body: None,
            content_type: JSON_CONTENT_TYPE,
        }
    }
}

/// Main API client
#[derive(Clone)]
pub struct ApiClient {
    pub http: ApiHttpClient,
    pub base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new client for a server root such as `http://localhost:8080/`
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;
        let http = ApiHttpClient::new()?;

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    /// Absolute URL for a relative request path
    pub fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("Invalid request path: {}", path))
    }

    pub async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let url = self.url(&request.path)?;
        let body = request.body.as_ref().map(|b| (b, request.content_type));
        self.http
            .send(request.method.clone(), url, self.token.as_deref(), body)
            .await
    }
}

/// Parse a base URL, making sure relative joins land under its path
fn parse_base_url(base_url: &str) -> Result<Url> {
    let mut normalized = base_url.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    Url::parse(&normalized).with_context(|| format!("Invalid base URL: {}", base_url))
}
