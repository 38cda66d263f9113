//! REST API interaction module
//!
//! - [`client`] - base URL resolution, credentials, request descriptors
//! - [`http`] - HTTP transport and response decoding

pub mod client;
pub mod http;

pub use client::{ApiClient, ApiRequest};
pub use http::{format_api_error, ApiResponse};
