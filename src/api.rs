//! REST client for the MAKE server.
//!
//! DESIGN
//! ======
//! `MakeApi` is the seam the pollers and bootstrap depend on; `HttpMakeApi`
//! is the reqwest-backed implementation. Endpoint formatting and response
//! decoding are plain functions so they can be tested without a server.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, ApiError>`. Callers treat all of these as
//! transient: the previous snapshot stays in place and the next refresh
//! tries again.

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::config::PortalConfig;
use crate::session::CollegeId;
use crate::types::{InventorySnapshot, StorageSnapshot, UserInfo};

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request never produced a response.
    #[error("request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status.
    #[error("server responded with status {status}")]
    Status { status: u16, body: String },

    /// The response body did not match the expected schema.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// A per-user endpoint was requested without a session.
    #[error("no user is logged in")]
    NotLoggedIn,
}

impl ApiError {
    /// Whether retrying the same call later could succeed.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Status { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// TRAIT
// =============================================================================

/// Network operations the portal needs from the MAKE server.
#[async_trait::async_trait]
pub trait MakeApi: Send + Sync {
    async fn fetch_inventory(&self) -> Result<InventorySnapshot, ApiError>;

    async fn fetch_student_storage(&self, college_id: &CollegeId) -> Result<StorageSnapshot, ApiError>;

    async fn fetch_user_info(&self, college_id: &CollegeId) -> Result<UserInfo, ApiError>;
}

// =============================================================================
// ENDPOINTS
// =============================================================================

fn inventory_endpoint(base_url: &str) -> String {
    format!("{base_url}/api/v2/inventory")
}

fn student_storage_endpoint(base_url: &str, college_id: &CollegeId) -> String {
    format!("{base_url}/api/v2/student_storage/user/{college_id}")
}

fn user_info_endpoint(base_url: &str, college_id: &CollegeId) -> String {
    format!("{base_url}/api/v2/users/info/{college_id}")
}

fn parse_body<T: DeserializeOwned>(status: u16, text: &str) -> Result<T, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::Status { status, body: text.to_owned() });
    }
    serde_json::from_str(text).map_err(|e| ApiError::Parse(e.to_string()))
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

pub struct HttpMakeApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpMakeApi {
    /// Build a client from typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &PortalConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.clone() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        parse_body(status, &text)
    }
}

#[async_trait::async_trait]
impl MakeApi for HttpMakeApi {
    async fn fetch_inventory(&self) -> Result<InventorySnapshot, ApiError> {
        self.get_json(&inventory_endpoint(&self.base_url)).await
    }

    async fn fetch_student_storage(&self, college_id: &CollegeId) -> Result<StorageSnapshot, ApiError> {
        self.get_json(&student_storage_endpoint(&self.base_url, college_id))
            .await
    }

    async fn fetch_user_info(&self, college_id: &CollegeId) -> Result<UserInfo, ApiError> {
        self.get_json(&user_info_endpoint(&self.base_url, college_id))
            .await
    }
}
