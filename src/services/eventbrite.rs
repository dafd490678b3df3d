use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to Eventbrite
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Unauthorized: upstream rejected the API key ({0})")]
    Unauthorized(StatusCode),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Account the API key belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedUser {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// Eventbrite API client
///
/// Only the credential check is used; event search is not available on the
/// account tier, so the proxy synthesizes event records after verifying.
pub struct EventbriteClient {
    base_url: String,
    client: Client,
}

impl EventbriteClient {
    /// Create a new client with the given request timeout
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check an API key against `GET /users/me/`
    pub async fn verify_credential(&self, api_key: &str) -> Result<VerifiedUser, UpstreamError> {
        let url = format!("{}/users/me/", self.base_url.trim_end_matches('/'));

        tracing::debug!("Verifying Eventbrite API key at: {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(api_key)
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("API key verification failed: {}", status);
            return Err(UpstreamError::Unauthorized(status));
        }

        let body = response.text().await?;
        let json: Value = serde_json::from_str(&body)
            .map_err(|e| UpstreamError::InvalidResponse(format!("Failed to parse user: {}", e)))?;

        let field = |key: &str| match json.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };

        Ok(VerifiedUser {
            id: field("id"),
            name: field("name"),
        })
    }
}
