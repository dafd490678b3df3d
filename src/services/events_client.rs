use crate::core::{fallback_events, normalize_json};
use crate::models::NormalizedEvent;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors for a single proxy call; never escape [`EventsProxyClient::fetch_events`]
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Proxy returned {status}: {body}")]
    Status { status: reqwest::StatusCode, body: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Client for the app's own `/api/events` proxy
pub struct EventsProxyClient {
    base_url: String,
    client: Client,
}

impl EventsProxyClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { base_url, client })
    }

    /// Fetch and normalize live events for every interest tag
    ///
    /// Tags are queried one after another. A failing tag is logged and skipped.
    /// Without a token nothing is fetched.
    pub async fn fetch_events(
        &self,
        interests: &[String],
        city: &str,
        token: &str,
    ) -> Vec<NormalizedEvent> {
        if token.is_empty() {
            return Vec::new();
        }

        let mut collected: Vec<Value> = Vec::new();

        for interest in interests {
            tracing::debug!("Fetching events for {} in {}", interest, city);

            match self.fetch_tag(interest, city).await {
                Ok(events) => {
                    tracing::debug!("Received {} events for {}", events.len(), interest);
                    collected.extend(events);
                }
                Err(e) => {
                    tracing::warn!("Fetch error for {}: {}", interest, e);
                }
            }
        }

        tracing::debug!("Total events collected: {}", collected.len());

        let formatted = normalize_json(&collected);
        tracing::info!("Formatted to {} unique events", formatted.len());
        formatted
    }

    async fn fetch_tag(&self, interest: &str, city: &str) -> Result<Vec<Value>, FetchError> {
        let url = format!(
            "{}/api/events?query={}&location={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(interest),
            urlencoding::encode(city)
        );

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            return Err(FetchError::Status { status, body });
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| FetchError::InvalidResponse(e.to_string()))?;

        match json.get("events") {
            Some(Value::Array(events)) => Ok(events.clone()),
            _ => Ok(Vec::new()),
        }
    }
}

/// Picks the events shown after a match: live results, else the static catalog
pub struct EventSuggester {
    client: EventsProxyClient,
}

impl EventSuggester {
    pub fn new(client: EventsProxyClient) -> Self {
        Self { client }
    }

    pub async fn suggest(
        &self,
        interests: &[String],
        city: &str,
        token: &str,
    ) -> Vec<NormalizedEvent> {
        let live = self.client.fetch_events(interests, city, token).await;
        if !live.is_empty() {
            return live;
        }

        tracing::debug!("No live events for {:?}, using catalog", interests);
        fallback_events(interests.iter().map(String::as_str))
    }
}
