use serde::{Deserialize, Serialize};
use crate::models::domain::{CompatibilityResult, RawEvent};

/// Eventbrite-style pagination block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub object_count: usize,
    pub page_count: usize,
    pub page_size: usize,
    pub page_number: usize,
}

impl Pagination {
    /// Everything on one page
    pub fn single_page(count: usize) -> Self {
        Self {
            object_count: count,
            page_count: 1,
            page_size: count,
            page_number: 1,
        }
    }
}

/// Response for the events proxy endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsResponse {
    pub events: Vec<RawEvent>,
    pub pagination: Pagination,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Response for the compatibility endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityResponse {
    #[serde(rename = "mutualInterests")]
    pub mutual_interests: Vec<String>,
    pub compatibility: CompatibilityResult,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}
