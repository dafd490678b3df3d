use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use thiserror::Error;
use crate::core::synthesize_events;
use crate::models::{ErrorResponse, EventsQuery, EventsResponse, Pagination};
use crate::routes::AppState;
use crate::services::UpstreamError;

const SYNTHESIZED_NOTE: &str =
    "Using verified API connection with mock data (search endpoint not available in current tier)";

/// Failures of the events proxy, mapped onto HTTP statuses
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Missing query or location parameter")]
    MissingParameters,

    #[error("API key not configured")]
    MissingApiKey,

    #[error("Invalid or expired API key")]
    InvalidApiKey,

    #[error("Failed to fetch events")]
    Upstream(#[source] UpstreamError),
}

impl From<UpstreamError> for ProxyError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Unauthorized(_) => ProxyError::InvalidApiKey,
            other => ProxyError::Upstream(other),
        }
    }
}

impl ResponseError for ProxyError {
    fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::MissingParameters => StatusCode::BAD_REQUEST,
            ProxyError::MissingApiKey => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::InvalidApiKey => StatusCode::UNAUTHORIZED,
            ProxyError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ProxyError::Upstream(source) => ErrorResponse::with_details(self.to_string(), source.to_string()),
            _ => ErrorResponse::new(self.to_string()),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Configure event-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/events", web::get().to(list_events));
}

/// Events proxy endpoint
///
/// GET /api/events?query={tag}&location={city}
///
/// Verifies the server-side Eventbrite key, then answers with synthesized
/// Eventbrite-shaped records for the tag.
async fn list_events(
    state: web::Data<AppState>,
    query: web::Query<EventsQuery>,
) -> Result<HttpResponse, ProxyError> {
    let (tag, location) = query.required().ok_or(ProxyError::MissingParameters)?;

    let api_key = state
        .api_key
        .as_deref()
        .filter(|key| !key.is_empty())
        .ok_or_else(|| {
            tracing::error!("Eventbrite API key is not configured");
            ProxyError::MissingApiKey
        })?;

    let user = state.eventbrite.verify_credential(api_key).await.map_err(|e| {
        tracing::error!("Proxy error: {}", e);
        ProxyError::from(e)
    })?;

    tracing::info!(
        "API key verified for user: {}",
        user.name.as_deref().unwrap_or("unknown")
    );

    let events = synthesize_events(tag, location, chrono::Utc::now().date_naive());

    tracing::info!("Returning {} events for {} in {}", events.len(), tag, location);

    Ok(HttpResponse::Ok().json(EventsResponse {
        pagination: Pagination::single_page(events.len()),
        events,
        note: Some(SYNTHESIZED_NOTE.to_string()),
    }))
}
