// Route exports
pub mod events;
pub mod matches;

use crate::core::CompatibilityEngine;
use crate::services::EventbriteClient;
use actix_cors::Cors;
use actix_web::{http::header, web};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub eventbrite: Arc<EventbriteClient>,
    pub api_key: Option<String>,
    pub engine: CompatibilityEngine,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(events::configure)
            .configure(matches::configure),
    );
}

/// Any origin, `GET` and `OPTIONS`, `Content-Type` header
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allowed_methods(vec!["GET", "OPTIONS"])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(3600)
}
