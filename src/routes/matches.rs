use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::compatibility::mutual_interests;
use crate::models::{CompatibilityRequest, CompatibilityResponse, ErrorResponse, HealthResponse};
use crate::routes::AppState;

/// Configure matching and health routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/compatibility", web::post().to(compatibility));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Compatibility endpoint
///
/// POST /api/compatibility
///
/// Request body:
/// ```json
/// {
///   "current":   { "id": "me", "interests": ["music", "art"], "city": "London" },
///   "candidate": { "id": "1",  "interests": ["music", "food"], "city": "London" }
/// }
/// ```
async fn compatibility(
    state: web::Data<AppState>,
    req: web::Json<CompatibilityRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for compatibility request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse::with_details(
            "Validation failed",
            errors.to_string(),
        ));
    }

    let result = state.engine.score(&req.current, &req.candidate);
    let mutual = mutual_interests(&req.current, &req.candidate);

    tracing::info!(
        "Scored {} against {}: {}",
        req.current.id,
        req.candidate.id,
        result.overall_score
    );

    HttpResponse::Ok().json(CompatibilityResponse {
        mutual_interests: mutual,
        compatibility: result,
    })
}
