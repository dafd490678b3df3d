use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use eventmatch::config::Settings;
use eventmatch::core::{CityProximity, CompatibilityEngine};
use eventmatch::models::ErrorResponse;
use eventmatch::routes::{self, AppState};
use eventmatch::services::EventbriteClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// JSON error response for extractor errors
#[derive(Debug)]
pub struct JsonError {
    pub body: ErrorResponse,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.body.details {
            Some(details) => write!(f, "{}: {}", self.body.error, details),
            None => write!(f, "{}", self.body.error),
        }
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(&self.body)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        body: ErrorResponse::with_details("Invalid JSON", err.to_string()),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        body: ErrorResponse::with_details("Invalid query", err.to_string()),
        status_code: 400,
    }
    .into()
}

fn init_tracing(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("Configuration error: {}", e)))?;

    init_tracing(&settings.logging.level, &settings.logging.format);

    info!("Starting Eventmatch events proxy...");

    let eventbrite = EventbriteClient::new(
        settings.eventbrite.api_base.clone(),
        Duration::from_secs(settings.eventbrite.timeout_secs),
    )
    .map_err(|e| {
        error!("Failed to create Eventbrite client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    info!("Eventbrite client initialized ({})", eventbrite.base_url());

    if settings.eventbrite.api_key.is_none() {
        error!("EVENTBRITE_API_KEY is not set; /api/events will answer 500");
    }

    let weights = settings.scoring_weights();
    let engine = CompatibilityEngine::with_proximity(
        weights,
        CityProximity::new(settings.scoring.different_city_proximity),
    );

    info!("Compatibility engine initialized with weights: {:?}", weights);

    let app_state = AppState {
        eventbrite: Arc::new(eventbrite),
        api_key: settings.eventbrite.api_key.clone(),
        engine,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(routes::cors())
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
