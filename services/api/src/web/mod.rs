pub mod page;
pub mod rest;
pub mod state;

pub use page::index_handler;
pub use rest::{generate_flashcards_handler, get_flashcards_handler};

use crate::error::ApiError;
use axum::{
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use rest::ApiDoc;
use state::AppState;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Assembles the page route, the JSON endpoints and Swagger UI.
pub fn build_router(app_state: Arc<AppState>) -> Result<Router, ApiError> {
    let cors_origin = app_state.config.cors_allowed_origin.clone();

    let api_router = Router::new()
        .route("/", get(index_handler))
        .route("/generate_flashcards", post(generate_flashcards_handler))
        .route("/get_flashcards", get(get_flashcards_handler))
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024))
        .with_state(app_state);

    let mut app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http());

    if let Some(origin) = cors_origin {
        let origin = origin.parse::<HeaderValue>().map_err(|e| {
            ApiError::Internal(format!("Invalid CORS_ALLOWED_ORIGIN '{}': {}", origin, e))
        })?;
        let cors = CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([CONTENT_TYPE]);
        app = app.layer(cors);
    }

    Ok(app)
}
