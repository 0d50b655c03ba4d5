mod handlers;

pub use handlers::{health_handler, index_handler, parse_handler, ParseRequest};

use crate::error::Error;
use crate::extractor::CompletionService;
use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::error;

/// Shared state for all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Completion service used to extract event fields from text
    pub completion: Arc<dyn CompletionService>,
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/api/parse", post(parse_handler))
        .layer(DefaultBodyLimit::max(1024 * 1024)) // 1MB limit
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// Every endpoint-side failure becomes the JSON error envelope the client
// expects, with a failure status and a server-side log line.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
