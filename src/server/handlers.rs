use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use serde::Deserialize;
use tracing::info;

use super::AppState;
use crate::error::AppResult;
use crate::extractor::validate_output;

/// Request body for the parse endpoint
#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    pub text: String,
}

/// Handler for the input page
pub async fn index_handler() -> impl IntoResponse {
    Html(include_str!("../../assets/index.html"))
}

/// Handler for API health check
pub async fn health_handler() -> &'static str {
    "OK"
}

/// Handler for event extraction.
///
/// Sends the pasted text to the completion service, validates the returned
/// JSON and datetime fields, and forwards the model output verbatim.
pub async fn parse_handler(
    State(state): State<AppState>,
    Json(request): Json<ParseRequest>,
) -> AppResult<impl IntoResponse> {
    info!("Extracting event from {} bytes of text", request.text.len());

    let raw = state.completion.complete(&request.text).await?;
    let candidate = validate_output(&raw)?;

    info!(title = ?candidate.title, "Event extraction succeeded");

    Ok(([(header::CONTENT_TYPE, "application/json")], raw))
}
