//! REST endpoints for chatting with the intake assistant over HTTP.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::CorsLayer;

use super::service::SharedIntakeService;

/// Body of `POST /api/intake/message`.
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub message: String,
}

/// POST /api/intake/message
///
/// Runs one applicant message through the session and returns the turn:
/// the ordered reply messages and the resulting stage.
async fn post_message(
    State(service): State<SharedIntakeService>,
    Json(body): Json<MessageRequest>,
) -> impl IntoResponse {
    if body.message.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "message must not be empty"})),
        )
            .into_response();
    }
    let turn = service.handle(&body.message).await;
    Json(turn).into_response()
}

/// GET /api/intake/status
async fn get_status(State(service): State<SharedIntakeService>) -> impl IntoResponse {
    Json(service.status().await)
}

/// POST /api/intake/reset
async fn post_reset(State(service): State<SharedIntakeService>) -> impl IntoResponse {
    Json(service.reset().await)
}

/// Build the intake REST routes.
pub fn intake_routes(service: SharedIntakeService) -> Router {
    Router::new()
        .route("/api/intake/message", post(post_message))
        .route("/api/intake/status", get(get_status))
        .route("/api/intake/reset", post(post_reset))
        .layer(CorsLayer::permissive())
        .with_state(service)
}
