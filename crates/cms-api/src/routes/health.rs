//! Liveness endpoint.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use super::AppState;

#[derive(Debug, Serialize)]
pub(super) struct HealthResponse {
    status: &'static str,
    backend: &'static str,
}

/// `GET /health`
pub(super) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        backend: state.service.store_backend(),
    })
}
