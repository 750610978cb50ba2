//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub ocr_configured: bool,
    pub storage_configured: bool,
}

/// `GET /health` — liveness check plus configuration summary.
pub async fn check(State(ctx): State<ApiContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: crate::config::APP_VERSION,
        ocr_configured: ctx.ocr.is_some(),
        storage_configured: ctx.store.is_some(),
    })
}
