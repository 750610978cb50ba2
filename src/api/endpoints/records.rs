//! Row persistence endpoints: save extracted rows, list saved records,
//! and expose the user-facing sheet URL.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::normalize_sheet_row;

#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    #[serde(default)]
    pub rows: Vec<serde_json::Value>,
}

/// `POST /save` — append reviewed rows to the backing sheet.
pub async fn save(
    State(ctx): State<ApiContext>,
    Json(request): Json<SaveRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if request.rows.is_empty() {
        return Err(ApiError::BadRequest("No data".into()));
    }
    let store = ctx
        .store
        .clone()
        .ok_or(ApiError::NotConfigured("APPS_SCRIPT_URL"))?;

    // Coerce each reviewed row to the 13-column sheet schema before it ever
    // reaches a store; stores only see normalized rows.
    let rows = request
        .rows
        .iter()
        .map(|row| {
            normalize_sheet_row(row).ok_or_else(|| ApiError::BadRequest("Rows must be objects".into()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let receipt = run_store(move || store.append(&rows)).await??;

    Ok(Json(json!({
        "success": true,
        "saved": receipt.accepted,
        "total": receipt.total,
    })))
}

/// `GET /records` — all saved rows, or an empty list when no store is
/// configured.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<serde_json::Value>>, ApiError> {
    let Some(store) = ctx.store.clone() else {
        return Ok(Json(Vec::new()));
    };
    let rows = run_store(move || store.read_all()).await??;
    Ok(Json(rows))
}

/// `GET /sheet_url` — link to the backing spreadsheet, empty when unset.
pub async fn sheet_url(State(ctx): State<ApiContext>) -> Json<serde_json::Value> {
    Json(json!({ "url": ctx.sheet_url.clone().unwrap_or_default() }))
}

/// Run a blocking store call off the async runtime.
async fn run_store<T, F>(f: F) -> Result<Result<T, crate::storage::StorageError>, ApiError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, crate::storage::StorageError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(format!("storage task panicked: {e}")))
}
