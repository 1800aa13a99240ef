//! `/api/settings` handlers

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::core::error::InvoicerResult;
use crate::core::model::Settings;
use crate::server::extractors::JsonBody;
use crate::server::state::AppState;

pub async fn get_settings(State(state): State<AppState>) -> InvoicerResult<Json<Settings>> {
    Ok(Json(state.ledger()?.settings().clone()))
}

/// Replace the settings; a non-empty `dataDirectory` moves later saves there
pub async fn update_settings(
    State(state): State<AppState>,
    JsonBody(settings): JsonBody<Settings>,
) -> InvoicerResult<Json<Value>> {
    state.ledger()?.update_settings(settings)?;
    Ok(Json(json!({ "status": "success" })))
}
