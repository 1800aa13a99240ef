//! `/api/customers` handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::core::error::InvoicerResult;
use crate::core::ledger::CUSTOMER;
use crate::core::model::Customer;
use crate::server::extractors::{JsonBody, parse_id};
use crate::server::state::AppState;

pub async fn list_customers(
    State(state): State<AppState>,
) -> InvoicerResult<Json<Vec<Customer>>> {
    Ok(Json(state.ledger()?.customers()))
}

pub async fn get_customer(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> InvoicerResult<Json<Customer>> {
    let id = parse_id(CUSTOMER, &raw_id)?;
    Ok(Json(state.ledger()?.customer(id)?))
}

pub async fn create_customer(
    State(state): State<AppState>,
    JsonBody(draft): JsonBody<Customer>,
) -> InvoicerResult<(StatusCode, Json<Customer>)> {
    let customer = state.ledger()?.create_customer(draft)?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// Replace every field except the id
pub async fn update_customer(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    JsonBody(replacement): JsonBody<Customer>,
) -> InvoicerResult<Json<Customer>> {
    let id = parse_id(CUSTOMER, &raw_id)?;
    Ok(Json(state.ledger()?.update_customer(id, replacement)?))
}

pub async fn delete_customer(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> InvoicerResult<Json<Value>> {
    let id = parse_id(CUSTOMER, &raw_id)?;
    state.ledger()?.delete_customer(id)?;
    Ok(Json(json!({ "message": "Customer deleted successfully" })))
}
