//! `/api/invoices` handlers

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::core::error::InvoicerResult;
use crate::core::ledger::INVOICE;
use crate::core::model::Invoice;
use crate::pdf::render_invoice;
use crate::server::extractors::{JsonBody, parse_id};
use crate::server::state::AppState;

/// Optional body of the template toggle
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct TemplateRequest {
    template_name: String,
}

pub async fn list_invoices(State(state): State<AppState>) -> InvoicerResult<Json<Vec<Invoice>>> {
    Ok(Json(state.ledger()?.invoices()))
}

pub async fn get_invoice(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> InvoicerResult<Json<Invoice>> {
    let id = parse_id(INVOICE, &raw_id)?;
    Ok(Json(state.ledger()?.invoice(id)?))
}

pub async fn create_invoice(
    State(state): State<AppState>,
    JsonBody(draft): JsonBody<Invoice>,
) -> InvoicerResult<(StatusCode, Json<Invoice>)> {
    let invoice = state.ledger()?.create_invoice(draft)?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> InvoicerResult<Json<Value>> {
    let id = parse_id(INVOICE, &raw_id)?;
    state.ledger()?.delete_invoice(id)?;
    Ok(Json(json!({ "message": "Invoice deleted successfully" })))
}

/// Flip the template flag
///
/// The body is optional; anything that does not decode is treated as if no
/// template name had been sent.
pub async fn toggle_template(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> InvoicerResult<Json<Value>> {
    let id = parse_id(INVOICE, &raw_id)?;

    let template_name = if body.is_empty() {
        None
    } else {
        match serde_json::from_slice::<TemplateRequest>(&body) {
            Ok(req) => Some(req.template_name),
            Err(e) => {
                tracing::debug!(id, error = %e, "ignoring undecodable template body");
                None
            }
        }
    };

    let invoice = state.ledger()?.toggle_template(id, template_name)?;
    Ok(Json(json!({
        "message": "Template status updated",
        "template": invoice.template,
        "templateName": invoice.template_name,
    })))
}

/// Render the invoice as a PDF attachment
pub async fn invoice_pdf(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> InvoicerResult<Response> {
    let id = parse_id(INVOICE, &raw_id)?;

    let (invoice, company) = {
        let ledger = state.ledger()?;
        (ledger.invoice(id)?, ledger.settings().company.clone())
    };

    let bytes = render_invoice(&invoice, &company)?;
    let disposition = format!("attachment; filename={}", invoice.pdf_filename());

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
