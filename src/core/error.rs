//! Typed error handling for the invoice service
//!
//! Every failure a handler can produce is an [`InvoicerError`]. Each variant
//! carries a more specific error type for its category, and the whole
//! hierarchy maps onto an HTTP status code and a stable error code.
//!
//! # Error Categories
//!
//! - [`EntityError`]: a record addressed by id does not exist
//! - [`RequestError`]: malformed ids or bodies sent by the client
//! - [`StorageError`]: reading or writing the JSON documents failed
//! - [`RenderError`]: the PDF document could not be produced
//!
//! # Example
//!
//! ```rust,ignore
//! match ledger.invoice(7) {
//!     Ok(invoice) => println!("{}", invoice.invoice_num),
//!     Err(InvoicerError::Entity(EntityError::NotFound { id, .. })) => {
//!         println!("invoice {} is gone", id);
//!     }
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

use super::model::RecordId;

/// Result alias used across the crate
pub type InvoicerResult<T> = Result<T, InvoicerError>;

/// The main error type of the service
#[derive(Debug, Error)]
pub enum InvoicerError {
    /// Record lookups
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// Bad client input
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Persistence failures
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// PDF generation failures
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Should not happen in normal operation
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error body returned to HTTP clients
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl InvoicerError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            InvoicerError::Entity(e) => e.status_code(),
            InvoicerError::Request(_) => StatusCode::BAD_REQUEST,
            InvoicerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            InvoicerError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
            InvoicerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            InvoicerError::Entity(e) => e.error_code(),
            InvoicerError::Request(e) => e.error_code(),
            InvoicerError::Storage(_) => "STORAGE_ERROR",
            InvoicerError::Render(_) => "RENDER_ERROR",
            InvoicerError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response body
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            InvoicerError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(serde_json::json!({ "entity_type": entity_type, "id": id }))
            }
            InvoicerError::Request(RequestError::InvalidId { raw, .. }) => {
                Some(serde_json::json!({ "id": raw }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for InvoicerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        (status, Json(self.to_response())).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to record lookups
#[derive(Debug, Error)]
pub enum EntityError {
    #[error("{entity_type} not found")]
    NotFound {
        entity_type: &'static str,
        id: RecordId,
    },
}

impl EntityError {
    pub fn not_found(entity_type: &'static str, id: RecordId) -> Self {
        EntityError::NotFound { entity_type, id }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
        }
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors caused by malformed client input
#[derive(Debug, Error)]
pub enum RequestError {
    /// Path id is not an unsigned integer
    #[error("Invalid {entity_type} ID")]
    InvalidId {
        entity_type: &'static str,
        raw: String,
    },

    /// Body could not be decoded into the expected shape
    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },
}

impl RequestError {
    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidId { .. } => "INVALID_ID",
            RequestError::InvalidJson { .. } => "INVALID_JSON",
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised while reading or writing the persisted documents
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode {document}: {source}")]
    Encode {
        document: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage lock poisoned: {0}")]
    Poisoned(String),
}

// =============================================================================
// Render Errors
// =============================================================================

/// Errors raised while producing a PDF
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Error generating PDF: {0}")]
    Pdf(String),
}
