//! Request extractors
//!
//! Body and path parsing failures are turned into [`RequestError`]s so that
//! every malformed request answers 400 with the common error body, instead
//! of the mix of 400/415/422 produced by axum's own rejections.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::core::error::{InvoicerError, RequestError};
use crate::core::model::RecordId;

/// JSON body decoded with `serde_json`, regardless of `Content-Type`
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = InvoicerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| RequestError::InvalidJson {
                message: e.body_text(),
            })?;

        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|e| {
                RequestError::InvalidJson {
                    message: e.to_string(),
                }
                .into()
            })
    }
}

/// Parse a path segment as a record id
pub fn parse_id(entity_type: &'static str, raw: &str) -> Result<RecordId, RequestError> {
    raw.parse().map_err(|_| RequestError::InvalidId {
        entity_type,
        raw: raw.to_string(),
    })
}
