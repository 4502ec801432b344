/**
 * Error Conversion
 *
 * This module provides conversion implementations for backend errors,
 * allowing them to be returned directly from handlers.
 *
 * # Response Format
 *
 * Error responses are returned as JSON with the following structure:
 * ```json
 * {
 *   "error": "Content must be at least 10 characters",
 *   "status": 400,
 *   "field": "content"
 * }
 * ```
 * `field` is only present on validation errors that know it.
 */

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    response::{IntoResponse, Json, Response},
};
use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let BackendError::Internal { message } = &self {
            tracing::error!("Request failed: {}", message);
        }

        let mut body = serde_json::json!({
            "error": self.public_message(),
            "status": status.as_u16(),
        });
        if let Some(field) = self.field() {
            body["field"] = serde_json::Value::String(field.to_string());
        }

        (status, Json(body)).into_response()
    }
}

/// Malformed or unexpected JSON bodies are validation errors
impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected JSON body: {}", rejection.body_text());
        BackendError::bad_request(rejection.body_text())
    }
}

/// Unparseable query strings are validation errors
impl From<QueryRejection> for BackendError {
    fn from(rejection: QueryRejection) -> Self {
        BackendError::bad_request(rejection.body_text())
    }
}
