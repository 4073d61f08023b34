//! # REST API Interface Layer
//!
//! HTTP endpoints for the flock tracker. This layer only translates:
//! JSON bodies to domain commands, domain results to JSON responses, and
//! domain errors to status codes. Every error body is `{"message": "..."}`.

pub mod flock_apis;
pub mod mappers;
pub mod record_apis;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{error, warn};

use crate::domain::RecordError;
use shared::MessageResponse;

/// Status code for each kind of domain failure
pub fn status_for(error: &RecordError) -> StatusCode {
    match error {
        RecordError::Validation(_) => StatusCode::BAD_REQUEST,
        RecordError::NotFound(_) => StatusCode::NOT_FOUND,
        RecordError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn error_response(error: RecordError) -> Response {
    let status = status_for(&error);
    if status.is_server_error() {
        error!("Request failed: {}", error);
    } else {
        warn!("Request rejected ({}): {}", status, error);
    }
    (status, Json(MessageResponse::new(error.to_string()))).into_response()
}

/// Malformed bodies and wrong field types (e.g. a non-numeric `day`) are
/// client errors, answered with 400 rather than axum's default 422.
pub fn rejection_response(rejection: JsonRejection) -> Response {
    warn!("Rejected request body: {}", rejection.body_text());
    (
        StatusCode::BAD_REQUEST,
        Json(MessageResponse::new(format!(
            "Invalid request body: {}",
            rejection.body_text()
        ))),
    )
        .into_response()
}
