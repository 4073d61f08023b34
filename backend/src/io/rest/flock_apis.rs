//! # REST API for Flocks
//!
//! Read-only endpoints used by the admin overview and the flock detail view.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::info;

use super::error_response;
use super::mappers::flock_mapper::FlockMapper;
use crate::AppState;

/// All flocks with all their records
pub async fn list_all_flocks(State(state): State<AppState>) -> Response {
    info!("GET /api/flock/all-data");

    let flocks = state.record_service.list_all().await;
    (StatusCode::OK, Json(FlockMapper::to_dto_list(flocks))).into_response()
}

/// One flock by ID
pub async fn get_flock(
    State(state): State<AppState>,
    Path(flock_id): Path<String>,
) -> Response {
    info!("GET /api/flock/data/{}", flock_id);

    match state.record_service.get_flock(&flock_id).await {
        Ok(flock) => (StatusCode::OK, Json(FlockMapper::to_dto(flock))).into_response(),
        Err(e) => error_response(e),
    }
}
