//! # REST API for Daily Records
//!
//! Endpoints for saving, updating and deleting a flock's daily records.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::info;

use super::mappers::flock_mapper::FlockMapper;
use super::{error_response, rejection_response};
use crate::domain::commands::records::{
    DeleteRecordCommand, SaveRecordCommand, UpdateRecordCommand,
};
use crate::AppState;
use shared::{
    DeleteRecordRequest, MessageResponse, RecordResponse, SaveRecordRequest, UpdateRecordRequest,
};

/// Save (create or replace) the record for one day
pub async fn save_record(
    State(state): State<AppState>,
    payload: Result<Json<SaveRecordRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };
    info!("POST /api/records/save - request: {:?}", request);

    let command = SaveRecordCommand {
        flock_id: request.flock_id,
        day: request.day,
        breeder_name: request.breeder_name,
        initial_chick_count: request.initial_chick_count,
        mortality: request.mortality,
        feed_kg: request.feed_kg,
        avg_weight: request.avg_weight,
        water_intake: request.water_intake,
        notes: request.notes,
    };

    match state.record_service.save_record(command).await {
        Ok(result) => {
            let response = RecordResponse {
                message: result.success_message,
                record: FlockMapper::record_to_dto(result.record),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// Patch an existing record
pub async fn update_record(
    State(state): State<AppState>,
    payload: Result<Json<UpdateRecordRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };
    info!("PUT /api/records/update - request: {:?}", request);

    let command = UpdateRecordCommand {
        flock_id: request.flock_id,
        day: request.day,
        breeder_name: request.breeder_name,
        mortality: request.mortality,
        feed_kg: request.feed_kg,
        avg_weight: request.avg_weight,
        water_intake: request.water_intake,
        notes: request.notes,
    };

    match state.record_service.update_record(command).await {
        Ok(result) => {
            let response = RecordResponse {
                message: result.success_message,
                record: FlockMapper::record_to_dto(result.record),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// Delete the record for one day
pub async fn delete_record(
    State(state): State<AppState>,
    payload: Result<Json<DeleteRecordRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };
    info!("DELETE /api/records/delete - request: {:?}", request);

    let command = DeleteRecordCommand {
        flock_id: request.flock_id,
        day: request.day,
    };

    match state.record_service.delete_record(command).await {
        Ok(result) => (
            StatusCode::OK,
            Json(MessageResponse::new(result.success_message)),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
