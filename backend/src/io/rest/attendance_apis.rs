//! # REST API for Attendance

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::info;

use crate::io::rest::{error_response, FormJson};
use crate::io::rest::mappers::attendance_mapper::AttendanceMapper;
use crate::AppState;
use shared::{AttendanceListResponse, RecordAttendanceRequest, RecordAttendanceResponse};

/// Create a router for attendance related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_attendance).post(record_attendance))
        .route("/:worker_id", get(get_attendance))
}

/// Record (upsert) attendance for a worker
pub async fn record_attendance(
    State(state): State<AppState>,
    FormJson(request): FormJson<RecordAttendanceRequest>,
) -> impl IntoResponse {
    info!("POST /api/attendance - request: {:?}", request);

    let command = AttendanceMapper::to_command(request);
    match state.attendance_service.record_attendance(command).await {
        Ok(result) => {
            let response = RecordAttendanceResponse {
                record: AttendanceMapper::to_dto(result.record),
                success_message: result.success_message,
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => error_response("record attendance", e),
    }
}

/// List the attendance table
pub async fn list_attendance(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/attendance");

    match state.attendance_service.list_attendance().await {
        Ok(records) => {
            let response = AttendanceListResponse {
                records: records.into_iter().map(AttendanceMapper::to_dto).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("list attendance", e),
    }
}

/// Get a worker's attendance row
pub async fn get_attendance(
    State(state): State<AppState>,
    Path(worker_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/attendance/{}", worker_id);

    match state.attendance_service.get_attendance(&worker_id).await {
        Ok(record) => (StatusCode::OK, Json(AttendanceMapper::to_dto(record))).into_response(),
        Err(e) => error_response("get attendance", e),
    }
}
