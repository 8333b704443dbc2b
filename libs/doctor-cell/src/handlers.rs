use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;
use shared_utils::AppState;

use crate::models::{
    CreateDoctorRequest, CreateExceptionRequest, DateRangeQuery, DayQuery,
    ReplaceWeeklyScheduleRequest, UpdateWeeklyDayRequest,
};
use crate::services::{AvailabilityService, DoctorService, ScheduleService};

// ==============================================================================
// DOCTOR PROFILE HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn create_doctor(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateDoctorRequest>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(&state);

    let doctor = doctor_service.create_doctor(request).await?;

    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let doctors = DoctorService::new(&state).list_doctors().await;

    Ok(Json(json!({
        "doctors": doctors,
        "total": doctors.len()
    })))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let doctor = DoctorService::new(&state).get_doctor(doctor_id).await?;

    Ok(Json(json!(doctor)))
}

// ==============================================================================
// WEEKLY SCHEDULE HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_weekly_schedule(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let days = ScheduleService::new(&state).get_weekly_schedule(doctor_id).await?;

    Ok(Json(json!({
        "doctor_id": doctor_id,
        "days": days
    })))
}

#[axum::debug_handler]
pub async fn replace_weekly_schedule(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<i64>,
    Json(request): Json<ReplaceWeeklyScheduleRequest>,
) -> Result<Json<Value>, AppError> {
    let days = ScheduleService::new(&state)
        .replace_weekly_schedule(doctor_id, request)
        .await?;

    Ok(Json(json!({
        "doctor_id": doctor_id,
        "days": days
    })))
}

#[axum::debug_handler]
pub async fn update_weekly_day(
    State(state): State<Arc<AppState>>,
    Path((doctor_id, day_of_week)): Path<(i64, u8)>,
    Json(request): Json<UpdateWeeklyDayRequest>,
) -> Result<Json<Value>, AppError> {
    let day = ScheduleService::new(&state)
        .update_weekly_day(doctor_id, day_of_week, request)
        .await?;

    Ok(Json(json!(day)))
}

// ==============================================================================
// EXCEPTION HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn create_exception(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<i64>,
    Json(request): Json<CreateExceptionRequest>,
) -> Result<Json<Value>, AppError> {
    let exception = ScheduleService::new(&state)
        .create_exception(doctor_id, request)
        .await?;

    Ok(Json(json!(exception)))
}

#[axum::debug_handler]
pub async fn list_exceptions(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<i64>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<Value>, AppError> {
    let exceptions = ScheduleService::new(&state)
        .list_exceptions(doctor_id, query.date_from, query.date_to)
        .await?;

    Ok(Json(json!({
        "exceptions": exceptions,
        "total": exceptions.len()
    })))
}

#[axum::debug_handler]
pub async fn delete_exception(
    State(state): State<Arc<AppState>>,
    Path((doctor_id, exception_id)): Path<(i64, i64)>,
) -> Result<Json<Value>, AppError> {
    let removed = ScheduleService::new(&state)
        .delete_exception(doctor_id, exception_id)
        .await?;

    Ok(Json(json!({
        "deleted": true,
        "exception": removed
    })))
}

#[axum::debug_handler]
pub async fn get_day_schedule(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<i64>,
    Query(query): Query<DayQuery>,
) -> Result<Json<Value>, AppError> {
    let day = AvailabilityService::new(&state).get_day(doctor_id, query.date).await?;

    Ok(Json(json!(day)))
}
