use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;
use shared_utils::AppState;

use crate::models::{CreateServiceRequest, UpdateServiceRequest};
use crate::services::CatalogService;

#[axum::debug_handler]
pub async fn create_service(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateServiceRequest>,
) -> Result<Json<Value>, AppError> {
    let service = CatalogService::new(&state).create_service(request).await?;

    Ok(Json(json!(service)))
}

#[axum::debug_handler]
pub async fn list_services(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let services = CatalogService::new(&state).list_services().await;

    Ok(Json(json!({
        "services": services,
        "total": services.len()
    })))
}

#[axum::debug_handler]
pub async fn get_service(
    State(state): State<Arc<AppState>>,
    Path(service_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = CatalogService::new(&state).get_service(service_id).await?;

    Ok(Json(json!(service)))
}

#[axum::debug_handler]
pub async fn update_service(
    State(state): State<Arc<AppState>>,
    Path(service_id): Path<i64>,
    Json(request): Json<UpdateServiceRequest>,
) -> Result<Json<Value>, AppError> {
    let service = CatalogService::new(&state).update_service(service_id, request).await?;

    Ok(Json(json!(service)))
}
