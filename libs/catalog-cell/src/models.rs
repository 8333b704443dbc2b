use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_database::DatabaseError;
use shared_models::error::AppError;

/// Longest service the scheduler accepts: one full day.
pub const MAX_DURATION_MINUTES: u32 = 24 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateServiceRequest {
    pub name: String,
    pub duration_minutes: u32,
    pub price: Option<f64>,
    pub company_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateServiceRequest {
    pub name: Option<String>,
    pub duration_minutes: Option<u32>,
    pub price: Option<f64>,
    pub is_active: Option<bool>,
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Service not found: {0}")]
    NotFound(i64),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(_) => AppError::NotFound(err.to_string()),
            CatalogError::ValidationError(_) => AppError::ValidationError(err.to_string()),
            CatalogError::Database(DatabaseError::NotFound(msg)) => AppError::NotFound(msg),
            CatalogError::Database(DatabaseError::Conflict(msg)) => AppError::Conflict(msg),
        }
    }
}
