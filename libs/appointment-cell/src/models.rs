// libs/appointment-cell/src/models.rs
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use doctor_cell::DoctorError;
use shared_database::DatabaseError;
use shared_models::error::AppError;
use shared_models::AppointmentStatus;

// ==============================================================================
// REQUEST / QUERY MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableSlotsQuery {
    pub doctor_id: i64,
    pub service_id: i64,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub doctor_id: i64,
    pub service_id: i64,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub client_name: String,
    pub client_phone: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentRangeQuery {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointment not found: {0}")]
    NotFound(i64),

    #[error("Service not found: {0}")]
    ServiceNotFound(i64),

    #[error("Service {0} is not offered anymore")]
    ServiceInactive(i64),

    #[error("Appointment slot not available")]
    SlotNotAvailable,

    #[error("Appointment cannot move from {from} to {to}")]
    InvalidStatusTransition { from: AppointmentStatus, to: AppointmentStatus },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Scheduling(#[from] DoctorError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::NotFound(_) | AppointmentError::ServiceNotFound(_) => AppError::NotFound(err.to_string()),
            AppointmentError::ServiceInactive(_) | AppointmentError::InvalidStatusTransition { .. } => {
                AppError::BadRequest(err.to_string())
            }
            AppointmentError::ValidationError(_) => AppError::ValidationError(err.to_string()),
            AppointmentError::SlotNotAvailable => AppError::Conflict(err.to_string()),
            AppointmentError::Scheduling(inner) => inner.into(),
            AppointmentError::Database(DatabaseError::NotFound(msg)) => AppError::NotFound(msg),
            AppointmentError::Database(DatabaseError::Conflict(msg)) => AppError::Conflict(msg),
        }
    }
}
