use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_database::DatabaseError;
use shared_models::error::AppError;
use shared_models::{ExceptionKind, TimeRange};

/// Effective working window of one doctor on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayWindow {
    Open(TimeRange),
    Closed,
}

impl DayWindow {
    pub fn open_interval(&self) -> Option<TimeRange> {
        match self {
            DayWindow::Open(range) => Some(*range),
            DayWindow::Closed => None,
        }
    }
}

/// A bookable interval of exactly the requested service duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableSlot {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl AvailableSlot {
    pub fn time_range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }
}

// DTO for the resolved view of a single day
#[derive(Debug, Clone, Serialize)]
pub struct DayScheduleResponse {
    pub date: NaiveDate,
    pub status: &'static str,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub breaks: Vec<TimeRange>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDoctorRequest {
    pub full_name: String,
    pub specialty: Option<String>,
    pub company_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyScheduleEntry {
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_working_day: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplaceWeeklyScheduleRequest {
    pub days: Vec<WeeklyScheduleEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateWeeklyDayRequest {
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub is_working_day: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExceptionType {
    DayOff,
    Modified,
    Working,
    Break,
}

// Times stay optional on the wire so a missing pair is reported as a validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExceptionRequest {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub exception_type: ExceptionType,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub reason: Option<String>,
}

impl CreateExceptionRequest {
    pub fn kind(&self) -> Result<ExceptionKind, DoctorError> {
        if self.exception_type == ExceptionType::DayOff {
            return Ok(ExceptionKind::DayOff);
        }

        let (start_time, end_time) = match (self.start_time, self.end_time) {
            (Some(start_time), Some(end_time)) => (start_time, end_time),
            _ => {
                return Err(DoctorError::ValidationError(format!(
                    "{:?} exception needs both start_time and end_time", self.exception_type
                )))
            }
        };

        Ok(match self.exception_type {
            ExceptionType::Modified => ExceptionKind::Modified { start_time, end_time },
            ExceptionType::Working => ExceptionKind::Working { start_time, end_time },
            _ => ExceptionKind::Break { start_time, end_time },
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRangeQuery {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayQuery {
    pub date: NaiveDate,
}

#[derive(Error, Debug)]
pub enum DoctorError {
    #[error("Doctor not found: {0}")]
    NotFound(i64),

    #[error("Service not found: {0}")]
    ServiceNotFound(i64),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<DoctorError> for AppError {
    fn from(err: DoctorError) -> Self {
        match err {
            DoctorError::NotFound(_) | DoctorError::ServiceNotFound(_) => AppError::NotFound(err.to_string()),
            DoctorError::InvalidSchedule(_) | DoctorError::ValidationError(_) => AppError::ValidationError(err.to_string()),
            DoctorError::InvalidRange(_) => AppError::BadRequest(err.to_string()),
            DoctorError::Database(DatabaseError::NotFound(msg)) => AppError::NotFound(msg),
            DoctorError::Database(DatabaseError::Conflict(msg)) => AppError::Conflict(msg),
        }
    }
}
