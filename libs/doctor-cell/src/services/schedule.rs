use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use shared_database::{Database, DatabaseError};
use shared_models::{ExceptionKind, ScheduleException, WeeklySchedule};
use shared_utils::AppState;

use crate::models::{
    CreateExceptionRequest, DoctorError, ReplaceWeeklyScheduleRequest, UpdateWeeklyDayRequest,
};

/// Weekly schedule and exception management for doctors.
pub struct ScheduleService {
    db: Arc<Database>,
}

impl ScheduleService {
    pub fn new(state: &AppState) -> Self {
        Self { db: state.db.clone() }
    }

    /// Replace the doctor's full week.
    pub async fn replace_weekly_schedule(
        &self,
        doctor_id: i64,
        request: ReplaceWeeklyScheduleRequest,
    ) -> Result<Vec<WeeklySchedule>, DoctorError> {
        debug!("Replacing weekly schedule for doctor {}", doctor_id);

        let mut seen_days = HashSet::new();
        let mut rows = Vec::with_capacity(request.days.len());
        for entry in request.days {
            if !seen_days.insert(entry.day_of_week) {
                return Err(DoctorError::InvalidSchedule(format!(
                    "day {} listed more than once", entry.day_of_week
                )));
            }

            let row = WeeklySchedule {
                doctor_id,
                day_of_week: entry.day_of_week,
                start_time: entry.start_time,
                end_time: entry.end_time,
                is_working_day: entry.is_working_day,
            };
            validate_weekly_row(&row)?;
            rows.push(row);
        }

        let saved = self.db.replace_weekly_schedule(doctor_id, rows).await?;
        info!("Weekly schedule for doctor {} now has {} days", doctor_id, saved.len());
        Ok(saved)
    }

    pub async fn get_weekly_schedule(&self, doctor_id: i64) -> Result<Vec<WeeklySchedule>, DoctorError> {
        self.db.get_doctor(doctor_id).await?;
        Ok(self.db.weekly_schedule(doctor_id).await)
    }

    /// Patch individual fields of one weekday.
    pub async fn update_weekly_day(
        &self,
        doctor_id: i64,
        day_of_week: u8,
        request: UpdateWeeklyDayRequest,
    ) -> Result<WeeklySchedule, DoctorError> {
        if day_of_week > 6 {
            return Err(DoctorError::InvalidSchedule(format!("day_of_week {} is outside 0..=6", day_of_week)));
        }

        let mut row = self.db.weekly_schedule(doctor_id).await
            .into_iter()
            .find(|row| row.day_of_week == day_of_week)
            .ok_or_else(|| DatabaseError::NotFound(format!(
                "schedule for doctor {} on day {}", doctor_id, day_of_week
            )))?;

        if let Some(start_time) = request.start_time {
            row.start_time = start_time;
        }
        if let Some(end_time) = request.end_time {
            row.end_time = end_time;
        }
        if let Some(is_working_day) = request.is_working_day {
            row.is_working_day = is_working_day;
        }
        validate_weekly_row(&row)?;

        Ok(self.db.update_weekly_day(row).await?)
    }

    /// Record a day-off, modified hours, extra working day or break.
    pub async fn create_exception(
        &self,
        doctor_id: i64,
        request: CreateExceptionRequest,
    ) -> Result<ScheduleException, DoctorError> {
        let kind = request.kind()?;
        debug!("Creating {} exception for doctor {} on {}", kind.label(), doctor_id, request.date);

        if let Some(hours) = kind.hours() {
            if !hours.is_valid() {
                return Err(DoctorError::ValidationError(format!(
                    "{} exception must start before it ends", kind.label()
                )));
            }
        }

        let exception = self.db
            .insert_exception(doctor_id, request.date, kind, request.reason)
            .await?;

        if matches!(exception.kind, ExceptionKind::DayOff) {
            info!("Doctor {} marked off on {}", doctor_id, exception.date);
        }
        Ok(exception)
    }

    pub async fn list_exceptions(
        &self,
        doctor_id: i64,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> Result<Vec<ScheduleException>, DoctorError> {
        if date_from > date_to {
            return Err(DoctorError::InvalidRange("date_from must not be after date_to".to_string()));
        }
        self.db.get_doctor(doctor_id).await?;

        let mut exceptions = self.db.exceptions_in_range(doctor_id, date_from, date_to).await;
        exceptions.sort_by_key(|exception| exception.date);
        Ok(exceptions)
    }

    pub async fn delete_exception(&self, doctor_id: i64, exception_id: i64) -> Result<ScheduleException, DoctorError> {
        let removed = self.db.delete_exception(doctor_id, exception_id).await?;
        debug!("Deleted exception {} of doctor {}", exception_id, doctor_id);
        Ok(removed)
    }
}

fn validate_weekly_row(row: &WeeklySchedule) -> Result<(), DoctorError> {
    if row.day_of_week > 6 {
        return Err(DoctorError::InvalidSchedule(format!(
            "day_of_week {} is outside 0..=6", row.day_of_week
        )));
    }
    if row.is_working_day && row.start_time >= row.end_time {
        return Err(DoctorError::InvalidSchedule(format!(
            "day {} must start before it ends", row.day_of_week
        )));
    }
    Ok(())
}
