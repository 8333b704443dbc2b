use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use shared_database::{Database, DatabaseError};
use shared_models::TimeRange;
use shared_utils::{AppState, Clock};

use crate::models::{AvailableSlot, DayScheduleResponse, DayWindow, DoctorError};
use crate::services::booked::AppointmentIndex;
use crate::services::breaks::BreakFilter;
use crate::services::resolver::ScheduleResolver;
use crate::services::slots::SlotEnumerator;

/// Everything the slot engine needs for one doctor over one date range,
/// fetched once and read-only afterwards.
struct CalendarSnapshot {
    resolver: ScheduleResolver,
    breaks: BreakFilter,
    booked: AppointmentIndex,
}

impl CalendarSnapshot {
    fn enumerator(&self) -> SlotEnumerator<'_> {
        SlotEnumerator::new(&self.resolver, &self.breaks, &self.booked)
    }
}

pub struct AvailabilityService {
    db: Arc<Database>,
    clock: Arc<dyn Clock>,
    max_range_days: i64,
}

impl AvailabilityService {
    pub fn new(state: &AppState) -> Self {
        Self {
            db: state.db.clone(),
            clock: state.clock.clone(),
            max_range_days: state.config.max_slot_range_days,
        }
    }

    /// Open slots for a doctor and service over an inclusive date range.
    pub async fn get_available_slots(
        &self,
        doctor_id: i64,
        service_id: i64,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> Result<Vec<AvailableSlot>, DoctorError> {
        debug!("Calculating available slots for doctor {} from {} to {}", doctor_id, date_from, date_to);

        self.validate_range(date_from, date_to)?;

        let service = self.db.get_service(service_id).await.map_err(|e| match e {
            DatabaseError::NotFound(_) => DoctorError::ServiceNotFound(service_id),
            other => DoctorError::Database(other),
        })?;
        self.ensure_doctor(doctor_id).await?;

        let snapshot = self.load_snapshot(doctor_id, date_from, date_to).await;
        let slots = snapshot
            .enumerator()
            .enumerate_slots(service.duration(), date_from, date_to, self.clock.now());

        debug!("Found {} available slots", slots.len());
        Ok(slots)
    }

    /// Slots for a single date, as offered by the chat bot booking flow.
    pub async fn get_slots_for_date(
        &self,
        doctor_id: i64,
        service_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<AvailableSlot>, DoctorError> {
        self.get_available_slots(doctor_id, service_id, date, date).await
    }

    /// Whether `range` on `date` can still be booked with this doctor.
    pub async fn is_bookable(&self, doctor_id: i64, date: NaiveDate, range: TimeRange) -> Result<bool, DoctorError> {
        self.ensure_doctor(doctor_id).await?;

        let snapshot = self.load_snapshot(doctor_id, date, date).await;
        Ok(snapshot.enumerator().is_bookable(date, &range, self.clock.now()))
    }

    /// Resolved window and breaks of one date.
    pub async fn get_day(&self, doctor_id: i64, date: NaiveDate) -> Result<DayScheduleResponse, DoctorError> {
        self.ensure_doctor(doctor_id).await?;

        let snapshot = self.load_snapshot(doctor_id, date, date).await;
        let window = snapshot.resolver.resolve_day(date);
        let breaks = match window {
            DayWindow::Open(_) => snapshot.breaks.breaks_for_day(date).to_vec(),
            DayWindow::Closed => Vec::new(),
        };

        Ok(DayScheduleResponse {
            date,
            status: match window {
                DayWindow::Open(_) => "open",
                DayWindow::Closed => "closed",
            },
            start_time: window.open_interval().map(|open| open.start_time),
            end_time: window.open_interval().map(|open| open.end_time),
            breaks,
        })
    }

    fn validate_range(&self, date_from: NaiveDate, date_to: NaiveDate) -> Result<(), DoctorError> {
        if date_from > date_to {
            return Err(DoctorError::InvalidRange("date_from must not be after date_to".to_string()));
        }

        let span_days = (date_to - date_from).num_days() + 1;
        if span_days > self.max_range_days {
            return Err(DoctorError::InvalidRange(format!(
                "range of {} days exceeds the maximum of {}", span_days, self.max_range_days
            )));
        }

        Ok(())
    }

    async fn ensure_doctor(&self, doctor_id: i64) -> Result<(), DoctorError> {
        self.db.get_doctor(doctor_id).await
            .map(|_| ())
            .map_err(|_| DoctorError::NotFound(doctor_id))
    }

    async fn load_snapshot(&self, doctor_id: i64, date_from: NaiveDate, date_to: NaiveDate) -> CalendarSnapshot {
        let weekly = self.db.weekly_schedule(doctor_id).await;
        let exceptions = self.db.exceptions_in_range(doctor_id, date_from, date_to).await;
        let appointments = self.db.appointments_in_range(doctor_id, date_from, date_to).await;

        CalendarSnapshot {
            resolver: ScheduleResolver::new(&weekly, &exceptions),
            breaks: BreakFilter::new(&exceptions),
            booked: AppointmentIndex::new(&appointments),
        }
    }
}
