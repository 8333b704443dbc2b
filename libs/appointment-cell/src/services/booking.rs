// libs/appointment-cell/src/services/booking.rs
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use doctor_cell::AvailabilityService;
use shared_database::{Database, DatabaseError};
use shared_models::{Appointment, AppointmentStatus, NewAppointment, TimeRange};
use shared_utils::AppState;

use crate::models::{AppointmentError, BookAppointmentRequest};
use crate::services::lifecycle::AppointmentLifecycleService;

pub struct BookingService {
    db: Arc<Database>,
    availability: AvailabilityService,
    lifecycle: AppointmentLifecycleService,
}

impl BookingService {
    pub fn new(state: &AppState) -> Self {
        Self {
            db: state.db.clone(),
            availability: AvailabilityService::new(state),
            lifecycle: AppointmentLifecycleService::new(),
        }
    }

    /// Book a pending appointment for the service's full duration.
    pub async fn book_appointment(&self, request: BookAppointmentRequest) -> Result<Appointment, AppointmentError> {
        debug!(
            "Booking doctor {} for service {} on {} at {}",
            request.doctor_id, request.service_id, request.date, request.start_time
        );

        let client_name = request.client_name.trim();
        if client_name.is_empty() {
            return Err(AppointmentError::ValidationError("client_name must not be empty".to_string()));
        }

        let service = self.db.get_service(request.service_id).await.map_err(|e| match e {
            DatabaseError::NotFound(_) => AppointmentError::ServiceNotFound(request.service_id),
            other => AppointmentError::Database(other),
        })?;
        if !service.is_active {
            return Err(AppointmentError::ServiceInactive(service.id));
        }

        let slot_start = request.date.and_time(request.start_time);
        let slot_end = slot_start + service.duration();
        if slot_end.date() != request.date {
            return Err(AppointmentError::ValidationError("appointment must end on the day it starts".to_string()));
        }
        let range = TimeRange::new(request.start_time, slot_end.time());

        if !self.availability.is_bookable(request.doctor_id, request.date, range).await? {
            warn!("Doctor {} is not available on {} at {}", request.doctor_id, request.date, request.start_time);
            return Err(AppointmentError::SlotNotAvailable);
        }

        // Overlap is re-checked under the store's write lock.
        let appointment = self.db.insert_appointment(NewAppointment {
            doctor_id: request.doctor_id,
            service_id: service.id,
            date: request.date,
            start_time: range.start_time,
            end_time: range.end_time,
            client_name: client_name.to_string(),
            client_phone: request.client_phone,
            notes: request.notes,
        }).await?;

        info!("Appointment {} booked for doctor {} on {}", appointment.id, appointment.doctor_id, appointment.date);
        Ok(appointment)
    }

    pub async fn get_appointment(&self, appointment_id: i64) -> Result<Appointment, AppointmentError> {
        self.db.get_appointment(appointment_id).await
            .map_err(|_| AppointmentError::NotFound(appointment_id))
    }

    pub async fn get_doctor_appointments(
        &self,
        doctor_id: i64,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        if date_from > date_to {
            return Err(AppointmentError::ValidationError("date_from must not be after date_to".to_string()));
        }
        Ok(self.db.appointments_in_range(doctor_id, date_from, date_to).await)
    }

    pub async fn confirm_appointment(&self, appointment_id: i64) -> Result<Appointment, AppointmentError> {
        self.transition(appointment_id, AppointmentStatus::Confirmed).await
    }

    /// Cancellation only rewrites the status; the slot becomes free again.
    pub async fn cancel_appointment(&self, appointment_id: i64) -> Result<Appointment, AppointmentError> {
        self.transition(appointment_id, AppointmentStatus::Cancelled).await
    }

    pub async fn complete_appointment(&self, appointment_id: i64) -> Result<Appointment, AppointmentError> {
        self.transition(appointment_id, AppointmentStatus::Completed).await
    }

    async fn transition(&self, appointment_id: i64, next: AppointmentStatus) -> Result<Appointment, AppointmentError> {
        let current = self.get_appointment(appointment_id).await?;
        self.lifecycle.validate_status_transition(current.status, next)?;

        let updated = self.db.set_appointment_status(appointment_id, next).await?;
        info!("Appointment {} moved from {} to {}", appointment_id, current.status, next);
        Ok(updated)
    }
}
