use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use shared_models::{
    Appointment, AppointmentStatus, Doctor, NewAppointment, NewDoctor, NewService,
    ScheduleException, Service, ServiceChanges, WeeklySchedule, ExceptionKind,
};

use crate::{DatabaseError, Result};

#[derive(Default)]
struct Tables {
    next_id: i64,
    doctors: BTreeMap<i64, Doctor>,
    services: BTreeMap<i64, Service>,
    weekly: BTreeMap<i64, Vec<WeeklySchedule>>,
    // Kept in insertion order; the resolver relies on it for day-level tie-breaks.
    exceptions: Vec<ScheduleException>,
    appointments: BTreeMap<i64, Appointment>,
}

impl Tables {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-process stand-in for the relational store. Every operation takes the lock
/// once, so checks and writes made inside one call are atomic.
#[derive(Default)]
pub struct Database {
    tables: RwLock<Tables>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Doctors
    // ------------------------------------------------------------------

    pub async fn insert_doctor(&self, doctor: NewDoctor) -> Doctor {
        let mut tables = self.tables.write().await;
        let id = tables.allocate_id();
        let row = Doctor {
            id,
            company_id: doctor.company_id,
            full_name: doctor.full_name,
            specialty: doctor.specialty,
            is_active: true,
            created_at: Utc::now(),
        };
        tables.doctors.insert(id, row.clone());
        debug!("Inserted doctor {}", id);
        row
    }

    pub async fn get_doctor(&self, doctor_id: i64) -> Result<Doctor> {
        self.tables.read().await
            .doctors
            .get(&doctor_id)
            .cloned()
            .ok_or_else(|| DatabaseError::NotFound(format!("doctor {}", doctor_id)))
    }

    pub async fn list_doctors(&self) -> Vec<Doctor> {
        self.tables.read().await.doctors.values().cloned().collect()
    }

    // ------------------------------------------------------------------
    // Services
    // ------------------------------------------------------------------

    pub async fn insert_service(&self, service: NewService) -> Service {
        let mut tables = self.tables.write().await;
        let id = tables.allocate_id();
        let now = Utc::now();
        let row = Service {
            id,
            company_id: service.company_id,
            name: service.name,
            duration_minutes: service.duration_minutes,
            price: service.price,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        tables.services.insert(id, row.clone());
        debug!("Inserted service {}", id);
        row
    }

    pub async fn get_service(&self, service_id: i64) -> Result<Service> {
        self.tables.read().await
            .services
            .get(&service_id)
            .cloned()
            .ok_or_else(|| DatabaseError::NotFound(format!("service {}", service_id)))
    }

    pub async fn list_services(&self) -> Vec<Service> {
        self.tables.read().await.services.values().cloned().collect()
    }

    pub async fn update_service(&self, service_id: i64, changes: ServiceChanges) -> Result<Service> {
        let mut tables = self.tables.write().await;
        let service = tables.services
            .get_mut(&service_id)
            .ok_or_else(|| DatabaseError::NotFound(format!("service {}", service_id)))?;

        if let Some(name) = changes.name {
            service.name = name;
        }
        if let Some(duration) = changes.duration_minutes {
            service.duration_minutes = duration;
        }
        if let Some(price) = changes.price {
            service.price = Some(price);
        }
        if let Some(is_active) = changes.is_active {
            service.is_active = is_active;
        }
        service.updated_at = Utc::now();

        Ok(service.clone())
    }

    // ------------------------------------------------------------------
    // Weekly schedule
    // ------------------------------------------------------------------

    /// Deletes the doctor's whole week and inserts `rows` in its place.
    pub async fn replace_weekly_schedule(&self, doctor_id: i64, mut rows: Vec<WeeklySchedule>) -> Result<Vec<WeeklySchedule>> {
        let mut tables = self.tables.write().await;
        if !tables.doctors.contains_key(&doctor_id) {
            return Err(DatabaseError::NotFound(format!("doctor {}", doctor_id)));
        }

        rows.sort_by_key(|row| row.day_of_week);
        tables.weekly.insert(doctor_id, rows.clone());
        debug!("Replaced weekly schedule for doctor {} ({} days)", doctor_id, rows.len());
        Ok(rows)
    }

    pub async fn weekly_schedule(&self, doctor_id: i64) -> Vec<WeeklySchedule> {
        self.tables.read().await
            .weekly
            .get(&doctor_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn update_weekly_day(&self, row: WeeklySchedule) -> Result<WeeklySchedule> {
        let mut tables = self.tables.write().await;
        let existing = tables.weekly
            .get_mut(&row.doctor_id)
            .and_then(|week| week.iter_mut().find(|day| day.day_of_week == row.day_of_week))
            .ok_or_else(|| DatabaseError::NotFound(format!(
                "schedule for doctor {} on day {}", row.doctor_id, row.day_of_week
            )))?;

        *existing = row.clone();
        Ok(row)
    }

    // ------------------------------------------------------------------
    // Schedule exceptions
    // ------------------------------------------------------------------

    pub async fn insert_exception(
        &self,
        doctor_id: i64,
        date: NaiveDate,
        kind: ExceptionKind,
        reason: Option<String>,
    ) -> Result<ScheduleException> {
        let mut tables = self.tables.write().await;
        if !tables.doctors.contains_key(&doctor_id) {
            return Err(DatabaseError::NotFound(format!("doctor {}", doctor_id)));
        }

        let duplicate = tables.exceptions.iter().any(|existing| {
            existing.doctor_id == doctor_id && existing.date == date && existing.kind == kind
        });
        if duplicate {
            return Err(DatabaseError::Conflict(format!(
                "{} exception already recorded for {}", kind.label(), date
            )));
        }

        let id = tables.allocate_id();
        let row = ScheduleException { id, doctor_id, date, kind, reason };
        tables.exceptions.push(row.clone());
        Ok(row)
    }

    pub async fn exceptions_in_range(&self, doctor_id: i64, from: NaiveDate, to: NaiveDate) -> Vec<ScheduleException> {
        self.tables.read().await
            .exceptions
            .iter()
            .filter(|row| row.doctor_id == doctor_id && row.date >= from && row.date <= to)
            .cloned()
            .collect()
    }

    pub async fn delete_exception(&self, doctor_id: i64, exception_id: i64) -> Result<ScheduleException> {
        let mut tables = self.tables.write().await;
        let position = tables.exceptions
            .iter()
            .position(|row| row.id == exception_id && row.doctor_id == doctor_id)
            .ok_or_else(|| DatabaseError::NotFound(format!("exception {}", exception_id)))?;

        Ok(tables.exceptions.remove(position))
    }

    // ------------------------------------------------------------------
    // Appointments
    // ------------------------------------------------------------------

    /// Inserts a pending appointment unless it overlaps an active appointment of the
    /// same doctor on the same date.
    pub async fn insert_appointment(&self, appointment: NewAppointment) -> Result<Appointment> {
        let mut tables = self.tables.write().await;

        let requested = appointment.time_range();
        let clash = tables.appointments.values().find(|existing| {
            existing.doctor_id == appointment.doctor_id
                && existing.date == appointment.date
                && existing.is_active()
                && existing.time_range().overlaps(&requested)
        });
        if let Some(existing) = clash {
            warn!(
                "Rejected booking for doctor {} on {} at {}: overlaps appointment {}",
                appointment.doctor_id, appointment.date, appointment.start_time, existing.id
            );
            return Err(DatabaseError::Conflict(format!(
                "time slot overlaps appointment {}", existing.id
            )));
        }

        let id = tables.allocate_id();
        let now = Utc::now();
        let row = Appointment {
            id,
            doctor_id: appointment.doctor_id,
            service_id: appointment.service_id,
            date: appointment.date,
            start_time: appointment.start_time,
            end_time: appointment.end_time,
            status: AppointmentStatus::Pending,
            client_name: appointment.client_name,
            client_phone: appointment.client_phone,
            notes: appointment.notes,
            created_at: now,
            updated_at: now,
        };
        tables.appointments.insert(id, row.clone());
        debug!("Inserted appointment {}", id);
        Ok(row)
    }

    pub async fn get_appointment(&self, appointment_id: i64) -> Result<Appointment> {
        self.tables.read().await
            .appointments
            .get(&appointment_id)
            .cloned()
            .ok_or_else(|| DatabaseError::NotFound(format!("appointment {}", appointment_id)))
    }

    /// All appointments of a doctor in the inclusive date range, ordered by date and start.
    pub async fn appointments_in_range(&self, doctor_id: i64, from: NaiveDate, to: NaiveDate) -> Vec<Appointment> {
        let mut rows: Vec<Appointment> = self.tables.read().await
            .appointments
            .values()
            .filter(|row| row.doctor_id == doctor_id && row.date >= from && row.date <= to)
            .cloned()
            .collect();

        rows.sort_by_key(|row| (row.date, row.start_time));
        rows
    }

    pub async fn set_appointment_status(&self, appointment_id: i64, status: AppointmentStatus) -> Result<Appointment> {
        let mut tables = self.tables.write().await;
        let appointment = tables.appointments
            .get_mut(&appointment_id)
            .ok_or_else(|| DatabaseError::NotFound(format!("appointment {}", appointment_id)))?;

        appointment.status = status;
        appointment.updated_at = Utc::now();
        Ok(appointment.clone())
    }
}
