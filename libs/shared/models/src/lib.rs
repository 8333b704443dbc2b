pub mod appointment;
pub mod doctor;
pub mod error;
pub mod schedule;
pub mod service;

pub use appointment::{Appointment, AppointmentStatus, NewAppointment};
pub use doctor::{Doctor, NewDoctor};
pub use schedule::{ExceptionKind, ScheduleException, TimeRange, WeeklySchedule};
pub use service::{NewService, Service, ServiceChanges};
