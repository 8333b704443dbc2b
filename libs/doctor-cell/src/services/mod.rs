pub mod availability;
pub mod booked;
pub mod breaks;
pub mod doctor;
pub mod resolver;
pub mod schedule;
pub mod slots;

pub use availability::AvailabilityService;
pub use booked::AppointmentIndex;
pub use breaks::BreakFilter;
pub use doctor::DoctorService;
pub use resolver::ScheduleResolver;
pub use schedule::ScheduleService;
pub use slots::{SlotEnumerator, SLOT_STEP_MINUTES};
