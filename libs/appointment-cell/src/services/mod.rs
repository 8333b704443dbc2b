pub mod booking;
pub mod bot;
pub mod lifecycle;

pub use booking::BookingService;
pub use bot::{BotSlotAdapter, SlotButton};
pub use lifecycle::AppointmentLifecycleService;
