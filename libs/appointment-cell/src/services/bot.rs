// libs/appointment-cell/src/services/bot.rs
//
// Chat bot entry point to the booking flow. The transport (Telegram updates,
// message sending) lives outside this crate; this adapter only turns the shared
// slot listing into buttons and button presses back into bookings.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use tracing::debug;

use doctor_cell::{AvailabilityService, AvailableSlot};
use shared_models::Appointment;
use shared_utils::AppState;

use crate::models::{AppointmentError, BookAppointmentRequest};
use crate::services::booking::BookingService;

const CALLBACK_PREFIX: &str = "slot:";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotButton {
    pub label: String,
    pub callback_data: String,
}

impl From<&AvailableSlot> for SlotButton {
    fn from(slot: &AvailableSlot) -> Self {
        Self {
            label: slot.start_time.format("%H:%M").to_string(),
            callback_data: format!("{}{}:{}", CALLBACK_PREFIX, slot.date, slot.start_time.format("%H:%M")),
        }
    }
}

/// Parses `slot:<YYYY-MM-DD>:<HH:MM>` back into the chosen date and start time.
pub fn parse_callback(data: &str) -> Option<(NaiveDate, NaiveTime)> {
    let (date, time) = data.strip_prefix(CALLBACK_PREFIX)?.split_once(':')?;
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let time = NaiveTime::parse_from_str(time, "%H:%M").ok()?;
    Some((date, time))
}

/// Lays buttons out in rows of `per_row`, as inline keyboards expect.
pub fn keyboard_rows(buttons: Vec<SlotButton>, per_row: usize) -> Vec<Vec<SlotButton>> {
    buttons
        .chunks(per_row.max(1))
        .map(<[SlotButton]>::to_vec)
        .collect()
}

pub struct BotSlotAdapter {
    availability: AvailabilityService,
    booking: BookingService,
}

impl BotSlotAdapter {
    pub fn new(state: &AppState) -> Self {
        Self {
            availability: AvailabilityService::new(state),
            booking: BookingService::new(state),
        }
    }

    /// Buttons for every open slot on the date the user picked.
    pub async fn slot_buttons(
        &self,
        doctor_id: i64,
        service_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<SlotButton>, AppointmentError> {
        let slots = self.availability.get_slots_for_date(doctor_id, service_id, date).await?;
        debug!("Offering {} slot buttons for doctor {} on {}", slots.len(), doctor_id, date);

        Ok(slots.iter().map(SlotButton::from).collect())
    }

    /// Books the slot behind a pressed button.
    pub async fn book_from_callback(
        &self,
        doctor_id: i64,
        service_id: i64,
        callback_data: &str,
        client_name: &str,
        client_phone: Option<String>,
    ) -> Result<Appointment, AppointmentError> {
        let (date, start_time) = parse_callback(callback_data).ok_or_else(|| {
            AppointmentError::ValidationError(format!("unrecognised slot callback {:?}", callback_data))
        })?;

        self.booking.book_appointment(BookAppointmentRequest {
            doctor_id,
            service_id,
            date,
            start_time,
            client_name: client_name.to_string(),
            client_phone,
            notes: Some("Booked via chat bot".to_string()),
        }).await
    }
}
