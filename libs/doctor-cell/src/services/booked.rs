use std::collections::HashMap;

use chrono::NaiveDate;

use shared_models::{Appointment, TimeRange};

/// Active (pending or confirmed) appointments grouped by date.
#[derive(Debug, Clone, Default)]
pub struct AppointmentIndex {
    by_date: HashMap<NaiveDate, Vec<TimeRange>>,
}

impl AppointmentIndex {
    pub fn new<'a, I>(appointments: I) -> Self
    where
        I: IntoIterator<Item = &'a Appointment>,
    {
        let mut by_date: HashMap<NaiveDate, Vec<TimeRange>> = HashMap::new();
        for appointment in appointments.into_iter().filter(|a| a.is_active()) {
            by_date.entry(appointment.date).or_default().push(appointment.time_range());
        }

        Self { by_date }
    }

    pub fn booked_for_day(&self, date: NaiveDate) -> &[TimeRange] {
        self.by_date.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared_models::AppointmentStatus;
    use shared_utils::test_utils::{reference_monday, time};

    fn appointment(id: i64, start: u32, status: AppointmentStatus) -> Appointment {
        Appointment {
            id,
            doctor_id: 1,
            service_id: 1,
            date: reference_monday(),
            start_time: time(start, 0),
            end_time: time(start + 1, 0),
            status,
            client_name: format!("Client {}", id),
            client_phone: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_cancelled_and_completed_do_not_occupy() {
        let appointments = vec![
            appointment(1, 9, AppointmentStatus::Pending),
            appointment(2, 10, AppointmentStatus::Confirmed),
            appointment(3, 11, AppointmentStatus::Cancelled),
            appointment(4, 12, AppointmentStatus::Completed),
        ];

        let index = AppointmentIndex::new(&appointments);
        let booked = index.booked_for_day(reference_monday());

        assert_eq!(booked.len(), 2);
        assert_eq!(booked[0].start_time, time(9, 0));
        assert_eq!(booked[1].start_time, time(10, 0));
        assert!(index.booked_for_day(reference_monday().succ_opt().unwrap()).is_empty());
    }
}
