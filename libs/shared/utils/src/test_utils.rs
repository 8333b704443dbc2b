use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use shared_config::AppConfig;
use shared_models::{Doctor, NewDoctor, NewService, Service, WeeklySchedule};

use crate::clock::FixedClock;
use crate::state::AppState;

pub struct TestConfig {
    pub max_slot_range_days: i64,
    pub company_id: i64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            max_slot_range_days: 31,
            company_id: 1,
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            max_slot_range_days: self.max_slot_range_days,
            default_company_id: self.company_id,
        }
    }

    /// State whose clock is frozen at `now`.
    pub fn state_at(&self, now: NaiveDateTime) -> Arc<AppState> {
        Arc::new(AppState::with_clock(self.to_app_config(), Arc::new(FixedClock(now))))
    }
}

pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid wall-clock time")
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

/// Monday 2026-10-19, the reference day used across the scheduling tests.
pub fn reference_monday() -> NaiveDate {
    date(2026, 10, 19)
}

/// Early morning of the week before `reference_monday`, so no test slot is in the past.
pub fn reference_now() -> NaiveDateTime {
    date(2026, 10, 12).and_time(time(7, 0))
}

/// Monday to Friday 09:00-17:00, weekend rows present but not working.
pub fn weekday_nine_to_five(doctor_id: i64) -> Vec<WeeklySchedule> {
    (0..7u8)
        .map(|day_of_week| WeeklySchedule {
            doctor_id,
            day_of_week,
            start_time: time(9, 0),
            end_time: time(17, 0),
            is_working_day: day_of_week < 5,
        })
        .collect()
}

pub struct SeededClinic {
    pub doctor: Doctor,
    pub service: Service,
}

/// Seeds one doctor on a weekday 09:00-17:00 week and one service of `duration_minutes`.
pub async fn seed_clinic(state: &AppState, duration_minutes: u32) -> SeededClinic {
    let doctor = state.db.insert_doctor(NewDoctor {
        company_id: state.config.default_company_id,
        full_name: "Dr. Test".to_string(),
        specialty: Some("General Practice".to_string()),
    }).await;

    state.db
        .replace_weekly_schedule(doctor.id, weekday_nine_to_five(doctor.id))
        .await
        .expect("seeded doctor exists");

    let service = state.db.insert_service(NewService {
        company_id: state.config.default_company_id,
        name: "Consultation".to_string(),
        duration_minutes,
        price: Some(50.0),
    }).await;

    SeededClinic { doctor, service }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_config_creation() {
        let config = TestConfig::default().to_app_config();

        assert_eq!(config.max_slot_range_days, 31);
        assert_eq!(config.default_company_id, 1);
    }

    #[test]
    fn test_reference_dates() {
        assert_eq!(reference_monday().weekday(), chrono::Weekday::Mon);
        assert!(reference_now().date() < reference_monday());
    }

    #[tokio::test]
    async fn test_seed_clinic() {
        let state = TestConfig::default().state_at(reference_now());
        let clinic = seed_clinic(&state, 60).await;

        assert_eq!(clinic.service.duration_minutes, 60);
        assert_eq!(state.db.weekly_schedule(clinic.doctor.id).await.len(), 7);
    }
}
