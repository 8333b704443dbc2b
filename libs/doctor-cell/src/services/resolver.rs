use std::collections::HashMap;

use chrono::NaiveDate;

use shared_models::schedule::day_of_week;
use shared_models::{ExceptionKind, ScheduleException, TimeRange, WeeklySchedule};

use crate::models::DayWindow;

/// Resolves the open window of a date from the weekly template and day-level
/// exceptions. Exceptions always win over the weekly schedule.
#[derive(Debug, Clone, Default)]
pub struct ScheduleResolver {
    weekly: [Option<TimeRange>; 7],
    day_overrides: HashMap<NaiveDate, ExceptionKind>,
}

impl ScheduleResolver {
    pub fn new(weekly: &[WeeklySchedule], exceptions: &[ScheduleException]) -> Self {
        let mut week = [None; 7];
        for row in weekly {
            let Some(slot) = week.get_mut(usize::from(row.day_of_week)) else {
                continue;
            };
            *slot = row.is_working_day.then(|| row.hours());
        }

        // Later rows overwrite earlier ones for the same date.
        let mut day_overrides = HashMap::new();
        for exception in exceptions.iter().filter(|e| e.kind.is_day_level()) {
            day_overrides.insert(exception.date, exception.kind);
        }

        Self { weekly: week, day_overrides }
    }

    pub fn resolve_day(&self, date: NaiveDate) -> DayWindow {
        match self.day_overrides.get(&date) {
            Some(ExceptionKind::DayOff) => return DayWindow::Closed,
            Some(ExceptionKind::Modified { start_time, end_time })
            | Some(ExceptionKind::Working { start_time, end_time }) => {
                return DayWindow::Open(TimeRange::new(*start_time, *end_time));
            }
            Some(ExceptionKind::Break { .. }) | None => {}
        }

        match self.weekly[usize::from(day_of_week(date))] {
            Some(hours) => DayWindow::Open(hours),
            None => DayWindow::Closed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_utils::test_utils::{reference_monday, time, weekday_nine_to_five};

    fn exception(id: i64, date: NaiveDate, kind: ExceptionKind) -> ScheduleException {
        ScheduleException { id, doctor_id: 1, date, kind, reason: None }
    }

    #[test]
    fn test_weekly_schedule_applies_without_exceptions() {
        let resolver = ScheduleResolver::new(&weekday_nine_to_five(1), &[]);
        let monday = reference_monday();

        assert_eq!(resolver.resolve_day(monday), DayWindow::Open(TimeRange::new(time(9, 0), time(17, 0))));
        // Saturday row exists but is not a working day.
        assert_eq!(resolver.resolve_day(monday + chrono::Duration::days(5)), DayWindow::Closed);
    }

    #[test]
    fn test_missing_weekday_row_is_closed() {
        let week: Vec<_> = weekday_nine_to_five(1).into_iter().filter(|row| row.day_of_week != 2).collect();
        let resolver = ScheduleResolver::new(&week, &[]);

        assert_eq!(resolver.resolve_day(reference_monday() + chrono::Duration::days(2)), DayWindow::Closed);
    }

    #[test]
    fn test_day_off_closes_working_day() {
        let monday = reference_monday();
        let resolver = ScheduleResolver::new(
            &weekday_nine_to_five(1),
            &[exception(1, monday, ExceptionKind::DayOff)],
        );

        assert_eq!(resolver.resolve_day(monday), DayWindow::Closed);
    }

    #[test]
    fn test_modified_hours_replace_weekly_interval() {
        let monday = reference_monday();
        let resolver = ScheduleResolver::new(
            &weekday_nine_to_five(1),
            &[exception(1, monday, ExceptionKind::Modified { start_time: time(12, 0), end_time: time(20, 0) })],
        );

        assert_eq!(resolver.resolve_day(monday), DayWindow::Open(TimeRange::new(time(12, 0), time(20, 0))));
    }

    #[test]
    fn test_working_exception_opens_weekend() {
        let sunday = reference_monday() + chrono::Duration::days(6);
        let resolver = ScheduleResolver::new(
            &weekday_nine_to_five(1),
            &[exception(1, sunday, ExceptionKind::Working { start_time: time(10, 0), end_time: time(14, 0) })],
        );

        assert_eq!(resolver.resolve_day(sunday), DayWindow::Open(TimeRange::new(time(10, 0), time(14, 0))));
    }

    #[test]
    fn test_breaks_do_not_change_the_window() {
        let monday = reference_monday();
        let resolver = ScheduleResolver::new(
            &weekday_nine_to_five(1),
            &[exception(1, monday, ExceptionKind::Break { start_time: time(12, 0), end_time: time(13, 0) })],
        );

        assert_eq!(resolver.resolve_day(monday), DayWindow::Open(TimeRange::new(time(9, 0), time(17, 0))));
    }

    #[test]
    fn test_last_registered_day_level_exception_wins() {
        let monday = reference_monday();
        let resolver = ScheduleResolver::new(
            &weekday_nine_to_five(1),
            &[
                exception(1, monday, ExceptionKind::DayOff),
                exception(2, monday, ExceptionKind::Modified { start_time: time(8, 0), end_time: time(10, 0) }),
            ],
        );

        assert_eq!(resolver.resolve_day(monday), DayWindow::Open(TimeRange::new(time(8, 0), time(10, 0))));
    }
}
