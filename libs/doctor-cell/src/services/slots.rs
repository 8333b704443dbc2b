use chrono::{Duration, NaiveDate, NaiveDateTime};

use shared_models::TimeRange;

use crate::models::AvailableSlot;
use crate::services::booked::AppointmentIndex;
use crate::services::breaks::BreakFilter;
use crate::services::resolver::ScheduleResolver;

/// Candidate start times always sit on this grid, whatever the service length.
pub const SLOT_STEP_MINUTES: i64 = 30;

/// Walks a date range and emits the free slots of a doctor. All inputs are
/// fetched up front; enumeration itself is pure.
pub struct SlotEnumerator<'a> {
    resolver: &'a ScheduleResolver,
    breaks: &'a BreakFilter,
    booked: &'a AppointmentIndex,
}

impl<'a> SlotEnumerator<'a> {
    pub fn new(resolver: &'a ScheduleResolver, breaks: &'a BreakFilter, booked: &'a AppointmentIndex) -> Self {
        Self { resolver, breaks, booked }
    }

    /// Slots of `duration` between `date_from` and `date_to` inclusive, ordered by
    /// date then start time. Slots starting at or before `now` on today's date are skipped.
    pub fn enumerate_slots(
        &self,
        duration: Duration,
        date_from: NaiveDate,
        date_to: NaiveDate,
        now: NaiveDateTime,
    ) -> Vec<AvailableSlot> {
        let mut slots = Vec::new();
        if duration <= Duration::zero() {
            return slots;
        }

        let mut date = date_from;
        while date <= date_to {
            self.collect_day(date, duration, now, &mut slots);
            match date.succ_opt() {
                Some(next) => date = next,
                None => break,
            }
        }

        slots
    }

    fn collect_day(&self, date: NaiveDate, duration: Duration, now: NaiveDateTime, out: &mut Vec<AvailableSlot>) {
        let Some(open) = self.resolver.resolve_day(date).open_interval() else {
            return;
        };

        let step = Duration::minutes(SLOT_STEP_MINUTES);
        let day_end = date.and_time(open.end_time);
        let mut cursor = date.and_time(open.start_time);

        while cursor + duration <= day_end {
            let candidate = TimeRange::new(cursor.time(), (cursor + duration).time());

            if self.is_free(date, &candidate) && !is_past(date, &candidate, now) {
                out.push(AvailableSlot {
                    date,
                    start_time: candidate.start_time,
                    end_time: candidate.end_time,
                });
            }

            cursor += step;
        }
    }

    /// No overlap with any active appointment or break on `date`.
    pub fn is_free(&self, date: NaiveDate, candidate: &TimeRange) -> bool {
        let clashes_booking = self.booked.booked_for_day(date).iter().any(|busy| busy.overlaps(candidate));
        let clashes_break = self.breaks.breaks_for_day(date).iter().any(|busy| busy.overlaps(candidate));
        !clashes_booking && !clashes_break
    }

    /// Whether an arbitrary interval could be booked: inside the open window, free,
    /// and not starting in the past. Unlike enumeration it does not require grid alignment.
    pub fn is_bookable(&self, date: NaiveDate, candidate: &TimeRange, now: NaiveDateTime) -> bool {
        if !candidate.is_valid() || date < now.date() {
            return false;
        }

        let inside_window = match self.resolver.resolve_day(date).open_interval() {
            Some(open) => open.contains(candidate),
            None => false,
        };

        inside_window && self.is_free(date, candidate) && !is_past(date, candidate, now)
    }
}

fn is_past(date: NaiveDate, candidate: &TimeRange, now: NaiveDateTime) -> bool {
    date == now.date() && candidate.start_time <= now.time()
}
