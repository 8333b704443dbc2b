use std::collections::HashMap;

use chrono::NaiveDate;

use shared_models::{ExceptionKind, ScheduleException, TimeRange};

/// Break exceptions grouped by date. Each break is an independent busy window.
#[derive(Debug, Clone, Default)]
pub struct BreakFilter {
    by_date: HashMap<NaiveDate, Vec<TimeRange>>,
}

impl BreakFilter {
    pub fn new(exceptions: &[ScheduleException]) -> Self {
        let mut by_date: HashMap<NaiveDate, Vec<TimeRange>> = HashMap::new();
        for exception in exceptions {
            if let ExceptionKind::Break { start_time, end_time } = exception.kind {
                by_date
                    .entry(exception.date)
                    .or_default()
                    .push(TimeRange::new(start_time, end_time));
            }
        }

        Self { by_date }
    }

    pub fn breaks_for_day(&self, date: NaiveDate) -> &[TimeRange] {
        self.by_date.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }
}
