use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Half-open time interval `[start_time, end_time)` within a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl TimeRange {
    pub fn new(start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self { start_time, end_time }
    }

    pub fn is_valid(&self) -> bool {
        self.start_time < self.end_time
    }

    /// Two intervals overlap unless one ends before (or exactly when) the other starts.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        !(self.end_time <= other.start_time || self.start_time >= other.end_time)
    }

    pub fn contains(&self, other: &TimeRange) -> bool {
        self.start_time <= other.start_time && other.end_time <= self.end_time
    }
}

/// Day of week index used by weekly schedules: Monday = 0 ... Sunday = 6.
pub fn day_of_week(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_monday() as u8
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    pub doctor_id: i64,
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_working_day: bool,
}

impl WeeklySchedule {
    pub fn hours(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }
}

/// Kind of a schedule exception. Day-level kinds replace or cancel the whole
/// working interval of a date; breaks close a sub-window of an open day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExceptionKind {
    DayOff,
    Modified { start_time: NaiveTime, end_time: NaiveTime },
    Working { start_time: NaiveTime, end_time: NaiveTime },
    Break { start_time: NaiveTime, end_time: NaiveTime },
}

impl ExceptionKind {
    pub fn is_day_level(&self) -> bool {
        !matches!(self, ExceptionKind::Break { .. })
    }

    pub fn hours(&self) -> Option<TimeRange> {
        match *self {
            ExceptionKind::DayOff => None,
            ExceptionKind::Modified { start_time, end_time }
            | ExceptionKind::Working { start_time, end_time }
            | ExceptionKind::Break { start_time, end_time } => Some(TimeRange::new(start_time, end_time)),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExceptionKind::DayOff => "day_off",
            ExceptionKind::Modified { .. } => "modified",
            ExceptionKind::Working { .. } => "working",
            ExceptionKind::Break { .. } => "break",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleException {
    pub id: i64,
    pub doctor_id: i64,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub kind: ExceptionKind,
    pub reason: Option<String>,
}
