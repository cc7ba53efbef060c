//! Domain model for worker attendance.
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceRecord {
    pub worker_id: String,
    pub worker_name: String,
    pub date: NaiveDate,
    pub time_of_arrival: NaiveTime,
    pub time_of_departure: Option<NaiveTime>,
}

/// How attendance rows are keyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceMode {
    /// One row per worker in the `attendance` table. A new submission
    /// replaces the worker's previous row even when the date differs; this
    /// matches existing data files and is most likely unintended.
    Compat,
    /// One row per worker and date in the `attendance_daily` table.
    Daily,
}

impl AttendanceMode {
    pub fn table(&self) -> &'static str {
        match self {
            AttendanceMode::Compat => "attendance",
            AttendanceMode::Daily => "attendance_daily",
        }
    }
}
