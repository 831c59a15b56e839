//! Archived per-day attendance summaries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One archived class-day, as the history and reports views consume it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySummary {
    pub id: Uuid,
    pub date: NaiveDate,
    pub class_id: Uuid,
    pub class_name: String,
    pub subject_code: String,
    pub total_students: u32,
    pub present: u32,
    pub absent: u32,
    pub late: u32,
}

impl DaySummary {
    /// Attendance rate as a rounded percentage, derived on demand.
    pub fn attendance_rate(&self) -> u32 {
        rate_percent(self.present, self.total_students)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDaySummary {
    pub date: NaiveDate,
    pub class_id: Uuid,
    pub class_name: String,
    pub subject_code: String,
    pub total_students: u32,
    pub present: u32,
    pub absent: u32,
    pub late: u32,
}

pub(crate) fn rate_percent(present: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (f64::from(present) * 100.0 / f64::from(total)).round() as u32
}
