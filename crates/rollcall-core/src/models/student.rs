//! Per-student attendance record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Attendance state of one student for the current class session.
///
/// `Absent` is the implicit initial state. `Late` is a historical /
/// import status only — no live operation produces it — but every rule
/// that treats a student as "already marked" honors it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Absent,
    Present,
    Late,
}

impl AttendanceStatus {
    /// True for the terminal states a further scan must reject.
    pub fn is_marked(self) -> bool {
        matches!(self, AttendanceStatus::Present | AttendanceStatus::Late)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Present => "present",
            AttendanceStatus::Late => "late",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Unique roster key; this is the decoded QR payload.
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub status: AttendanceStatus,
    /// Set on the transition into Present/Late, never cleared.
    pub time_scanned: Option<DateTime<Utc>>,
}

impl StudentRecord {
    /// Wall-clock scan time as the UI shows it (localized hour:minute
    /// with AM/PM), or `None` if the student has not been scanned.
    pub fn time_scanned_display(&self) -> Option<String> {
        self.time_scanned
            .map(|t| t.with_timezone(&chrono::Local).format("%I:%M %p").to_string())
    }
}
