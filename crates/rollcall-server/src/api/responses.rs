//! JSON response shapes shared by the API handlers.

use rollcall_core::models::session::Session;
use rollcall_core::models::student::StudentRecord;
use rollcall_core::models::summary::DaySummary;
use rollcall_ledger::{MarkSource, RosterCounts, ScanEntry};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub department: String,
    pub remember_me: bool,
    pub idle_timeout_ms: u64,
    pub logged_in_at: String,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            id: session.id,
            user_id: session.user_id,
            name: session.name,
            email: session.email,
            role: session.role,
            department: session.department,
            remember_me: session.remember_me,
            idle_timeout_ms: session.idle_timeout_ms,
            logged_in_at: session.logged_in_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StudentResponse {
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub status: &'static str,
    pub time_scanned: Option<String>,
    /// Localized hour:minute with AM/PM, as the UI shows it.
    pub time_display: Option<String>,
}

impl From<&StudentRecord> for StudentResponse {
    fn from(record: &StudentRecord) -> Self {
        Self {
            student_id: record.student_id.clone(),
            name: record.name.clone(),
            email: record.email.clone(),
            status: record.status.as_str(),
            time_scanned: record.time_scanned.map(|t| t.to_rfc3339()),
            time_display: record.time_scanned_display(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub student: StudentResponse,
    pub source: MarkSource,
}

impl From<&ScanEntry> for ScanResponse {
    fn from(entry: &ScanEntry) -> Self {
        Self {
            student: StudentResponse::from(&entry.record),
            source: entry.source,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RosterResponse {
    pub class_id: Uuid,
    pub class_name: String,
    pub subject_code: String,
    pub counts: RosterCounts,
    pub students: Vec<StudentResponse>,
}

#[derive(Debug, Serialize)]
pub struct MarkResponse {
    pub student: StudentResponse,
    pub counts: RosterCounts,
}

#[derive(Debug, Serialize)]
pub struct DaySummaryResponse {
    pub id: Uuid,
    pub date: String,
    pub class_id: Uuid,
    pub class_name: String,
    pub subject_code: String,
    pub total_students: u32,
    pub present: u32,
    pub absent: u32,
    pub late: u32,
    pub attendance_rate: u32,
}

impl From<DaySummary> for DaySummaryResponse {
    fn from(summary: DaySummary) -> Self {
        let attendance_rate = summary.attendance_rate();
        Self {
            id: summary.id,
            date: summary.date.to_string(),
            class_id: summary.class_id,
            class_name: summary.class_name,
            subject_code: summary.subject_code,
            total_students: summary.total_students,
            present: summary.present,
            absent: summary.absent,
            late: summary.late,
            attendance_rate,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub items: Vec<DaySummaryResponse>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}
