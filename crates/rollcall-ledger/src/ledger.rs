//! The attendance ledger: one roster per scanning session and the
//! transition rules applied to it.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use rollcall_core::Result;
use rollcall_core::models::class::ClassRoster;
use rollcall_core::models::student::{AttendanceStatus, StudentRecord};
use rollcall_core::models::summary::CreateDaySummary;
use rollcall_core::repository::RosterRepository;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::MarkError;

/// Upper bound of the recent-scans log; the oldest entry is evicted.
pub const RECENT_SCANS_CAP: usize = 5;

/// How a mark came in: a decoded QR payload or an operator
/// search-and-select.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkSource {
    #[default]
    Scan,
    Manual,
}

impl MarkSource {
    pub fn as_str(self) -> &'static str {
        match self {
            MarkSource::Scan => "scan",
            MarkSource::Manual => "manual",
        }
    }
}

/// One entry of the recent-scans log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanEntry {
    pub record: StudentRecord,
    pub source: MarkSource,
}

/// Aggregate roster counts, recomputed on demand from the current
/// record statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RosterCounts {
    pub present: u32,
    pub absent: u32,
    pub late: u32,
    pub total: u32,
}

/// Owns one class roster for the duration of a scanning session and
/// applies attendance transitions with duplicate protection.
///
/// All operations are synchronous, immediate-return mutations of
/// in-memory state; serialize access per roster when sharing across
/// tasks.
#[derive(Debug, Clone)]
pub struct AttendanceLedger {
    roster: ClassRoster,
    recent_scans: VecDeque<ScanEntry>,
    opened_at: DateTime<Utc>,
}

impl AttendanceLedger {
    /// Load a fresh roster for `class_id` and start a scanning session
    /// over it.
    pub async fn open<R: RosterRepository>(class_id: Uuid, rosters: &R) -> Result<Self> {
        let roster = rosters.load_roster(class_id).await?;
        Ok(Self::from_roster(roster))
    }

    pub fn from_roster(roster: ClassRoster) -> Self {
        Self {
            roster,
            recent_scans: VecDeque::with_capacity(RECENT_SCANS_CAP),
            opened_at: Utc::now(),
        }
    }

    pub fn roster(&self) -> &ClassRoster {
        &self.roster
    }

    /// Transition a student's record for this session.
    ///
    /// The only mutating path is absent → present, which stamps
    /// `time_scanned` and appends the updated record to the
    /// recent-scans log. Unknown ids and re-scans of already-marked
    /// students are rejected with no mutation.
    pub fn mark_attendance(
        &mut self,
        student_id: &str,
        source: MarkSource,
    ) -> std::result::Result<StudentRecord, MarkError> {
        let record = self
            .roster
            .students
            .iter_mut()
            .find(|s| s.student_id == student_id)
            .ok_or_else(|| MarkError::UnknownStudent {
                student_id: student_id.to_string(),
            })?;

        if record.status.is_marked() {
            return Err(MarkError::DuplicateScan {
                student_id: student_id.to_string(),
            });
        }

        record.status = AttendanceStatus::Present;
        record.time_scanned = Some(Utc::now());
        let updated = record.clone();

        if self.recent_scans.len() == RECENT_SCANS_CAP {
            self.recent_scans.pop_back();
        }
        self.recent_scans.push_front(ScanEntry {
            record: updated.clone(),
            source,
        });

        info!(
            student = %updated.student_id,
            class = %self.roster.subject_code,
            source = source.as_str(),
            "attendance marked"
        );
        Ok(updated)
    }

    /// Search the roster: case-insensitive substring match on the name,
    /// substring match on the id. The returned iterator is lazy and
    /// restartable; an empty query yields the full roster.
    pub fn search_roster<'a>(&'a self, query: &'a str) -> impl Iterator<Item = &'a StudentRecord> {
        let needle = query.to_lowercase();
        self.roster
            .students
            .iter()
            .filter(move |s| s.name.to_lowercase().contains(&needle) || s.student_id.contains(query))
    }

    pub fn counts(&self) -> RosterCounts {
        let mut counts = RosterCounts {
            present: 0,
            absent: 0,
            late: 0,
            total: self.roster.total_students() as u32,
        };
        for student in &self.roster.students {
            match student.status {
                AttendanceStatus::Present => counts.present += 1,
                AttendanceStatus::Absent => counts.absent += 1,
                AttendanceStatus::Late => counts.late += 1,
            }
        }
        counts
    }

    /// The bounded recent-scans log, most recent first.
    pub fn recent_scans(&self) -> impl Iterator<Item = &ScanEntry> {
        self.recent_scans.iter()
    }

    /// Snapshot today's counts for archiving.
    pub fn close(&self) -> CreateDaySummary {
        let counts = self.counts();
        CreateDaySummary {
            date: self.opened_at.date_naive(),
            class_id: self.roster.class_id,
            class_name: self.roster.class_name.clone(),
            subject_code: self.roster.subject_code.clone(),
            total_students: counts.total,
            present: counts.present,
            absent: counts.absent,
            late: counts.late,
        }
    }
}
