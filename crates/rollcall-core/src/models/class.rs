//! Class catalog entry and per-session roster.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::student::StudentRecord;

/// Catalog entry for one class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassInfo {
    pub id: Uuid,
    pub name: String,
    pub subject_code: String,
}

/// The set of students enrolled in one class session.
///
/// The roster owns its records (no sharing); it is rebuilt fresh per
/// scanning session with every student starting out Absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassRoster {
    pub class_id: Uuid,
    pub class_name: String,
    pub subject_code: String,
    pub students: Vec<StudentRecord>,
}

impl ClassRoster {
    /// Enrollment count, always derived from the records themselves.
    pub fn total_students(&self) -> usize {
        self.students.len()
    }
}
