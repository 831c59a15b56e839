//! Attendance marking error types.

use thiserror::Error;

/// Why a `mark_attendance` call was rejected. Every rejection leaves
/// the roster unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkError {
    /// Invalid code, or the student is not enrolled in this class.
    #[error("student {student_id} is not enrolled in this class")]
    UnknownStudent { student_id: String },

    /// The student was already scanned today; informational rather
    /// than a real fault.
    #[error("student {student_id} already scanned today")]
    DuplicateScan { student_id: String },
}
