//! Repository trait definitions for data access abstraction.
//!
//! All backend operations are async. The session manager and the
//! attendance ledger only ever see these traits, so a real backend can
//! replace the embedded store without touching the state-machine logic.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    class::{ClassInfo, ClassRoster},
    faculty::FacultyAccount,
    session::Session,
    summary::{CreateDaySummary, DaySummary},
};

/// Pagination parameters for list queries.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

/// Credential lookup for the login flow.
pub trait CredentialRepository: Send + Sync {
    fn get_by_email(&self, email: &str) -> impl Future<Output = Result<FacultyAccount>> + Send;
}

/// Durable storage for the single remembered session.
///
/// A key-value surface: `save` sets, `load` gets, `clear` removes. The
/// serialized [`Session`] carries its own `remember_me` flag.
pub trait SessionStore: Send + Sync {
    fn save(&self, session: &Session) -> impl Future<Output = Result<()>> + Send;
    fn load(&self) -> impl Future<Output = Result<Option<Session>>> + Send;
    fn clear(&self) -> impl Future<Output = Result<()>> + Send;
}

/// Source of class catalog entries and fresh rosters.
pub trait RosterRepository: Send + Sync {
    fn list_classes(&self) -> impl Future<Output = Result<Vec<ClassInfo>>> + Send;
    /// Load the enrollment for a class as a fresh roster: every record
    /// starts Absent with no scan time.
    fn load_roster(&self, class_id: Uuid) -> impl Future<Output = Result<ClassRoster>> + Send;
}

/// Query filters for archived day summaries.
#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    pub class_id: Option<Uuid>,
    /// Case-insensitive substring match against class name and subject
    /// code.
    pub query: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Archive of completed class-days (append-only).
pub trait HistoryRepository: Send + Sync {
    fn append(&self, input: CreateDaySummary) -> impl Future<Output = Result<DaySummary>> + Send;
    /// List summaries newest-first.
    fn list(
        &self,
        filter: HistoryFilter,
        pagination: Pagination,
    ) -> impl Future<Output = Result<PaginatedResult<DaySummary>>> + Send;
}
