//! Shared application state: the composition point wiring the session
//! manager, the repositories, and the per-class ledgers together.

use std::collections::HashMap;
use std::sync::Arc;

use rollcall_auth::{SessionConfig, SessionManager};
use rollcall_db::repository::{
    SurrealCredentialRepository, SurrealHistoryRepository, SurrealRosterRepository,
    SurrealSessionStore,
};
use rollcall_ledger::AttendanceLedger;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::Mutex;
use uuid::Uuid;

pub type Sessions =
    SessionManager<SurrealCredentialRepository<Db>, SurrealSessionStore<Db>>;

#[derive(Clone)]
pub struct AppState {
    pub sessions: Sessions,
    pub rosters: SurrealRosterRepository<Db>,
    pub history: SurrealHistoryRepository<Db>,
    /// Open scanning sessions, one ledger per class. The lock also
    /// serializes marking, keeping absent → present atomic per roster.
    pub ledgers: Arc<Mutex<HashMap<Uuid, AttendanceLedger>>>,
}

impl AppState {
    pub fn new(db: Surreal<Db>, session_config: SessionConfig) -> Self {
        let credentials = SurrealCredentialRepository::new(db.clone());
        let store = SurrealSessionStore::new(db.clone());
        Self {
            sessions: SessionManager::new(credentials, store, session_config),
            rosters: SurrealRosterRepository::new(db.clone()),
            history: SurrealHistoryRepository::new(db),
            ledgers: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}
