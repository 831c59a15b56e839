//! Active-session domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated faculty session.
///
/// At most one session is active per process. Identity fields are set
/// at login and immutable thereafter. The whole value (including the
/// `remember_me` flag) is what gets persisted for session resumption.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Opaque session token handed to the UI layer.
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub department: String,
    /// Whether the session survives a process restart.
    pub remember_me: bool,
    /// Inactivity window after which the session auto-expires.
    pub idle_timeout_ms: u64,
    pub logged_in_at: DateTime<Utc>,
}
