//! Faculty account domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A faculty member as stored in the credential backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacultyAccount {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub department: String,
    /// Argon2id PHC-format password hash.
    pub password_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFacultyAccount {
    pub name: String,
    pub email: String,
    pub role: String,
    pub department: String,
    pub password_hash: String,
}
