//! SurrealDB implementation of [`CredentialRepository`].

use rollcall_core::Result;
use rollcall_core::models::faculty::{CreateFacultyAccount, FacultyAccount};
use rollcall_core::repository::CredentialRepository;
use serde::Deserialize;
use surrealdb::{Connection, Surreal};
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, Deserialize)]
struct FacultyRow {
    record_id: String,
    name: String,
    email: String,
    role: String,
    department: String,
    password_hash: String,
}

impl FacultyRow {
    fn try_into_account(self) -> std::result::Result<FacultyAccount, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Corrupt(format!("invalid faculty UUID: {e}")))?;
        Ok(FacultyAccount {
            id,
            name: self.name,
            email: self.email,
            role: self.role,
            department: self.department,
            password_hash: self.password_hash,
        })
    }
}

/// SurrealDB implementation of the credential backend.
#[derive(Clone)]
pub struct SurrealCredentialRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealCredentialRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    /// Insert a new faculty account (used by seeding and tests).
    pub async fn create(&self, input: CreateFacultyAccount) -> Result<FacultyAccount> {
        let id = Uuid::new_v4();

        self.db
            .query(
                "CREATE type::record('faculty', $id) SET \
                 name = $name, \
                 email = $email, \
                 role = $role, \
                 department = $department, \
                 password_hash = $password_hash",
            )
            .bind(("id", id.to_string()))
            .bind(("name", input.name.clone()))
            .bind(("email", input.email.clone()))
            .bind(("role", input.role.clone()))
            .bind(("department", input.department.clone()))
            .bind(("password_hash", input.password_hash.clone()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from)?;

        Ok(FacultyAccount {
            id,
            name: input.name,
            email: input.email,
            role: input.role,
            department: input.department,
            password_hash: input.password_hash,
        })
    }
}

impl<C: Connection> CredentialRepository for SurrealCredentialRepository<C> {
    async fn get_by_email(&self, email: &str) -> Result<FacultyAccount> {
        let email_owned = email.to_string();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM faculty \
                 WHERE email = $email",
            )
            .bind(("email", email_owned.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<FacultyRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "faculty".into(),
            id: email_owned,
        })?;

        row.try_into_account().map_err(Into::into)
    }
}
