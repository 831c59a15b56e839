//! SurrealDB implementation of [`RosterRepository`].

use rollcall_core::Result;
use rollcall_core::models::class::{ClassInfo, ClassRoster};
use rollcall_core::models::student::{AttendanceStatus, StudentRecord};
use rollcall_core::repository::RosterRepository;
use serde::Deserialize;
use surrealdb::{Connection, Surreal};
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, Deserialize)]
struct ClassRowWithId {
    record_id: String,
    name: String,
    subject_code: String,
}

#[derive(Debug, Deserialize)]
struct ClassRow {
    name: String,
    subject_code: String,
}

#[derive(Debug, Deserialize)]
struct StudentRow {
    student_id: String,
    name: String,
    email: String,
}

/// SurrealDB implementation of the class catalog and roster source.
#[derive(Clone)]
pub struct SurrealRosterRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealRosterRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    /// Insert a class catalog entry (used by seeding and tests).
    pub async fn create_class(&self, name: &str, subject_code: &str) -> Result<ClassInfo> {
        let id = Uuid::new_v4();

        self.db
            .query(
                "CREATE type::record('class', $id) SET \
                 name = $name, \
                 subject_code = $subject_code",
            )
            .bind(("id", id.to_string()))
            .bind(("name", name.to_string()))
            .bind(("subject_code", subject_code.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from)?;

        Ok(ClassInfo {
            id,
            name: name.to_string(),
            subject_code: subject_code.to_string(),
        })
    }

    /// Enroll a student in a class (used by seeding and tests).
    pub async fn enroll_student(
        &self,
        class_id: Uuid,
        student_id: &str,
        name: &str,
        email: &str,
    ) -> Result<()> {
        self.db
            .query(
                "CREATE student SET \
                 class_id = $class_id, \
                 student_id = $student_id, \
                 name = $name, \
                 email = $email",
            )
            .bind(("class_id", class_id.to_string()))
            .bind(("student_id", student_id.to_string()))
            .bind(("name", name.to_string()))
            .bind(("email", email.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from)?;

        Ok(())
    }
}

impl<C: Connection> RosterRepository for SurrealRosterRepository<C> {
    async fn list_classes(&self) -> Result<Vec<ClassInfo>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM class \
                 ORDER BY subject_code",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ClassRowWithId> = result.take(0).map_err(DbError::from)?;
        rows.into_iter()
            .map(|row| {
                let id = Uuid::parse_str(&row.record_id)
                    .map_err(|e| DbError::Corrupt(format!("invalid class UUID: {e}")))?;
                Ok(ClassInfo {
                    id,
                    name: row.name,
                    subject_code: row.subject_code,
                })
            })
            .collect::<std::result::Result<Vec<_>, DbError>>()
            .map_err(Into::into)
    }

    async fn load_roster(&self, class_id: Uuid) -> Result<ClassRoster> {
        let id_str = class_id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('class', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let classes: Vec<ClassRow> = result.take(0).map_err(DbError::from)?;
        let class = classes.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "class".into(),
            id: id_str.clone(),
        })?;

        let mut result = self
            .db
            .query(
                "SELECT * FROM student WHERE class_id = $class_id \
                 ORDER BY student_id",
            )
            .bind(("class_id", id_str))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<StudentRow> = result.take(0).map_err(DbError::from)?;
        let students = rows
            .into_iter()
            .map(|row| StudentRecord {
                student_id: row.student_id,
                name: row.name,
                email: row.email,
                status: AttendanceStatus::Absent,
                time_scanned: None,
            })
            .collect();

        Ok(ClassRoster {
            class_id,
            class_name: class.name,
            subject_code: class.subject_code,
            students,
        })
    }
}
