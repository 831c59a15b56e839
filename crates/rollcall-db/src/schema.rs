//! Schema definitions and migration runner.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs and dates are stored as strings (ISO dates compare correctly
//! as text); statuses never hit the database — rosters are rebuilt
//! fresh per scanning session from enrollment rows.

use serde::Deserialize;
use surrealdb::{Connection, Surreal};
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, Deserialize)]
struct MigrationRecord {
    version: u32,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Faculty accounts (credential backend)
-- =======================================================================
DEFINE TABLE faculty SCHEMAFULL;
DEFINE FIELD name ON TABLE faculty TYPE string;
DEFINE FIELD email ON TABLE faculty TYPE string;
DEFINE FIELD role ON TABLE faculty TYPE string;
DEFINE FIELD department ON TABLE faculty TYPE string;
DEFINE FIELD password_hash ON TABLE faculty TYPE string;
DEFINE FIELD created_at ON TABLE faculty TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_faculty_email ON TABLE faculty COLUMNS email UNIQUE;

-- =======================================================================
-- Remembered session (single-record key-value surface)
-- =======================================================================
DEFINE TABLE remembered_session SCHEMAFULL;
DEFINE FIELD payload ON TABLE remembered_session TYPE string;
DEFINE FIELD saved_at ON TABLE remembered_session TYPE datetime \
    DEFAULT time::now();

-- =======================================================================
-- Class catalog
-- =======================================================================
DEFINE TABLE class SCHEMAFULL;
DEFINE FIELD name ON TABLE class TYPE string;
DEFINE FIELD subject_code ON TABLE class TYPE string;
DEFINE FIELD created_at ON TABLE class TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_class_subject ON TABLE class COLUMNS subject_code UNIQUE;

-- =======================================================================
-- Enrollment (identity only; attendance state lives in the ledger)
-- =======================================================================
DEFINE TABLE student SCHEMAFULL;
DEFINE FIELD class_id ON TABLE student TYPE string;
DEFINE FIELD student_id ON TABLE student TYPE string;
DEFINE FIELD name ON TABLE student TYPE string;
DEFINE FIELD email ON TABLE student TYPE string;
DEFINE INDEX idx_student_class_id ON TABLE student \
    COLUMNS class_id, student_id UNIQUE;

-- =======================================================================
-- Archived class-days (append-only)
-- =======================================================================
DEFINE TABLE day_summary SCHEMAFULL;
DEFINE FIELD date ON TABLE day_summary TYPE string;
DEFINE FIELD class_id ON TABLE day_summary TYPE string;
DEFINE FIELD class_name ON TABLE day_summary TYPE string;
DEFINE FIELD subject_code ON TABLE day_summary TYPE string;
DEFINE FIELD total_students ON TABLE day_summary TYPE int;
DEFINE FIELD present ON TABLE day_summary TYPE int;
DEFINE FIELD absent ON TABLE day_summary TYPE int;
DEFINE FIELD late ON TABLE day_summary TYPE int;
DEFINE FIELD created_at ON TABLE day_summary TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_day_summary_date ON TABLE day_summary COLUMNS date;
";

/// Apply any schema migrations newer than the recorded version.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            // Record the applied migration.
            db.query("CREATE _migration SET version = $version, name = $name")
                .bind(("version", migration.version))
                .bind(("name", migration.name))
                .await?
                .check()
                .map_err(|e| {
                    DbError::Migration(format!(
                        "Failed to record migration v{}: {}",
                        migration.version, e,
                    ))
                })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}
