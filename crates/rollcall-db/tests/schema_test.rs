//! Integration tests for schema initialization using in-memory SurrealDB.

use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

#[tokio::test]
async fn schema_migration_applies_successfully() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    rollcall_db::run_migrations(&db).await.unwrap();

    // Verify that the tables exist by querying INFO FOR DB.
    let mut result = db.query("INFO FOR DB").await.unwrap();
    let info: surrealdb::Value = result.take(0).unwrap();
    let info_str = format!("{:?}", info);

    assert!(info_str.contains("faculty"), "missing faculty table");
    assert!(
        info_str.contains("remembered_session"),
        "missing remembered_session table"
    );
    assert!(info_str.contains("class"), "missing class table");
    assert!(info_str.contains("student"), "missing student table");
    assert!(
        info_str.contains("day_summary"),
        "missing day_summary table"
    );
    assert!(
        info_str.contains("_migration"),
        "missing migration tracking table"
    );
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    rollcall_db::run_migrations(&db).await.unwrap();
    // A second run must see the recorded version and apply nothing.
    rollcall_db::run_migrations(&db).await.unwrap();

    #[derive(serde::Deserialize)]
    struct CountRow {
        total: u64,
    }

    let mut result = db
        .query("SELECT count() AS total FROM _migration GROUP ALL")
        .await
        .unwrap();
    let rows: Vec<CountRow> = result.take(0).unwrap();
    assert_eq!(rows[0].total, 1);
}
