//! Integration tests for the day-summary archive and the demo seeder
//! using in-memory SurrealDB.

use chrono::NaiveDate;
use rollcall_core::models::summary::CreateDaySummary;
use rollcall_core::repository::{HistoryFilter, HistoryRepository, Pagination, RosterRepository};
use rollcall_db::repository::{SurrealHistoryRepository, SurrealRosterRepository};
use rollcall_db::seed;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

/// Helper: spin up in-memory DB and run migrations.
async fn setup() -> Surreal<Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    rollcall_db::run_migrations(&db).await.unwrap();
    db
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn summary_input(
    date_str: &str,
    class_id: Uuid,
    code: &str,
    present: u32,
) -> CreateDaySummary {
    CreateDaySummary {
        date: date(date_str),
        class_id,
        class_name: format!("{code} lecture"),
        subject_code: code.into(),
        total_students: 45,
        present,
        absent: 45 - present,
        late: 0,
    }
}

/// Archive a small window of class-days across two classes and return
/// the class ids.
async fn seeded_history(repo: &SurrealHistoryRepository<Db>) -> (Uuid, Uuid) {
    let cs101 = Uuid::new_v4();
    let cs201 = Uuid::new_v4();

    repo.append(summary_input("2024-01-11", cs101, "CS101", 40))
        .await
        .unwrap();
    repo.append(summary_input("2024-01-12", cs201, "CS201", 28))
        .await
        .unwrap();
    repo.append(summary_input("2024-01-14", cs101, "CS101", 42))
        .await
        .unwrap();
    repo.append(summary_input("2024-01-15", cs101, "CS101", 38))
        .await
        .unwrap();

    (cs101, cs201)
}

// -----------------------------------------------------------------------
// Append and list
// -----------------------------------------------------------------------

#[tokio::test]
async fn append_returns_the_stored_summary() {
    let db = setup().await;
    let repo = SurrealHistoryRepository::new(db);

    let class_id = Uuid::new_v4();
    let summary = repo
        .append(summary_input("2024-01-15", class_id, "CS101", 38))
        .await
        .unwrap();

    assert_eq!(summary.class_id, class_id);
    assert_eq!(summary.date, date("2024-01-15"));
    assert_eq!(summary.present, 38);
    assert_eq!(summary.attendance_rate(), 84);
}

#[tokio::test]
async fn listing_is_newest_first() {
    let db = setup().await;
    let repo = SurrealHistoryRepository::new(db);
    seeded_history(&repo).await;

    let page = repo
        .list(HistoryFilter::default(), Pagination::default())
        .await
        .unwrap();

    assert_eq!(page.total, 4);
    let dates: Vec<String> = page.items.iter().map(|s| s.date.to_string()).collect();
    assert_eq!(
        dates,
        ["2024-01-15", "2024-01-14", "2024-01-12", "2024-01-11"]
    );
}

#[tokio::test]
async fn pagination_windows_the_results() {
    let db = setup().await;
    let repo = SurrealHistoryRepository::new(db);
    seeded_history(&repo).await;

    let page = repo
        .list(
            HistoryFilter::default(),
            Pagination {
                offset: 1,
                limit: 2,
            },
        )
        .await
        .unwrap();

    // Total counts everything; items are just the window.
    assert_eq!(page.total, 4);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].date, date("2024-01-14"));
    assert_eq!(page.items[1].date, date("2024-01-12"));
}

// -----------------------------------------------------------------------
// Filters
// -----------------------------------------------------------------------

#[tokio::test]
async fn filter_by_class() {
    let db = setup().await;
    let repo = SurrealHistoryRepository::new(db);
    let (_, cs201) = seeded_history(&repo).await;

    let page = repo
        .list(
            HistoryFilter {
                class_id: Some(cs201),
                ..HistoryFilter::default()
            },
            Pagination::default(),
        )
        .await
        .unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].subject_code, "CS201");
}

#[tokio::test]
async fn filter_by_free_text_query() {
    let db = setup().await;
    let repo = SurrealHistoryRepository::new(db);
    seeded_history(&repo).await;

    // Case-insensitive match on the subject code.
    let page = repo
        .list(
            HistoryFilter {
                query: Some("cs201".into()),
                ..HistoryFilter::default()
            },
            Pagination::default(),
        )
        .await
        .unwrap();
    assert_eq!(page.total, 1);

    // No match is an empty page, not an error.
    let page = repo
        .list(
            HistoryFilter {
                query: Some("zzz-no-match".into()),
                ..HistoryFilter::default()
            },
            Pagination::default(),
        )
        .await
        .unwrap();
    assert_eq!(page.total, 0);
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn filter_by_date_range() {
    let db = setup().await;
    let repo = SurrealHistoryRepository::new(db);
    seeded_history(&repo).await;

    let page = repo
        .list(
            HistoryFilter {
                from: Some(date("2024-01-12")),
                to: Some(date("2024-01-14")),
                ..HistoryFilter::default()
            },
            Pagination::default(),
        )
        .await
        .unwrap();

    assert_eq!(page.total, 2);
    assert_eq!(page.items[0].date, date("2024-01-14"));
    assert_eq!(page.items[1].date, date("2024-01-12"));
}

// -----------------------------------------------------------------------
// Demo seeder
// -----------------------------------------------------------------------

#[tokio::test]
async fn seeding_populates_the_demo_catalog() {
    let db = setup().await;

    seed::seed_demo_data(&db, "$argon2id$stub-hash".into())
        .await
        .unwrap();

    let rosters = SurrealRosterRepository::new(db.clone());
    let classes = rosters.list_classes().await.unwrap();
    let codes: Vec<&str> = classes.iter().map(|c| c.subject_code.as_str()).collect();
    assert_eq!(codes, ["CS101", "CS201", "CS301"]);

    let cs101 = rosters.load_roster(classes[0].id).await.unwrap();
    assert_eq!(cs101.total_students(), 12);

    let history = SurrealHistoryRepository::new(db);
    let page = history
        .list(HistoryFilter::default(), Pagination::default())
        .await
        .unwrap();
    assert_eq!(page.total, 5);
    assert_eq!(page.items[0].date, date("2024-01-15"));
}

#[tokio::test]
async fn seeding_twice_does_not_duplicate() {
    let db = setup().await;

    seed::seed_demo_data(&db, "$argon2id$stub-hash".into())
        .await
        .unwrap();
    seed::seed_demo_data(&db, "$argon2id$stub-hash".into())
        .await
        .unwrap();

    let rosters = SurrealRosterRepository::new(db);
    assert_eq!(rosters.list_classes().await.unwrap().len(), 3);
}
