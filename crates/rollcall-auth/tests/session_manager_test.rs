//! Integration tests for the session manager, using the in-memory
//! database backend and paused tokio time for the idle-expiry clock.

use std::time::Duration;

use rollcall_auth::config::SessionConfig;
use rollcall_auth::error::SessionError;
use rollcall_auth::password;
use rollcall_auth::service::{LoginInput, SessionEvent, SessionManager};
use rollcall_core::models::faculty::CreateFacultyAccount;
use rollcall_db::repository::{SurrealCredentialRepository, SurrealSessionStore};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};

const FACULTY_EMAIL: &str = "faculty@example.com";
const FACULTY_PASSWORD: &str = "password123";

type TestManager =
    SessionManager<SurrealCredentialRepository<Db>, SurrealSessionStore<Db>>;

fn test_config() -> SessionConfig {
    SessionConfig {
        idle_timeout: Duration::from_secs(10),
        ..SessionConfig::default()
    }
}

/// Spin up in-memory DB, run migrations, create the faculty account.
async fn setup() -> (TestManager, Surreal<Db>) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    rollcall_db::run_migrations(&db).await.unwrap();

    let credentials = SurrealCredentialRepository::new(db.clone());
    credentials
        .create(CreateFacultyAccount {
            name: "Dr. John Smith".into(),
            email: FACULTY_EMAIL.into(),
            role: "faculty".into(),
            department: "Computer Science".into(),
            password_hash: password::hash_password(FACULTY_PASSWORD).unwrap(),
        })
        .await
        .unwrap();

    let manager = SessionManager::new(
        credentials,
        SurrealSessionStore::new(db.clone()),
        test_config(),
    );
    (manager, db)
}

/// A second manager over the same database, standing in for a fresh
/// process after restart.
fn fresh_process(db: &Surreal<Db>) -> TestManager {
    SessionManager::new(
        SurrealCredentialRepository::new(db.clone()),
        SurrealSessionStore::new(db.clone()),
        test_config(),
    )
}

fn login_input(remember_me: bool) -> LoginInput {
    LoginInput {
        email: FACULTY_EMAIL.into(),
        password: FACULTY_PASSWORD.into(),
        remember_me,
    }
}

#[tokio::test]
async fn login_happy_path() {
    let (manager, _db) = setup().await;

    let session = manager.login(login_input(false)).await.unwrap();

    assert_eq!(session.email, FACULTY_EMAIL);
    assert_eq!(session.name, "Dr. John Smith");
    assert_eq!(session.role, "faculty");
    assert_eq!(session.department, "Computer Science");
    assert_eq!(session.idle_timeout_ms, 10_000);
    assert!(!session.remember_me);

    assert!(manager.is_active());
    assert_eq!(manager.current().unwrap().id, session.id);
}

#[tokio::test]
async fn login_wrong_password() {
    let (manager, db) = setup().await;

    let err = manager
        .login(LoginInput {
            email: FACULTY_EMAIL.into(),
            password: "wrong-password".into(),
            remember_me: true,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::InvalidCredentials));
    assert!(!manager.is_active());

    // No side effects: nothing was persisted for resumption.
    let restarted = fresh_process(&db);
    assert!(restarted.resume_session().await.unwrap().is_none());
}

#[tokio::test]
async fn login_unknown_email() {
    let (manager, _db) = setup().await;

    let err = manager
        .login(LoginInput {
            email: "x@x.com".into(),
            password: "irrelevant".into(),
            remember_me: false,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::InvalidCredentials));
    assert!(!manager.is_active());
}

#[tokio::test]
async fn remember_me_survives_restart() {
    let (manager, db) = setup().await;

    let session = manager.login(login_input(true)).await.unwrap();

    let restarted = fresh_process(&db);
    let resumed = restarted.resume_session().await.unwrap().unwrap();
    assert_eq!(resumed.email, session.email);
    assert_eq!(resumed.user_id, session.user_id);
    assert!(resumed.remember_me);
    assert!(restarted.is_active());
}

#[tokio::test]
async fn plain_login_does_not_survive_restart() {
    let (manager, db) = setup().await;

    manager.login(login_input(false)).await.unwrap();

    let restarted = fresh_process(&db);
    assert!(restarted.resume_session().await.unwrap().is_none());
    assert!(!restarted.is_active());
}

#[tokio::test]
async fn logout_clears_memory_and_storage() {
    let (manager, db) = setup().await;

    manager.login(login_input(true)).await.unwrap();
    manager.logout().await.unwrap();
    assert!(!manager.is_active());

    let restarted = fresh_process(&db);
    assert!(restarted.resume_session().await.unwrap().is_none());
}

#[tokio::test]
async fn logout_without_session_succeeds() {
    let (manager, _db) = setup().await;
    manager.logout().await.unwrap();
    assert!(!manager.is_active());
}

#[tokio::test]
async fn relogin_replaces_active_session() {
    let (manager, _db) = setup().await;

    let first = manager.login(login_input(false)).await.unwrap();
    let second = manager.login(login_input(false)).await.unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(manager.current().unwrap().id, second.id);
}

// -----------------------------------------------------------------------
// Idle-expiry scenarios (paused clock)
// -----------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn idle_timeout_expires_session_exactly_once() {
    let (manager, db) = setup().await;
    let mut events = manager.subscribe();

    let session = manager.login(login_input(true)).await.unwrap();

    tokio::time::sleep(Duration::from_secs(11)).await;

    assert!(!manager.is_active());
    assert_eq!(
        events.try_recv().unwrap(),
        SessionEvent::Expired {
            user_id: session.user_id
        }
    );
    // Exactly once.
    assert!(events.try_recv().is_err());

    // Expiry also performed logout's side effects.
    let restarted = fresh_process(&db);
    assert!(restarted.resume_session().await.unwrap().is_none());
}

#[tokio::test(start_paused = true)]
async fn activity_defers_expiry() {
    let (manager, _db) = setup().await;
    let mut events = manager.subscribe();

    manager.login(login_input(false)).await.unwrap();

    tokio::time::sleep(Duration::from_secs(6)).await;
    manager.touch_activity();

    // Past the original deadline, but within the refreshed one.
    tokio::time::sleep(Duration::from_secs(6)).await;
    assert!(manager.is_active());
    assert!(events.try_recv().is_err());

    // No further activity: the refreshed deadline passes.
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(!manager.is_active());
    assert!(matches!(
        events.try_recv(),
        Ok(SessionEvent::Expired { .. })
    ));
}

#[tokio::test(start_paused = true)]
async fn logout_cancels_timer_with_no_residual_firing() {
    let (manager, _db) = setup().await;
    let mut events = manager.subscribe();

    manager.login(login_input(false)).await.unwrap();
    manager.logout().await.unwrap();

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert!(events.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn resumed_session_is_subject_to_idle_expiry() {
    let (manager, db) = setup().await;

    manager.login(login_input(true)).await.unwrap();

    let restarted = fresh_process(&db);
    let mut events = restarted.subscribe();
    restarted.resume_session().await.unwrap().unwrap();

    tokio::time::sleep(Duration::from_secs(11)).await;
    assert!(!restarted.is_active());
    assert!(matches!(
        events.try_recv(),
        Ok(SessionEvent::Expired { .. })
    ));
}
