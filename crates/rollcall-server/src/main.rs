//! Rollcall Server — Application entry point.

mod api;
mod config;
mod state;

use rollcall_auth::{SessionConfig, SessionEvent, password};
use rollcall_db::DbManager;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Password of the seeded demo account.
const DEMO_PASSWORD: &str = "password123";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("rollcall=info".parse()?),
        )
        .json()
        .init();

    let config = ServerConfig::load()?;
    info!("Starting rollcall server...");

    let manager = DbManager::open(&config.database).await?;
    rollcall_db::run_migrations(manager.client()).await?;

    if config.seed_demo {
        let hash = password::hash_password(DEMO_PASSWORD)?;
        rollcall_db::seed::seed_demo_data(manager.client(), hash).await?;
    }

    let session_config = SessionConfig {
        idle_timeout: Duration::from_secs(config.idle_timeout_secs),
        ..SessionConfig::default()
    };
    let state = AppState::new(manager.client().clone(), session_config);

    // Surface idle expiries in the server log; the UI learns about
    // them through its own subscription (or a 401 on the next call).
    let mut events = state.sessions.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                SessionEvent::Expired { user_id } => {
                    warn!(%user_id, "session expired due to inactivity");
                }
            }
        }
    });

    if let Some(session) = state.sessions.resume_session().await? {
        info!(user = %session.email, "restored remembered session");
    }

    let app = api::router(state);
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!(addr = %config.listen_addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
