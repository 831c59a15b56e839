//! HTTP API for the external UI layer.

pub mod auth;
pub mod classes;
pub mod error;
pub mod extract;
pub mod history;
pub mod reports;
pub mod responses;

use axum::Router;

use crate::state::AppState;

pub use error::ApiError;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api/auth", auth::router())
        .nest("/api/classes", classes::router())
        .nest("/api/history", history::router())
        .nest("/api/reports", reports::router())
        .with_state(state)
}
