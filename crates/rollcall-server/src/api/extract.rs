//! Authenticated-session extractor.

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use rollcall_core::models::session::Session;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::state::AppState;

/// The active faculty session, resolved from the bearer token.
///
/// Use as an extractor in route handlers; rejects with 401 when no
/// matching session is active. Every successful extraction counts as
/// observed user activity and pushes the idle deadline forward.
#[derive(Debug, Clone)]
pub struct ActiveSession(pub Session);

impl FromRequestParts<AppState> for ActiveSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .ok_or_else(|| ApiError::unauthorized("Missing authentication token"))?;

        let token: Uuid = token
            .parse()
            .map_err(|_| ApiError::unauthorized("Malformed session token"))?;

        let session = state
            .sessions
            .current()
            .filter(|s| s.id == token)
            .ok_or_else(ApiError::session_expired)?;

        state.sessions.touch_activity();
        Ok(ActiveSession(session))
    }
}
