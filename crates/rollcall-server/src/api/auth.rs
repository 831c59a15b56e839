//! Authentication endpoints: login, logout, session readback, and the
//! UI activity hook.

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router, extract::State};
use rollcall_auth::service::LoginInput;
use rollcall_auth::validate;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::extract::ActiveSession;
use crate::api::responses::SessionResponse;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/session", get(current_session))
        .route("/activity", post(activity))
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
    #[serde(default)]
    remember_me: bool,
}

async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    validate::validate_email(&body.email)?;
    validate::validate_password(&body.password, state.sessions.config().min_password_length)?;

    let session = state
        .sessions
        .login(LoginInput {
            email: body.email,
            password: body.password,
            remember_me: body.remember_me,
        })
        .await?;

    Ok(Json(session.into()))
}

/// Clears the session unconditionally; succeeds even when anonymous.
async fn logout(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.sessions.logout().await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn current_session(session: ActiveSession) -> Json<SessionResponse> {
    Json(session.0.into())
}

/// Pure activity ping for UI input events (pointer, keypress, scroll,
/// touch); extracting the session already reset the idle deadline.
async fn activity(_session: ActiveSession) -> StatusCode {
    StatusCode::NO_CONTENT
}
