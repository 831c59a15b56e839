//! API error responses with stable machine-readable codes.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rollcall_auth::SessionError;
use rollcall_core::Error;
use rollcall_ledger::MarkError;
use serde_json::json;
use tracing::error;

/// An error payload the UI can act on: a stable code plus a
/// human-readable message. No error here is fatal; every rejection
/// leaves server state unchanged.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "UNAUTHENTICATED", message)
    }

    pub fn session_expired() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "SESSION_EXPIRED",
            "Session expired, please log in again",
        )
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "VALIDATION", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(code = self.code, message = %self.message, "request failed");
        }
        let body = Json(json!({
            "error": {
                "code": self.code,
                "message": self.message,
            }
        }));
        (self.status, body).into_response()
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InvalidCredentials => Self::new(
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "Invalid credentials",
            ),
            SessionError::Expired => Self::session_expired(),
            SessionError::Validation(message) => Self::validation(message),
            SessionError::Crypto(message) => Self::internal(message),
            SessionError::Storage(inner) => inner.into(),
        }
    }
}

impl From<MarkError> for ApiError {
    fn from(err: MarkError) -> Self {
        match err {
            MarkError::UnknownStudent { .. } => Self::new(
                StatusCode::NOT_FOUND,
                "UNKNOWN_STUDENT",
                "Invalid code or student not enrolled in this class",
            ),
            MarkError::DuplicateScan { .. } => Self::new(
                StatusCode::CONFLICT,
                "DUPLICATE_SCAN",
                "Student already scanned today",
            ),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound { entity, id } => {
                Self::not_found(format!("{entity} {id} not found"))
            }
            Error::Validation { message } => Self::validation(message),
            Error::Storage(message) | Error::Internal(message) => Self::internal(message),
        }
    }
}
