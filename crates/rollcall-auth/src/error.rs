//! Session lifecycle error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("session expired due to inactivity")]
    Expired,

    #[error("{0}")]
    Validation(String),

    #[error("cryptography error: {0}")]
    Crypto(String),

    #[error(transparent)]
    Storage(#[from] rollcall_core::Error),
}
