//! Rollcall Auth — Credential verification and the single-session
//! lifecycle: login, remember-me resumption, logout, and inactivity
//! auto-expiry.

pub mod config;
pub mod error;
pub mod password;
pub mod service;
pub mod validate;

pub use config::SessionConfig;
pub use error::SessionError;
pub use service::{LoginInput, SessionEvent, SessionManager};
