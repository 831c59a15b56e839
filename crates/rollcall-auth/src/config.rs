//! Session lifecycle configuration.

use std::time::Duration;

/// Configuration for the session manager.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Inactivity window after which an active session is forcibly
    /// ended (default: 30 minutes).
    pub idle_timeout: Duration,
    /// Minimum password length for the caller-side pre-check.
    pub min_password_length: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_millis(1_800_000),
            min_password_length: 6,
        }
    }
}
