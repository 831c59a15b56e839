//! Caller-side input validation for the login form.
//!
//! The session manager itself only checks credential equality; the UI
//! layer runs these checks before invoking `login`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::SessionError;

static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email regex is valid"));

pub fn validate_email(email: &str) -> Result<(), SessionError> {
    if email.trim().is_empty() {
        return Err(SessionError::Validation("Email is required".into()));
    }
    if !EMAIL_SHAPE.is_match(email) {
        return Err(SessionError::Validation(
            "Please enter a valid email address".into(),
        ));
    }
    Ok(())
}

pub fn validate_password(password: &str, min_length: usize) -> Result<(), SessionError> {
    if password.is_empty() {
        return Err(SessionError::Validation("Password is required".into()));
    }
    if password.len() < min_length {
        return Err(SessionError::Validation(format!(
            "Password must be at least {min_length} characters"
        )));
    }
    Ok(())
}
