//! Rollcall Core — Domain models, repository traits, and shared error
//! types for the attendance system.

pub mod error;
pub mod models;
pub mod repository;

pub use error::{Error, Result};
