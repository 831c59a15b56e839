//! Rollcall Database — SurrealDB connection management, schema
//! migrations, and repository implementations for the core traits.
//!
//! The deployment target is a single faculty device, so the database
//! runs embedded (RocksDB engine); tests use the in-memory engine.

mod connection;
mod error;
pub mod repository;
mod schema;
pub mod seed;

pub use connection::{DbConfig, DbManager};
pub use error::DbError;
pub use schema::run_migrations;
