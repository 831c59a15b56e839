//! SurrealDB implementation of [`SessionStore`].
//!
//! The remembered session lives in a single well-known record; save
//! replaces it, load reads it, clear removes it. The session is stored
//! as its JSON serialization so the stored shape tracks the model.

use rollcall_core::Result;
use rollcall_core::models::session::Session;
use rollcall_core::repository::SessionStore;
use serde::Deserialize;
use surrealdb::{Connection, Surreal};

use crate::error::DbError;

const RECORD_KEY: &str = "current";

#[derive(Debug, Deserialize)]
struct PayloadRow {
    payload: String,
}

/// SurrealDB implementation of the remembered-session store.
#[derive(Clone)]
pub struct SurrealSessionStore<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealSessionStore<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> SessionStore for SurrealSessionStore<C> {
    async fn save(&self, session: &Session) -> Result<()> {
        let payload = serde_json::to_string(session)
            .map_err(|e| DbError::Corrupt(format!("session serialization failed: {e}")))?;

        self.db
            .query(
                "DELETE type::record('remembered_session', $key); \
                 CREATE type::record('remembered_session', $key) SET \
                 payload = $payload",
            )
            .bind(("key", RECORD_KEY))
            .bind(("payload", payload))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn load(&self) -> Result<Option<Session>> {
        let mut result = self
            .db
            .query("SELECT payload FROM type::record('remembered_session', $key)")
            .bind(("key", RECORD_KEY))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<PayloadRow> = result.take(0).map_err(DbError::from)?;
        let Some(row) = rows.into_iter().next() else {
            return Ok(None);
        };

        let session = serde_json::from_str(&row.payload)
            .map_err(|e| DbError::Corrupt(format!("invalid stored session: {e}")))?;
        Ok(Some(session))
    }

    async fn clear(&self) -> Result<()> {
        self.db
            .query("DELETE type::record('remembered_session', $key)")
            .bind(("key", RECORD_KEY))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }
}
