//! Embedded SurrealDB connection management.

use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};
use tracing::info;

use crate::error::DbError;

/// Configuration for the embedded database.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DbConfig {
    /// Filesystem path of the RocksDB data directory.
    pub path: String,
    /// SurrealDB namespace.
    pub namespace: String,
    /// SurrealDB database name.
    pub database: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            path: "rollcall.db".into(),
            namespace: "rollcall".into(),
            database: "main".into(),
        }
    }
}

/// Manages the embedded SurrealDB instance.
#[derive(Clone)]
pub struct DbManager {
    db: Surreal<Db>,
}

impl DbManager {
    /// Open (creating if necessary) the embedded database at the
    /// configured path and select the namespace and database.
    pub async fn open(config: &DbConfig) -> Result<Self, DbError> {
        info!(
            path = %config.path,
            namespace = %config.namespace,
            database = %config.database,
            "Opening embedded database"
        );

        let db = Surreal::new::<RocksDb>(config.path.as_str()).await?;
        db.use_ns(&config.namespace)
            .use_db(&config.database)
            .await?;

        info!("Database ready");

        Ok(Self { db })
    }

    /// Returns a handle to the underlying SurrealDB client.
    pub fn client(&self) -> &Surreal<Db> {
        &self.db
    }
}
