//! Server configuration: TOML file with environment overrides.

use std::fs;
use std::path::Path;

use anyhow::Context;
use rollcall_db::DbConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Session inactivity window in seconds.
    pub idle_timeout_secs: u64,
    /// Populate the demo catalog on first run.
    pub seed_demo: bool,
    pub database: DbConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8076".into(),
            idle_timeout_secs: 1800,
            seed_demo: true,
            database: DbConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load from `$ROLLCALL_CONFIG` (default `rollcall.toml`), falling
    /// back to defaults when the file does not exist. `ROLLCALL_LISTEN`
    /// and `ROLLCALL_DB_PATH` override the file.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("ROLLCALL_CONFIG").unwrap_or_else(|_| "rollcall.toml".into());

        let mut config = if Path::new(&path).exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed to read config file {path}"))?;
            toml::from_str(&raw).with_context(|| format!("failed to parse config file {path}"))?
        } else {
            Self::default()
        };

        if let Ok(listen) = std::env::var("ROLLCALL_LISTEN") {
            config.listen_addr = listen;
        }
        if let Ok(db_path) = std::env::var("ROLLCALL_DB_PATH") {
            config.database.path = db_path;
        }

        Ok(config)
    }
}
