use libsql::{Builder, Connection};
use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::error::Result;

use super::schema;

const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

/// Where the libsql database lives, derived from `DATABASE_URL`.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Location<'a> {
    Memory,
    File(&'a str),
    Remote { url: &'a str },
    Replica { url: &'a str, local_path: &'a str },
}

impl<'a> Location<'a> {
    fn from_config(config: &'a DatabaseConfig) -> Self {
        let url = config.url.as_str();
        if url.starts_with("libsql://") || url.starts_with("https://") {
            match config.local_path.as_deref() {
                Some(local_path) => Self::Replica { url, local_path },
                None => Self::Remote { url },
            }
        } else if url == ":memory:" {
            Self::Memory
        } else {
            Self::File(url.strip_prefix("file:").unwrap_or(url))
        }
    }
}

/// Shared handle to the research database. Cloning is cheap.
#[derive(Clone)]
pub struct Database {
    db: Arc<libsql::Database>,
}

impl Database {
    /// Opens (or creates) the database, applies connection pragmas and makes
    /// sure the schema and default industries exist.
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let auth_token = config.auth_token.clone().unwrap_or_default();

        let db = match Location::from_config(config) {
            Location::Replica { url, local_path } => {
                Builder::new_remote_replica(local_path, url.to_string(), auth_token)
                    .build()
                    .await?
            }
            Location::Remote { url } => {
                Builder::new_remote(url.to_string(), auth_token)
                    .build()
                    .await?
            }
            Location::Memory => Builder::new_local(":memory:").build().await?,
            Location::File(path) => Builder::new_local(path).build().await?,
        };

        let database = Self { db: Arc::new(db) };
        database.configure().await?;

        let conn = database.connect()?;
        schema::init_schema(&conn).await?;

        tracing::debug!(url = %config.url, "Database ready");
        Ok(database)
    }

    pub fn connect(&self) -> Result<Connection> {
        Ok(self.db.connect()?)
    }

    async fn configure(&self) -> Result<()> {
        let conn = self.connect()?;

        let busy_timeout_ms = std::env::var("DATABASE_BUSY_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_BUSY_TIMEOUT_MS);
        let journal_mode = normalize_journal_mode(
            &std::env::var("DATABASE_JOURNAL_MODE").unwrap_or_default(),
        );

        let pragmas = [
            format!("PRAGMA busy_timeout = {busy_timeout_ms}"),
            format!("PRAGMA journal_mode = {journal_mode}"),
            "PRAGMA synchronous = NORMAL".to_string(),
        ];

        // Remote databases reject some pragmas; that is not fatal.
        for pragma in pragmas {
            if let Err(error) = conn.execute_batch(&pragma).await {
                tracing::warn!(pragma = %pragma, error = %error, "Failed to apply SQLite pragma");
            }
        }

        Ok(())
    }

    pub async fn sync(&self) -> Result<()> {
        if let Ok(sync) = self.db.sync().await {
            tracing::info!("Database synced: {:?}", sync);
        }
        Ok(())
    }
}

fn normalize_journal_mode(value: &str) -> &'static str {
    match value.trim().to_uppercase().as_str() {
        "DELETE" => "DELETE",
        "TRUNCATE" => "TRUNCATE",
        "MEMORY" => "MEMORY",
        _ => "WAL",
    }
}
