use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

use shop_types::ports::RepoError;

mod items;
mod orders;
mod rows;
mod users;

/// SQLite-backed repositories sharing one bounded connection pool.
///
/// Each call borrows a connection from the pool for the duration of its
/// statements; the connection goes back when the borrow (or transaction)
/// guard drops, on success and failure alike.
#[derive(Clone)]
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    pub async fn new(database_url: &str, pool_max: u32) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_max.max(1))
            .connect_with(options)
            .await?;

        Self::with_pool(pool).await
    }

    /// Wraps an existing pool, creating the schema if needed.
    pub async fn with_pool(pool: SqlitePool) -> anyhow::Result<Self> {
        let ddl = include_str!("../../migrations/0001_create_schema.sql");
        for statement in ddl.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            sqlx::query(statement).execute(&pool).await?;
        }
        tracing::debug!("sqlite schema ready");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Logs the driver error and reduces it to the repository error kind.
fn db_err(e: sqlx::Error) -> RepoError {
    tracing::error!(error = %e, "database call failed");
    RepoError::DbError(e.to_string())
}
