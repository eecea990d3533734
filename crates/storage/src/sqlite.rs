//! SQLite-backed key/value store (durable local persistence).

use std::str::FromStr;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use tokio::runtime::{Builder, Runtime};

use crate::{KeyValueStore, StorageError, StorageResult};

/// SQLite-backed store: one row per key.
///
/// The public API is synchronous; queries run on a private current-thread
/// runtime. Calls block, so async callers must go through
/// `tokio::task::spawn_blocking`.
#[derive(Debug)]
pub struct SqliteStore {
    // `Option` so `Drop` can hand the runtime off without blocking.
    runtime: Option<Runtime>,
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) the database at `url`, e.g.
    /// `sqlite://stockbook.db`.
    pub fn open(url: &str) -> StorageResult<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| StorageError::unavailable(format!("invalid sqlite url {url:?}: {e}")))?
            .create_if_missing(true);
        Self::connect(options)
    }

    /// Private database living as long as this store.
    pub fn open_in_memory() -> StorageResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| StorageError::unavailable(e.to_string()))?;
        Self::connect(options)
    }

    fn connect(options: SqliteConnectOptions) -> StorageResult<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| StorageError::unavailable(format!("failed to build runtime: {e}")))?;

        // A single connection: one logical writer, and `:memory:` databases
        // are per-connection.
        let pool = runtime
            .block_on(SqlitePoolOptions::new().max_connections(1).connect_with(options))
            .map_err(map_sqlx_error)?;

        runtime
            .block_on(
                sqlx::query(
                    r#"
                    CREATE TABLE IF NOT EXISTS kv_blobs (
                        key        TEXT PRIMARY KEY,
                        value      TEXT NOT NULL,
                        updated_at TEXT NOT NULL
                    )
                    "#,
                )
                .execute(&pool),
            )
            .map_err(map_sqlx_error)?;

        tracing::debug!("sqlite store ready");

        Ok(Self {
            runtime: Some(runtime),
            pool,
        })
    }

    fn block_on<F: std::future::Future>(&self, fut: F) -> StorageResult<F::Output> {
        match &self.runtime {
            Some(rt) => Ok(rt.block_on(fut)),
            None => Err(StorageError::unavailable("sqlite store is closed")),
        }
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let row = self
            .block_on(
                sqlx::query(
                    r#"
                    SELECT value
                    FROM kv_blobs
                    WHERE key = ?1
                    "#,
                )
                .bind(key)
                .fetch_optional(&self.pool),
            )?
            .map_err(map_sqlx_error)?;

        match row {
            Some(row) => {
                let value: String = row.try_get("value").map_err(map_sqlx_error)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        self.block_on(
            sqlx::query(
                r#"
                INSERT INTO kv_blobs (key, value, updated_at)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(key)
                DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at
                "#,
            )
            .bind(key)
            .bind(value)
            .bind(&now)
            .execute(&self.pool),
        )?
        .map_err(map_sqlx_error)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.block_on(
            sqlx::query(
                r#"
                DELETE FROM kv_blobs
                WHERE key = ?1
                "#,
            )
            .bind(key)
            .execute(&self.pool),
        )?
        .map_err(map_sqlx_error)?;
        Ok(())
    }
}

impl Drop for SqliteStore {
    fn drop(&mut self) {
        // Dropping a runtime blocks, which panics inside another runtime.
        if let Some(rt) = self.runtime.take() {
            rt.shutdown_background();
        }
    }
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    match &err {
        // SQLITE_FULL
        sqlx::Error::Database(db) if db.code().as_deref() == Some("13") => {
            StorageError::QuotaExceeded
        }
        _ => StorageError::unavailable(err.to_string()),
    }
}
