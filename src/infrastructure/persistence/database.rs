//! SQLite connection pool lifecycle.
//!
//! The pool is opened once at process start, migrated, shared by every
//! repository, and closed at shutdown.

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::error::AppError;

/// Owned handle to the durable store.
#[derive(Clone)]
pub struct Database {
    pool: Arc<SqlitePool>,
}

impl Database {
    /// Opens the pool described by `config` and applies pending migrations.
    ///
    /// File databases run in WAL mode with a busy timeout so concurrent
    /// writers queue instead of failing. In-memory databases are pinned to a
    /// single connection that is never recycled, since each SQLite connection
    /// would otherwise see its own empty database.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] if the URL is malformed or the
    /// connection fails, and [`AppError::Migration`] if a migration fails.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        let in_memory = config.is_in_memory();

        let mut options = SqliteConnectOptions::from_str(&config.database_url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(config.db_busy_timeout));

        if !in_memory {
            options = options
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal);
        }

        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(config.db_max_connections)
        };

        let pool = pool_options
            .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
            .connect_with(options)
            .await?;
        tracing::info!("Connected to database");

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::debug!("Migrations applied");

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Shared pool handle for repositories.
    pub fn pool(&self) -> Arc<SqlitePool> {
        self.pool.clone()
    }

    /// Checks connectivity with a trivial query.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] if the store is unreachable.
    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }

    /// Closes every pooled connection, waiting for checked-out ones.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database connections closed");
    }
}
