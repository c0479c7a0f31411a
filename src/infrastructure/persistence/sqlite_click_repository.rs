//! SQLite implementation of the click event repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::entities::{ClickEvent, NewClickEvent};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct ClickRow {
    id: i64,
    short_code: String,
    clicked_at: DateTime<Utc>,
    user_ip: Option<String>,
    user_agent: Option<String>,
    referrer: Option<String>,
}

impl From<ClickRow> for ClickEvent {
    fn from(row: ClickRow) -> Self {
        ClickEvent {
            id: row.id,
            short_code: row.short_code,
            clicked_at: row.clicked_at,
            user_ip: row.user_ip,
            user_agent: row.user_agent,
            referrer: row.referrer,
        }
    }
}

/// SQLite repository for the click event log.
///
/// Events are only ever inserted; ordering uses the autoincrement id so that
/// events sharing a timestamp still come back newest first.
pub struct SqliteClickRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteClickRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for SqliteClickRepository {
    async fn append(&self, new_event: NewClickEvent) -> Result<ClickEvent, AppError> {
        let row = sqlx::query_as::<_, ClickRow>(
            r#"
            INSERT INTO clicks (short_code, clicked_at, user_ip, user_agent, referrer)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, short_code, clicked_at, user_ip, user_agent, referrer
            "#,
        )
        .bind(new_event.short_code.as_str())
        .bind(new_event.clicked_at)
        .bind(new_event.user_ip.as_deref())
        .bind(new_event.user_agent.as_deref())
        .bind(new_event.referrer.as_deref())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn recent(&self, short_code: &str, limit: i64) -> Result<Vec<ClickEvent>, AppError> {
        let rows = sqlx::query_as::<_, ClickRow>(
            r#"
            SELECT id, short_code, clicked_at, user_ip, user_agent, referrer
            FROM clicks
            WHERE short_code = ?
            ORDER BY id DESC
            LIMIT ?
            "#,
        )
        .bind(short_code)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(ClickEvent::from).collect())
    }

    async fn count_for_code(&self, short_code: &str) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clicks WHERE short_code = ?")
            .bind(short_code)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
