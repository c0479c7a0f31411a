//! SQLite implementation of the URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::{AppError, is_unique_violation};

#[derive(sqlx::FromRow)]
struct UrlRow {
    id: i64,
    original_url: String,
    short_code: String,
    custom_code: Option<String>,
    created_at: DateTime<Utc>,
    clicks: i64,
    last_accessed: Option<DateTime<Utc>>,
    user_ip: Option<String>,
    is_active: bool,
}

impl From<UrlRow> for UrlRecord {
    fn from(row: UrlRow) -> Self {
        UrlRecord {
            id: row.id,
            original_url: row.original_url,
            short_code: row.short_code,
            custom_code: row.custom_code,
            created_at: row.created_at,
            clicks: row.clicks,
            last_accessed: row.last_accessed,
            user_ip: row.user_ip,
            is_active: row.is_active,
        }
    }
}

/// SQLite repository for URL records.
///
/// Uniqueness is delegated to the `UNIQUE` constraint on `urls.short_code`;
/// inserts never read before writing.
pub struct SqliteUrlRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for SqliteUrlRepository {
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        let result = sqlx::query_as::<_, UrlRow>(
            r#"
            INSERT INTO urls (original_url, short_code, custom_code, created_at, user_ip)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, original_url, short_code, custom_code, created_at,
                      clicks, last_accessed, user_ip, is_active
            "#,
        )
        .bind(new_record.original_url.as_str())
        .bind(new_record.short_code.as_str())
        .bind(new_record.custom_code.as_deref())
        .bind(Utc::now())
        .bind(new_record.user_ip.as_deref())
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(e) if is_unique_violation(&e) => Err(AppError::Conflict(new_record.short_code)),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_active(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, original_url, short_code, custom_code, created_at,
                   clicks, last_accessed, user_ip, is_active
            FROM urls
            WHERE (short_code = ? OR custom_code = ?) AND is_active = 1
            LIMIT 1
            "#,
        )
        .bind(code)
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlRecord::from))
    }

    async fn find_any(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, original_url, short_code, custom_code, created_at,
                   clicks, last_accessed, user_ip, is_active
            FROM urls
            WHERE short_code = ? OR custom_code = ?
            LIMIT 1
            "#,
        )
        .bind(code)
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlRecord::from))
    }

    async fn record_access(&self, short_code: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE urls
            SET clicks = clicks + 1, last_accessed = ?
            WHERE short_code = ? AND is_active = 1
            "#,
        )
        .bind(Utc::now())
        .bind(short_code)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn list_all(&self, limit: i64) -> Result<Vec<UrlRecord>, AppError> {
        let rows = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, original_url, short_code, custom_code, created_at,
                   clicks, last_accessed, user_ip, is_active
            FROM urls
            ORDER BY id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(UrlRecord::from).collect())
    }

    async fn set_active(&self, code: &str, active: bool) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE urls
            SET is_active = ?
            WHERE short_code = ? OR custom_code = ?
            "#,
        )
        .bind(active)
        .bind(code)
        .bind(code)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn total_clicks(&self) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COALESCE(SUM(clicks), 0) FROM urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(total)
    }
}
