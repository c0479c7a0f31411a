//! Repository trait for URL record data access.

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for URL records.
///
/// Uniqueness of `short_code` is enforced by the store itself. Implementations
/// must never emulate it with a read followed by a write.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteUrlRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_url.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new record in a single atomic statement.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code already exists.
    /// Returns [`AppError::Database`] on other storage errors.
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError>;

    /// Finds an active record whose short code or custom code equals `code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on storage errors.
    async fn find_active(&self, code: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Finds a record by short code or custom code regardless of status.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on storage errors.
    async fn find_any(&self, code: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Atomically increments `clicks` and sets `last_accessed` to now.
    ///
    /// Only active records are touched. Each call counts exactly one access.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if an active record was updated
    /// - `Ok(false)` if no active record has this short code
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on storage errors.
    async fn record_access(&self, short_code: &str) -> Result<bool, AppError>;

    /// Lists records, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on storage errors.
    async fn list_all(&self, limit: i64) -> Result<Vec<UrlRecord>, AppError>;

    /// Sets `is_active` on the record addressed by `code`.
    ///
    /// Returns `Ok(true)` if a record matched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on storage errors.
    async fn set_active(&self, code: &str, active: bool) -> Result<bool, AppError>;

    /// Counts all records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on storage errors.
    async fn count(&self) -> Result<i64, AppError>;

    /// Sums `clicks` over all records; `0` for an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on storage errors.
    async fn total_clicks(&self) -> Result<i64, AppError>;
}
