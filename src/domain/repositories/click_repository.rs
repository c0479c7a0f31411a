//! Repository trait for click events.

use crate::domain::entities::{ClickEvent, NewClickEvent};
use crate::error::AppError;
use async_trait::async_trait;

/// Append-only storage for click events.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteClickRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_click.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Appends one click event.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on storage errors, including a
    /// `short_code` that references no record.
    async fn append(&self, new_event: NewClickEvent) -> Result<ClickEvent, AppError>;

    /// Returns up to `limit` events for `short_code`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on storage errors.
    async fn recent(&self, short_code: &str, limit: i64) -> Result<Vec<ClickEvent>, AppError>;

    /// Counts all events recorded for `short_code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on storage errors.
    async fn count_for_code(&self, short_code: &str) -> Result<i64, AppError>;
}
