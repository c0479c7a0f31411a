//! Click analytics recording.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, warn};

use crate::domain::entities::{ClickContext, ClickEvent, NewClickEvent};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

/// Number of most recent events reported alongside a record.
pub const RECENT_CLICKS_LIMIT: i64 = 10;

const DEFAULT_RETRIES: usize = 2;

/// Appends click events and reads them back.
///
/// Recording is awaited by the resolving caller but never fails it: a
/// transient storage error is retried with exponential backoff, and a final
/// failure is logged and counted, then dropped.
pub struct AnalyticsRecorder<C: ClickRepository> {
    repository: Arc<C>,
    retries: usize,
}

impl<C: ClickRepository> Clone for AnalyticsRecorder<C> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
            retries: self.retries,
        }
    }
}

impl<C: ClickRepository> AnalyticsRecorder<C> {
    /// Creates a recorder over a click repository.
    pub fn new(repository: Arc<C>) -> Self {
        Self {
            repository,
            retries: DEFAULT_RETRIES,
        }
    }

    /// Sets how many times a failed append is retried after the first attempt.
    pub fn with_retries(mut self, retries: usize) -> Self {
        self.retries = retries;
        self
    }

    /// Appends one click event for `short_code`.
    ///
    /// Returns the stored event, or `None` when every attempt failed.
    pub async fn record(&self, short_code: &str, context: ClickContext) -> Option<ClickEvent> {
        let new_event = NewClickEvent::from_context(short_code, context, Utc::now());

        let strategy = ExponentialBackoff::from_millis(2)
            .factor(5)
            .max_delay(Duration::from_millis(100))
            .map(jitter)
            .take(self.retries);

        let result = Retry::spawn(strategy, || self.repository.append(new_event.clone())).await;

        match result {
            Ok(event) => {
                debug!(short_code, event_id = event.id, "Click recorded");
                Some(event)
            }
            Err(e) => {
                warn!(short_code, error = %e, "Failed to record click");
                metrics::counter!("click_record_failures_total").increment(1);
                None
            }
        }
    }

    /// Returns up to `limit` events for `short_code`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on storage errors.
    pub async fn recent(&self, short_code: &str, limit: i64) -> Result<Vec<ClickEvent>, AppError> {
        self.repository.recent(short_code, limit).await
    }

    /// Number of events stored for `short_code`.
    ///
    /// Never exceeds the record's click counter; lower when appends failed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on storage errors.
    pub async fn event_count(&self, short_code: &str) -> Result<i64, AppError> {
        self.repository.count_for_code(short_code).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockClickRepository;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn stored(new_event: NewClickEvent, id: i64) -> ClickEvent {
        ClickEvent {
            id,
            short_code: new_event.short_code,
            clicked_at: new_event.clicked_at,
            user_ip: new_event.user_ip,
            user_agent: new_event.user_agent,
            referrer: new_event.referrer,
        }
    }

    #[tokio::test]
    async fn test_record_success() {
        let mut mock_repo = MockClickRepository::new();
        mock_repo
            .expect_append()
            .withf(|e| e.short_code == "abc123" && e.user_agent.as_deref() == Some("curl/8"))
            .times(1)
            .returning(|e| Ok(stored(e, 1)));

        let recorder = AnalyticsRecorder::new(Arc::new(mock_repo));
        let ctx = ClickContext::new(Some("10.0.0.1".to_string()), Some("curl/8"), None);

        let event = recorder.record("abc123", ctx).await;

        assert!(event.is_some());
        assert_eq!(event.unwrap().user_ip.as_deref(), Some("10.0.0.1"));
    }

    #[tokio::test]
    async fn test_record_retries_transient_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();

        let mut mock_repo = MockClickRepository::new();
        mock_repo.expect_append().times(2).returning(move |e| {
            if calls_clone.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(AppError::Database(sqlx::Error::PoolTimedOut))
            } else {
                Ok(stored(e, 7))
            }
        });

        let recorder = AnalyticsRecorder::new(Arc::new(mock_repo));
        let event = recorder.record("abc123", ClickContext::default()).await;

        assert_eq!(event.map(|e| e.id), Some(7));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_record_swallows_persistent_failure() {
        let mut mock_repo = MockClickRepository::new();
        mock_repo
            .expect_append()
            .times(3)
            .returning(|_| Err(AppError::Database(sqlx::Error::PoolClosed)));

        let recorder = AnalyticsRecorder::new(Arc::new(mock_repo));
        let event = recorder.record("abc123", ClickContext::default()).await;

        assert!(event.is_none());
    }

    #[tokio::test]
    async fn test_record_without_retries() {
        let mut mock_repo = MockClickRepository::new();
        mock_repo
            .expect_append()
            .times(1)
            .returning(|_| Err(AppError::Database(sqlx::Error::PoolClosed)));

        let recorder = AnalyticsRecorder::new(Arc::new(mock_repo)).with_retries(0);

        assert!(recorder.record("abc123", ClickContext::default()).await.is_none());
    }

    #[tokio::test]
    async fn test_recent_delegates_to_repository() {
        let mut mock_repo = MockClickRepository::new();
        mock_repo
            .expect_recent()
            .withf(|code, limit| code == "abc123" && *limit == RECENT_CLICKS_LIMIT)
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let recorder = AnalyticsRecorder::new(Arc::new(mock_repo));
        let events = recorder.recent("abc123", RECENT_CLICKS_LIMIT).await.unwrap();

        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_event_count_delegates_to_repository() {
        let mut mock_repo = MockClickRepository::new();
        mock_repo
            .expect_count_for_code()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(|_| Ok(3));

        let recorder = AnalyticsRecorder::new(Arc::new(mock_repo));

        assert_eq!(recorder.event_count("abc123").await.unwrap(), 3);
    }
}
