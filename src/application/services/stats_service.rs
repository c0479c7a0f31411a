//! Per-code statistics.

use std::sync::Arc;

use crate::application::services::AnalyticsRecorder;
use crate::application::services::analytics_recorder::RECENT_CLICKS_LIMIT;
use crate::domain::entities::{ClickEvent, UrlRecord};
use crate::domain::repositories::{ClickRepository, UrlRepository};
use crate::error::AppError;

/// A record together with its most recent click events.
#[derive(Debug, Clone)]
pub struct UrlStats {
    pub record: UrlRecord,
    /// Newest first, at most [`RECENT_CLICKS_LIMIT`] entries.
    pub recent_events: Vec<ClickEvent>,
    /// All stored events for the record, not only the recent ones.
    pub total_events: i64,
}

/// Read-only view over stored records and their click history.
pub struct StatsService<U: UrlRepository, C: ClickRepository> {
    url_repository: Arc<U>,
    recorder: AnalyticsRecorder<C>,
}

impl<U: UrlRepository, C: ClickRepository> StatsService<U, C> {
    /// Creates a new statistics service.
    pub fn new(url_repository: Arc<U>, recorder: AnalyticsRecorder<C>) -> Self {
        Self {
            url_repository,
            recorder,
        }
    }

    /// Builds statistics for `code`.
    ///
    /// Deactivated records still report. Events are looked up by the
    /// record's primary code even when `code` is its custom alias.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches `code`.
    /// Returns [`AppError::Database`] on storage errors.
    pub async fn summarize(&self, code: &str) -> Result<UrlStats, AppError> {
        let record = self
            .url_repository
            .find_any(code)
            .await?
            .ok_or_else(|| AppError::NotFound(code.to_string()))?;

        let recent_events = self
            .recorder
            .recent(&record.short_code, RECENT_CLICKS_LIMIT)
            .await?;
        let total_events = self.recorder.event_count(&record.short_code).await?;

        Ok(UrlStats {
            record,
            recent_events,
            total_events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockClickRepository, MockUrlRepository};
    use chrono::Utc;

    fn record(code: &str, is_active: bool) -> UrlRecord {
        UrlRecord {
            id: 7,
            original_url: "https://example.com".to_string(),
            short_code: code.to_string(),
            custom_code: None,
            created_at: Utc::now(),
            clicks: 2,
            last_accessed: Some(Utc::now()),
            user_ip: None,
            is_active,
        }
    }

    fn event(id: i64, code: &str) -> ClickEvent {
        ClickEvent {
            id,
            short_code: code.to_string(),
            clicked_at: Utc::now(),
            user_ip: None,
            user_agent: Some("curl/8.0".to_string()),
            referrer: None,
        }
    }

    fn service(
        url_repo: MockUrlRepository,
        click_repo: MockClickRepository,
    ) -> StatsService<MockUrlRepository, MockClickRepository> {
        StatsService::new(
            Arc::new(url_repo),
            AnalyticsRecorder::new(Arc::new(click_repo)),
        )
    }

    #[tokio::test]
    async fn test_summarize_inactive_record() {
        let mut mock_url_repo = MockUrlRepository::new();
        mock_url_repo
            .expect_find_any()
            .withf(|code| code == "old1")
            .times(1)
            .returning(|code| Ok(Some(record(code, false))));

        let mut mock_click_repo = MockClickRepository::new();
        mock_click_repo
            .expect_recent()
            .withf(|code, limit| code == "old1" && *limit == RECENT_CLICKS_LIMIT)
            .times(1)
            .returning(|code, _| Ok(vec![event(2, code), event(1, code)]));
        mock_click_repo
            .expect_count_for_code()
            .withf(|code| code == "old1")
            .times(1)
            .returning(|_| Ok(2));

        let stats = service(mock_url_repo, mock_click_repo)
            .summarize("old1")
            .await
            .unwrap();

        assert!(!stats.record.is_active);
        assert_eq!(stats.record.clicks, 2);
        assert_eq!(stats.recent_events.len(), 2);
        assert_eq!(stats.recent_events[0].id, 2);
        assert_eq!(stats.total_events, 2);
    }

    #[tokio::test]
    async fn test_summarize_alias_uses_primary_code() {
        let mut mock_url_repo = MockUrlRepository::new();
        mock_url_repo.expect_find_any().returning(|_| {
            let mut found = record("abc123", true);
            found.custom_code = Some("promo".to_string());
            Ok(Some(found))
        });

        let mut mock_click_repo = MockClickRepository::new();
        mock_click_repo
            .expect_recent()
            .withf(|code, _| code == "abc123")
            .times(1)
            .returning(|_, _| Ok(vec![]));
        mock_click_repo
            .expect_count_for_code()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(|_| Ok(0));

        let stats = service(mock_url_repo, mock_click_repo)
            .summarize("promo")
            .await
            .unwrap();

        assert!(stats.recent_events.is_empty());
    }

    #[tokio::test]
    async fn test_summarize_not_found() {
        let mut mock_url_repo = MockUrlRepository::new();
        mock_url_repo.expect_find_any().returning(|_| Ok(None));

        let mut mock_click_repo = MockClickRepository::new();
        mock_click_repo.expect_recent().times(0);
        mock_click_repo.expect_count_for_code().times(0);

        let result = service(mock_url_repo, mock_click_repo)
            .summarize("missing")
            .await;

        assert!(matches!(result, Err(AppError::NotFound(code)) if code == "missing"));
    }
}
