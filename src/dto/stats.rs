//! Per-code statistics view.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::clicks::ClickItem;
use crate::application::services::UrlStats;

/// Statistics for one short code with its most recent clicks.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub short_code: String,
    pub custom_code: Option<String>,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub clicks: i64,
    pub last_accessed: Option<DateTime<Utc>>,
    pub is_active: bool,
    /// Stored click events; can trail `clicks` when event appends failed.
    pub total_events: i64,
    pub recent_clicks: Vec<ClickItem>,
}

impl From<UrlStats> for StatsResponse {
    fn from(stats: UrlStats) -> Self {
        let record = stats.record;
        Self {
            short_code: record.short_code,
            custom_code: record.custom_code,
            original_url: record.original_url,
            created_at: record.created_at,
            clicks: record.clicks,
            last_accessed: record.last_accessed,
            is_active: record.is_active,
            total_events: stats.total_events,
            recent_clicks: stats.recent_events.into_iter().map(ClickItem::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ClickEvent, UrlRecord};

    #[test]
    fn test_stats_response_serializes_events_in_order() {
        let now = Utc::now();
        let stats = UrlStats {
            record: UrlRecord {
                id: 1,
                original_url: "https://example.com".to_string(),
                short_code: "abc123".to_string(),
                custom_code: None,
                created_at: now,
                clicks: 2,
                last_accessed: Some(now),
                user_ip: Some("10.0.0.1".to_string()),
                is_active: true,
            },
            recent_events: vec![
                ClickEvent {
                    id: 2,
                    short_code: "abc123".to_string(),
                    clicked_at: now,
                    user_ip: None,
                    user_agent: None,
                    referrer: Some("https://t.co".to_string()),
                },
                ClickEvent {
                    id: 1,
                    short_code: "abc123".to_string(),
                    clicked_at: now,
                    user_ip: None,
                    user_agent: None,
                    referrer: None,
                },
            ],
            total_events: 2,
        };

        let json = serde_json::to_value(StatsResponse::from(stats)).unwrap();

        assert_eq!(json["short_code"], "abc123");
        assert_eq!(json["clicks"], 2);
        assert_eq!(json["total_events"], 2);
        assert_eq!(json["recent_clicks"][0]["id"], 2);
        assert_eq!(json["recent_clicks"][0]["referrer"], "https://t.co");
        assert!(json.get("user_ip").is_none());
    }
}
