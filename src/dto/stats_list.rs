use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::UrlRecord;

/// Summary row for listings.
#[derive(Debug, Serialize)]
pub struct ListItem {
    pub short_code: String,
    pub original_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

impl From<UrlRecord> for ListItem {
    fn from(record: UrlRecord) -> Self {
        Self {
            short_code: record.short_code,
            original_url: record.original_url,
            clicks: record.clicks,
            created_at: record.created_at,
            is_active: record.is_active,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub total: i64,
    /// Sum of click counters over every record, not only the listed ones.
    pub total_clicks: i64,
    pub items: Vec<ListItem>,
}
