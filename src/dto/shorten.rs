use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::UrlRecord;

/// Result of a successful shorten call.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_code: String,
    pub original_url: String,
    pub custom: bool,
    pub created_at: DateTime<Utc>,
}

impl From<UrlRecord> for ShortenResponse {
    fn from(record: UrlRecord) -> Self {
        Self {
            custom: record.is_custom(),
            short_code: record.short_code,
            original_url: record.original_url,
            created_at: record.created_at,
        }
    }
}
