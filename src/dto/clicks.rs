use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::ClickEvent;

/// One recorded click.
#[derive(Debug, Serialize)]
pub struct ClickItem {
    pub id: i64,
    pub clicked_at: DateTime<Utc>,
    pub user_ip: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

impl From<ClickEvent> for ClickItem {
    fn from(event: ClickEvent) -> Self {
        Self {
            id: event.id,
            clicked_at: event.clicked_at,
            user_ip: event.user_ip,
            user_agent: event.user_agent,
            referrer: event.referrer,
        }
    }
}
