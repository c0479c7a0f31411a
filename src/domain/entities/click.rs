//! Click event entity representing a single successful resolution.

use chrono::{DateTime, Utc};

/// A recorded resolution of a short code.
///
/// `short_code` refers to [`super::UrlRecord::short_code`]; the event does not
/// own the record. Events are append-only and never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub id: i64,
    pub short_code: String,
    pub clicked_at: DateTime<Utc>,
    pub user_ip: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

/// Requester metadata captured when a short code is resolved.
///
/// All fields are optional to handle missing headers gracefully.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickContext {
    pub user_ip: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

impl ClickContext {
    /// Creates a new click context.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let ctx = ClickContext::new(
    ///     Some("192.168.1.1".to_string()),
    ///     Some("Mozilla/5.0"),
    ///     Some("https://google.com"),
    /// );
    /// ```
    pub fn new(user_ip: Option<String>, user_agent: Option<&str>, referrer: Option<&str>) -> Self {
        Self {
            user_ip,
            user_agent: user_agent.map(|s| s.to_string()),
            referrer: referrer.map(|s| s.to_string()),
        }
    }
}

/// Input data for appending a click event.
///
/// The timestamp is supplied by the caller at append time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClickEvent {
    pub short_code: String,
    pub clicked_at: DateTime<Utc>,
    pub user_ip: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

impl NewClickEvent {
    /// Builds an event for `short_code` from the requester context.
    pub fn from_context(short_code: &str, context: ClickContext, clicked_at: DateTime<Utc>) -> Self {
        Self {
            short_code: short_code.to_string(),
            clicked_at,
            user_ip: context.user_ip,
            user_agent: context.user_agent,
            referrer: context.referrer,
        }
    }
}
