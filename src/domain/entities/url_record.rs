//! URL record entity representing a stored short-code mapping.

use chrono::{DateTime, Utc};

/// A persisted mapping from a short code to its original URL.
///
/// `short_code` is unique across the store and never changes. Records are
/// never deleted; deactivation only clears `is_active`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    /// Echo of the caller-supplied code, `None` when the code was generated.
    pub custom_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub clicks: i64,
    pub last_accessed: Option<DateTime<Utc>>,
    pub user_ip: Option<String>,
    pub is_active: bool,
}

impl UrlRecord {
    /// Returns true if the short code was chosen by the caller.
    pub fn is_custom(&self) -> bool {
        self.custom_code.is_some()
    }
}

/// Input data for inserting a new URL record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlRecord {
    pub original_url: String,
    pub short_code: String,
    pub custom_code: Option<String>,
    pub user_ip: Option<String>,
}

impl NewUrlRecord {
    /// Record for a generated code.
    pub fn generated(original_url: String, short_code: String, user_ip: Option<String>) -> Self {
        Self {
            original_url,
            short_code,
            custom_code: None,
            user_ip,
        }
    }

    /// Record for a caller-supplied code; the code doubles as the short code.
    pub fn custom(original_url: String, code: String, user_ip: Option<String>) -> Self {
        Self {
            original_url,
            short_code: code.clone(),
            custom_code: Some(code),
            user_ip,
        }
    }
}
