//! URL normalization applied before a mapping is stored.
//!
//! The stored form is the trimmed input with an explicit `http://` or
//! `https://` scheme. The string is otherwise kept as the caller wrote it so
//! that a resolved URL matches what was submitted.

use url::Url;

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlNormalizationError {
    #[error("URL is required")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("URL has no host")]
    MissingHost,
}

const DEFAULT_SCHEME: &str = "https://";

fn has_http_scheme(input: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        input
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Normalizes a URL for storage.
///
/// # Normalization Rules
///
/// 1. Surrounding whitespace is trimmed
/// 2. Input without an `http://` / `https://` prefix gets `https://`
/// 3. The result must parse as an absolute URL with a host
///
/// # Errors
///
/// Returns [`UrlNormalizationError::Empty`] for blank input.
/// Returns [`UrlNormalizationError::InvalidFormat`] for unparseable URLs.
/// Returns [`UrlNormalizationError::MissingHost`] when no host is present.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_url("example.com").unwrap(), "https://example.com");
/// assert_eq!(normalize_url("http://a.io/x").unwrap(), "http://a.io/x");
/// ```
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlNormalizationError::Empty);
    }

    let normalized = if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("{DEFAULT_SCHEME}{trimmed}")
    };

    let parsed =
        Url::parse(&normalized).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(normalized),
        _ => Err(UrlNormalizationError::MissingHost),
    }
}
