//! Short URL creation, resolution and listing.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::services::AnalyticsRecorder;
use crate::domain::entities::{ClickContext, NewUrlRecord, UrlRecord};
use crate::domain::repositories::{ClickRepository, UrlRepository};
use crate::error::AppError;
use crate::utils::code_generator::{
    DEFAULT_CODE_LENGTH, MAX_CODE_LENGTH, MIN_CODE_LENGTH, generate_code, random_code,
};
use crate::utils::code_validator::validate_custom_code;
use crate::utils::url_normalizer::normalize_url;

/// Total insert attempts for a generated code: one derived, nine random.
pub const MAX_GENERATION_ATTEMPTS: usize = 10;

/// Upper bound for [`LinkService::list_recent`].
pub const MAX_LIST_LIMIT: i64 = 100;

/// Service for creating and resolving short URLs.
///
/// Uniqueness is left to the store: every candidate code goes straight to
/// [`UrlRepository::insert`], and a [`AppError::Conflict`] answer drives the
/// retry loop. There is never a separate existence check.
pub struct LinkService<U: UrlRepository, C: ClickRepository> {
    url_repository: Arc<U>,
    recorder: AnalyticsRecorder<C>,
    code_length: usize,
}

impl<U: UrlRepository, C: ClickRepository> LinkService<U, C> {
    /// Creates a new link service generating codes of the default length.
    pub fn new(url_repository: Arc<U>, recorder: AnalyticsRecorder<C>) -> Self {
        Self {
            url_repository,
            recorder,
            code_length: DEFAULT_CODE_LENGTH,
        }
    }

    /// Overrides the length of generated codes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidConfig`] if `code_length` is outside
    /// [`MIN_CODE_LENGTH`]`..=`[`MAX_CODE_LENGTH`].
    pub fn with_code_length(mut self, code_length: usize) -> Result<Self, AppError> {
        if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&code_length) {
            return Err(AppError::InvalidConfig(format!(
                "code length must be between {MIN_CODE_LENGTH} and {MAX_CODE_LENGTH}, got {code_length}"
            )));
        }

        self.code_length = code_length;
        Ok(self)
    }

    /// Creates a short URL.
    ///
    /// # Arguments
    ///
    /// - `original_url` - The URL to shorten; `https://` is prefixed when no scheme is given
    /// - `custom_code` - Optional caller-chosen code; blank values count as absent
    /// - `requester_ip` - Optional address of the creator, stored on the record
    ///
    /// # Code Generation
    ///
    /// - A custom code is validated and inserted once
    /// - Otherwise the first candidate is derived from the URL and the current
    ///   time; each collision is retried with a random code, up to
    ///   [`MAX_GENERATION_ATTEMPTS`] inserts in total
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidUrl`] if the URL is empty or malformed.
    /// Returns [`AppError::InvalidCode`] if the custom code breaks the rules.
    /// Returns [`AppError::CodeTaken`] if the custom code is already in use.
    /// Returns [`AppError::GenerationExhausted`] if every generated code collided.
    pub async fn create_short_url(
        &self,
        original_url: String,
        custom_code: Option<String>,
        requester_ip: Option<String>,
    ) -> Result<UrlRecord, AppError> {
        let normalized_url =
            normalize_url(&original_url).map_err(|e| AppError::InvalidUrl(e.to_string()))?;

        let custom_code = custom_code
            .map(|code| code.trim().to_string())
            .filter(|code| !code.is_empty());

        let record = match custom_code {
            Some(code) => {
                self.insert_custom(normalized_url, code, requester_ip)
                    .await?
            }
            None => self.insert_generated(normalized_url, requester_ip).await?,
        };

        info!(
            short_code = %record.short_code,
            custom = record.is_custom(),
            "Short URL created"
        );
        metrics::counter!("links_created_total").increment(1);

        Ok(record)
    }

    /// Resolves a code to its record and counts the access.
    ///
    /// The click counter is incremented first; the click event is appended
    /// afterwards and a failure there does not fail the resolution. The
    /// returned record is the state read before this access was counted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no active record matches `code`.
    /// Returns [`AppError::Database`] on storage errors.
    pub async fn resolve(&self, code: &str, context: ClickContext) -> Result<UrlRecord, AppError> {
        let record = self
            .url_repository
            .find_active(code)
            .await?
            .ok_or_else(|| AppError::NotFound(code.to_string()))?;

        // The record may have been deactivated since the lookup.
        if !self
            .url_repository
            .record_access(&record.short_code)
            .await?
        {
            return Err(AppError::NotFound(code.to_string()));
        }

        self.recorder.record(&record.short_code, context).await;

        debug!(short_code = %record.short_code, "Short URL resolved");
        metrics::counter!("redirects_total").increment(1);

        Ok(record)
    }

    /// Lists records, most recently created first.
    ///
    /// `limit` is clamped to `1..=`[`MAX_LIST_LIMIT`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on storage errors.
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<UrlRecord>, AppError> {
        self.url_repository
            .list_all(limit.clamp(1, MAX_LIST_LIMIT))
            .await
    }

    /// Stops a code from resolving. Its statistics remain available.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches `code`.
    pub async fn deactivate(&self, code: &str) -> Result<(), AppError> {
        self.set_active(code, false).await
    }

    /// Lets a previously deactivated code resolve again.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches `code`.
    pub async fn activate(&self, code: &str) -> Result<(), AppError> {
        self.set_active(code, true).await
    }

    /// Total number of stored records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on storage errors.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.url_repository.count().await
    }

    /// Sum of the click counters of all records, inactive ones included.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on storage errors.
    pub async fn total_clicks(&self) -> Result<i64, AppError> {
        self.url_repository.total_clicks().await
    }

    async fn set_active(&self, code: &str, active: bool) -> Result<(), AppError> {
        if self.url_repository.set_active(code, active).await? {
            info!(code, active, "Short URL status changed");
            Ok(())
        } else {
            Err(AppError::NotFound(code.to_string()))
        }
    }

    async fn insert_custom(
        &self,
        url: String,
        code: String,
        requester_ip: Option<String>,
    ) -> Result<UrlRecord, AppError> {
        validate_custom_code(&code)?;

        match self
            .url_repository
            .insert(NewUrlRecord::custom(url, code.clone(), requester_ip))
            .await
        {
            Err(AppError::Conflict(_)) => Err(AppError::CodeTaken(code)),
            other => other,
        }
    }

    async fn insert_generated(
        &self,
        url: String,
        requester_ip: Option<String>,
    ) -> Result<UrlRecord, AppError> {
        for attempt in 0..MAX_GENERATION_ATTEMPTS {
            let code = if attempt == 0 {
                generate_code(&url, self.code_length)
            } else {
                random_code(self.code_length)
            };

            match self
                .url_repository
                .insert(NewUrlRecord::generated(url.clone(), code, requester_ip.clone()))
                .await
            {
                Ok(record) => return Ok(record),
                Err(AppError::Conflict(code)) => {
                    warn!(attempt, code = %code, "Short code collision, retrying");
                    metrics::counter!("code_collisions_total").increment(1);
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::GenerationExhausted {
            attempts: MAX_GENERATION_ATTEMPTS,
        })
    }
}
