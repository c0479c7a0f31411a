//! Error taxonomy for the shortener core.
//!
//! Every fallible operation returns [`AppError`]. Storage faults are carried
//! as opaque [`AppError::Database`] values; the repository layer translates
//! unique-constraint violations into [`AppError::Conflict`] so callers never
//! have to inspect driver errors themselves.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// The submitted URL is empty or cannot be parsed after normalization.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A caller-supplied custom code violates the syntactic rules.
    #[error("Invalid custom code: {0}")]
    InvalidCode(String),

    /// The requested custom code is already registered.
    #[error("Custom code already in use: {0}")]
    CodeTaken(String),

    /// Every generated candidate collided with an existing code.
    #[error("Failed to generate unique code after {attempts} attempts")]
    GenerationExhausted { attempts: usize },

    /// No record matches the code (or it is inactive, for redirects).
    #[error("Short code not found: {0}")]
    NotFound(String),

    /// The store rejected an insert because the short code already exists.
    #[error("Short code already exists: {0}")]
    Conflict(String),

    /// A service was built with settings outside their accepted range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl AppError {
    /// Stable machine-readable identifier for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidUrl(_) => "invalid_url",
            AppError::InvalidCode(_) => "invalid_code",
            AppError::CodeTaken(_) => "code_taken",
            AppError::GenerationExhausted { .. } => "generation_exhausted",
            AppError::NotFound(_) => "not_found",
            AppError::Conflict(_) => "conflict",
            AppError::InvalidConfig(_) => "invalid_config",
            AppError::Database(_) => "internal_error",
            AppError::Migration(_) => "internal_error",
        }
    }

    /// Returns true when repeating the whole call may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::GenerationExhausted { .. })
    }

    /// Returns true for errors caused by caller input rather than the store.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::InvalidUrl(_)
                | AppError::InvalidCode(_)
                | AppError::CodeTaken(_)
                | AppError::NotFound(_)
        )
    }
}

/// Returns true if the error is a unique-constraint violation raised by the store.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}
