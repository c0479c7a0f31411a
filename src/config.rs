//! Configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the store is
//! opened.
//!
//! ## Variables
//!
//! - `DATABASE_URL` - SQLite connection string (default: `sqlite://urls.db`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `CODE_LENGTH` - Length of generated short codes (default: 6, range: 4-32)
//! - `DB_MAX_CONNECTIONS` - Pool size for file databases (default: 5)
//! - `DB_CONNECT_TIMEOUT` - Seconds to wait for a pooled connection (default: 30)
//! - `DB_BUSY_TIMEOUT` - Seconds a writer waits on a locked database (default: 5)

use anyhow::{Context, Result};
use std::env;

use crate::utils::code_generator::{DEFAULT_CODE_LENGTH, MAX_CODE_LENGTH, MIN_CODE_LENGTH};

const DEFAULT_DATABASE_URL: &str = "sqlite://urls.db";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub log_level: String,
    pub log_format: String,
    /// Length of generated short codes. Custom codes follow their own rules.
    pub code_length: usize,

    // ── SqlitePool settings ─────────────────────────────────────────────────
    /// Maximum number of pooled connections. In-memory databases always use one.
    pub db_max_connections: u32,
    /// Timeout for acquiring a connection from the pool in seconds.
    pub db_connect_timeout: u64,
    /// How long a writer waits for a lock held by another connection, in seconds.
    pub db_busy_timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            code_length: DEFAULT_CODE_LENGTH,
            db_max_connections: 5,
            db_connect_timeout: 30,
            db_busy_timeout: 5,
        }
    }
}

impl Config {
    /// Default configuration pointing at `database_url`.
    pub fn with_database_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Self::default()
        }
    }

    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let database_url = env::var("DATABASE_URL").unwrap_or(defaults.database_url);
        let log_level = env::var("RUST_LOG").unwrap_or(defaults.log_level);
        let log_format = env::var("LOG_FORMAT").unwrap_or(defaults.log_format);

        let code_length = parse_var("CODE_LENGTH")?.unwrap_or(defaults.code_length);
        let db_max_connections =
            parse_var("DB_MAX_CONNECTIONS")?.unwrap_or(defaults.db_max_connections);
        let db_connect_timeout =
            parse_var("DB_CONNECT_TIMEOUT")?.unwrap_or(defaults.db_connect_timeout);
        let db_busy_timeout = parse_var("DB_BUSY_TIMEOUT")?.unwrap_or(defaults.db_busy_timeout);

        Ok(Self {
            database_url,
            log_level,
            log_format,
            code_length,
            db_max_connections,
            db_connect_timeout,
            db_busy_timeout,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `database_url` is not an SQLite URL
    /// - `log_format` is not `text` or `json`
    /// - `code_length` is outside 4-32
    /// - pool settings are zero
    pub fn validate(&self) -> Result<()> {
        if !self.database_url.starts_with("sqlite:") {
            anyhow::bail!(
                "DATABASE_URL must start with 'sqlite:', got '{}'",
                self.database_url
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&self.code_length) {
            anyhow::bail!(
                "CODE_LENGTH must be between {} and {}, got {}",
                MIN_CODE_LENGTH,
                MAX_CODE_LENGTH,
                self.code_length
            );
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        if self.db_connect_timeout == 0 {
            anyhow::bail!("DB_CONNECT_TIMEOUT must be greater than 0");
        }

        Ok(())
    }

    /// Returns true when the database lives only in memory.
    pub fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Database: {}", self.database_url);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Code length: {}", self.code_length);
        tracing::info!("  Max connections: {}", self.db_max_connections);
    }
}

fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{name} must be a number, got '{raw}'")),
        Err(_) => Ok(None),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in the binary).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
