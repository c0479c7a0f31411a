//! # URL Shortener Core
//!
//! Maps long URLs to short alphanumeric codes, resolves codes back to their
//! targets, and keeps per-code click statistics in SQLite.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Records, click events and repository traits
//! - **Application Layer** ([`application`]) - Creation protocol, resolution and statistics
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite pool and repositories
//! - **Utilities** ([`utils`]) - URL normalization and short code rules
//!
//! ## Guarantees
//!
//! - Short codes are unique; the store's `UNIQUE` constraint decides races
//! - Each successful resolution increments the click counter exactly once
//! - Click events never outnumber counted clicks
//!
//! ## Quick Start
//!
//! ```bash
//! export DATABASE_URL="sqlite://urls.db"
//!
//! cargo run --bin admin -- shorten https://example.com
//! cargo run --bin admin -- stats <code>
//! ```
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod application;
pub mod config;
pub mod domain;
pub mod dto;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AnalyticsRecorder, LinkService, StatsService, UrlStats};
    pub use crate::config::Config;
    pub use crate::domain::entities::{ClickContext, ClickEvent, UrlRecord};
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::Database;
    pub use crate::state::AppState;
}
