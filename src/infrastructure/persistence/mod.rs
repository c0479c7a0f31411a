//! SQLite repository implementations.
//!
//! Concrete implementations of the domain repository traits using SQLx with
//! bound parameters.
//!
//! # Contents
//!
//! - [`Database`] - Pool lifecycle and migrations
//! - [`SqliteUrlRepository`] - URL record storage and lookup
//! - [`SqliteClickRepository`] - Click event log

pub mod database;
pub mod sqlite_click_repository;
pub mod sqlite_url_repository;

pub use database::Database;
pub use sqlite_click_repository::SqliteClickRepository;
pub use sqlite_url_repository::SqliteUrlRepository;
