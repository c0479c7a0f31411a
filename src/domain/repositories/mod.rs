//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for service tests.
//!
//! # Available Repositories
//!
//! - [`UrlRepository`] - URL record storage, lookup and access counting
//! - [`ClickRepository`] - Append-only click event log

pub mod click_repository;
pub mod url_repository;

pub use click_repository::ClickRepository;
pub use url_repository::UrlRepository;

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use url_repository::MockUrlRepository;
