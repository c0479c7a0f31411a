//! Application layer services implementing business logic.
//!
//! Services consume the repository traits from [`crate::domain::repositories`]
//! and own the rules that sit above storage: normalization, code validation,
//! the creation retry protocol and click accounting.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short URL creation, resolution and listing
//! - [`services::stats_service::StatsService`] - Per-code statistics
//! - [`services::analytics_recorder::AnalyticsRecorder`] - Click event recording

pub mod services;
