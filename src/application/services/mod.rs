//! Business logic services for the application layer.

pub mod analytics_recorder;
pub mod link_service;
pub mod stats_service;

pub use analytics_recorder::AnalyticsRecorder;
pub use link_service::LinkService;
pub use stats_service::{StatsService, UrlStats};
