//! Shared service wiring over one store handle.

use std::sync::Arc;

use crate::application::services::{AnalyticsRecorder, LinkService, StatsService};
use crate::config::Config;
use crate::error::AppError;
use crate::infrastructure::persistence::{Database, SqliteClickRepository, SqliteUrlRepository};

pub type SqliteLinkService = LinkService<SqliteUrlRepository, SqliteClickRepository>;
pub type SqliteStatsService = StatsService<SqliteUrlRepository, SqliteClickRepository>;

#[derive(Clone)]
pub struct AppState {
    pub database: Database,
    pub link_service: Arc<SqliteLinkService>,
    pub stats_service: Arc<SqliteStatsService>,
}

impl AppState {
    /// Builds the services over an already opened database.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidConfig`] if `config.code_length` is out of range.
    pub fn new(database: Database, config: &Config) -> Result<Self, AppError> {
        let pool = database.pool();

        let url_repository = Arc::new(SqliteUrlRepository::new(pool.clone()));
        let click_repository = Arc::new(SqliteClickRepository::new(pool));
        let recorder = AnalyticsRecorder::new(click_repository);

        let link_service = Arc::new(
            LinkService::new(url_repository.clone(), recorder.clone())
                .with_code_length(config.code_length)?,
        );
        let stats_service = Arc::new(StatsService::new(url_repository, recorder));

        Ok(Self {
            database,
            link_service,
            stats_service,
        })
    }

    /// Opens and migrates the database described by `config`, then wires the services.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] or [`AppError::Migration`] if the store
    /// cannot be opened, and [`AppError::InvalidConfig`] as for [`AppState::new`].
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let database = Database::connect(config).await?;

        match Self::new(database.clone(), config) {
            Ok(state) => Ok(state),
            Err(e) => {
                database.close().await;
                Err(e)
            }
        }
    }

    /// Closes the store. Services must not be used afterwards.
    pub async fn shutdown(&self) {
        self.database.close().await;
    }
}
