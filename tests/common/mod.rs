#![allow(dead_code)]

use sqlx::SqlitePool;
use std::sync::Arc;
use tempfile::TempDir;
use url_shortener_core::config::Config;
use url_shortener_core::infrastructure::persistence::{
    Database, SqliteClickRepository, SqliteUrlRepository,
};
use url_shortener_core::state::AppState;

pub async fn memory_database() -> Database {
    Database::connect(&Config::with_database_url("sqlite::memory:"))
        .await
        .unwrap()
}

/// File-backed database inside `dir`, for tests that need several connections.
pub async fn file_database(dir: &TempDir) -> Database {
    let path = dir.path().join("urls.db");
    let mut config = Config::with_database_url(format!("sqlite://{}", path.display()));
    config.db_max_connections = 8;

    Database::connect(&config).await.unwrap()
}

pub async fn memory_state() -> AppState {
    let database = memory_database().await;
    AppState::new(database, &Config::default()).unwrap()
}

pub async fn file_state(dir: &TempDir) -> AppState {
    let database = file_database(dir).await;
    AppState::new(database, &Config::default()).unwrap()
}

pub fn url_repository(pool: Arc<SqlitePool>) -> SqliteUrlRepository {
    SqliteUrlRepository::new(pool)
}

pub fn click_repository(pool: Arc<SqlitePool>) -> SqliteClickRepository {
    SqliteClickRepository::new(pool)
}

pub async fn create_test_record(pool: &SqlitePool, code: &str, url: &str) {
    sqlx::query("INSERT INTO urls (original_url, short_code) VALUES (?, ?)")
        .bind(url)
        .bind(code)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn create_inactive_record(pool: &SqlitePool, code: &str, url: &str) {
    sqlx::query("INSERT INTO urls (original_url, short_code, is_active) VALUES (?, ?, 0)")
        .bind(url)
        .bind(code)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn create_test_click(pool: &SqlitePool, code: &str, ip: &str) {
    sqlx::query("INSERT INTO clicks (short_code, user_ip) VALUES (?, ?)")
        .bind(code)
        .bind(ip)
        .execute(pool)
        .await
        .unwrap();
}
