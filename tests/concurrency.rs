mod common;

use std::collections::HashSet;
use std::sync::Arc;

use tempfile::TempDir;
use url_shortener_core::domain::entities::ClickContext;
use url_shortener_core::error::AppError;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_contested_custom_code_has_one_winner() {
    let dir = TempDir::new().unwrap();
    let state = common::file_state(&dir).await;
    let svc = Arc::clone(&state.link_service);

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let svc = Arc::clone(&svc);
            tokio::spawn(async move {
                svc.create_short_url(
                    format!("https://example.com/{i}"),
                    Some("contested".to_string()),
                    None,
                )
                .await
            })
        })
        .collect();

    let mut winners = 0;
    let mut taken = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => winners += 1,
            Err(AppError::CodeTaken(_)) => taken += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(winners, 1);
    assert_eq!(taken, 15);
    assert_eq!(state.link_service.count().await.unwrap(), 1);

    state.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_generated_codes_are_distinct() {
    let dir = TempDir::new().unwrap();
    let state = common::file_state(&dir).await;
    let svc = Arc::clone(&state.link_service);

    // Same URL from every task so derived candidates can only differ by timestamp.
    let handles: Vec<_> = (0..32)
        .map(|_| {
            let svc = Arc::clone(&svc);
            tokio::spawn(async move {
                svc.create_short_url("https://example.com".to_string(), None, None)
                    .await
            })
        })
        .collect();

    let mut codes = HashSet::new();
    for handle in handles {
        let record = handle.await.unwrap().unwrap();
        assert!(codes.insert(record.short_code));
    }

    assert_eq!(codes.len(), 32);
    assert_eq!(state.link_service.count().await.unwrap(), 32);

    state.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_resolves_count_every_click() {
    let dir = TempDir::new().unwrap();
    let state = common::file_state(&dir).await;

    let record = state
        .link_service
        .create_short_url("https://example.com".to_string(), None, None)
        .await
        .unwrap();

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let svc = Arc::clone(&state.link_service);
            let code = record.short_code.clone();
            tokio::spawn(async move { svc.resolve(&code, ClickContext::default()).await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let stats = state.stats_service.summarize(&record.short_code).await.unwrap();
    assert_eq!(stats.record.clicks, 20);
    assert_eq!(stats.recent_events.len(), 10);

    state.shutdown().await;
}
