// Worker integration test: spawn poller against a stub upstream, tick,
// shutdown, assert the cache was refreshed

mod common;

use axum::routing::get;
use axum::{Json, Router};
use common::metrics_report;
use loadpulse::config::UpstreamConfig;
use loadpulse::report_repo::{ReportCache, ReportRepo};
use loadpulse::worker::{WorkerConfig, WorkerDeps, spawn};
use std::sync::Arc;

#[tokio::test]
async fn worker_spawn_refreshes_cache_and_shuts_down() {
    let reports = vec![metrics_report("r1", "t1", Some(250.0), None, Some(98.0))];
    let app = Router::new().route(
        "/projects/_/tasks/reports/recent",
        get(move || {
            let reports = reports.clone();
            async move { Json(reports) }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let report_repo = Arc::new(
        ReportRepo::new(&UpstreamConfig {
            base_url,
            api_token: None,
            request_timeout_secs: 5,
            recent_limit: 25,
        })
        .unwrap(),
    );
    let cache = Arc::new(ReportCache::new());
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let worker_handle = spawn(
        WorkerDeps {
            report_repo,
            cache: cache.clone(),
            shutdown_rx,
        },
        WorkerConfig {
            poll_interval_secs: 3600, // first tick fires immediately
            stats_log_interval_secs: 3600,
        },
    );

    // Wait for the first refresh to land.
    let deadline = tokio::time::Instant::now() + tokio::time::Duration::from_secs(3);
    loop {
        if !cache.window().await.reports.is_empty() {
            break;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "worker never refreshed the cache"
        );
        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
    }

    let window = cache.window().await;
    assert_eq!(window.reports[0].id, "r1");
    assert!(window.fetched_at.is_some());

    let _ = shutdown_tx.send(());
    worker_handle.await.unwrap();
}

#[tokio::test]
async fn worker_keeps_previous_window_when_upstream_fails() {
    // Unreachable upstream: fetches fail, the seeded window stays intact.
    let report_repo = Arc::new(
        ReportRepo::new(&UpstreamConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            api_token: None,
            request_timeout_secs: 1,
            recent_limit: 25,
        })
        .unwrap(),
    );
    let cache = Arc::new(ReportCache::new());
    cache
        .replace(vec![metrics_report("seeded", "t1", Some(100.0), None, None)])
        .await;
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let worker_handle = spawn(
        WorkerDeps {
            report_repo,
            cache: cache.clone(),
            shutdown_rx,
        },
        WorkerConfig {
            poll_interval_secs: 3600,
            stats_log_interval_secs: 3600,
        },
    );

    tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;
    let window = cache.window().await;
    assert_eq!(window.reports.len(), 1);
    assert_eq!(window.reports[0].id, "seeded");

    let _ = shutdown_tx.send(());
    worker_handle.await.unwrap();
}
