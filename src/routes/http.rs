// GET handlers: version, report window pass-through, computed analytics.
// Snapshot and anomalies are recomputed per request over the cached window.

use axum::{extract::State, response::IntoResponse};
use serde::Serialize;

use super::AppState;
use crate::analytics::{AnomalyConfig, build_performance_snapshot, detect_anomalies};
use crate::models::{LatencyAnomaly, PerformanceSnapshot};
use crate::version::{NAME, VERSION};

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET /api/reports/recent — the cached report window as fetched from upstream.
pub(super) async fn recent_reports_handler(State(state): State<AppState>) -> impl IntoResponse {
    axum::Json(state.cache.window().await)
}

/// GET /api/snapshot — latency + success-rate metrics over the cached window.
pub(super) async fn snapshot_handler(State(state): State<AppState>) -> impl IntoResponse {
    let window = state.cache.window().await;
    axum::Json(build_performance_snapshot(&window.reports))
}

/// GET /api/anomalies — latency anomalies over the cached window, most severe first.
pub(super) async fn anomalies_handler(State(state): State<AppState>) -> impl IntoResponse {
    let window = state.cache.window().await;
    axum::Json(detect_anomalies(&window.reports, &anomaly_config(&state)))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OverviewPayload {
    snapshot: PerformanceSnapshot,
    anomalies: Vec<LatencyAnomaly>,
    reports_in_window: usize,
    fetched_at: Option<u64>,
}

/// GET /api/overview — everything the dashboard overview needs in one payload.
pub(super) async fn overview_handler(State(state): State<AppState>) -> impl IntoResponse {
    let window = state.cache.window().await;
    let snapshot = build_performance_snapshot(&window.reports);
    let anomalies = detect_anomalies(&window.reports, &anomaly_config(&state));
    axum::Json(OverviewPayload {
        snapshot,
        anomalies,
        reports_in_window: window.reports.len(),
        fetched_at: window.fetched_at,
    })
}

fn anomaly_config(state: &AppState) -> AnomalyConfig {
    AnomalyConfig {
        z_threshold: state.config.analytics.anomaly_z_threshold,
        min_baseline_samples: state.config.analytics.min_baseline_samples,
    }
}
