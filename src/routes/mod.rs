// HTTP routes

mod http;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::report_repo::ReportCache;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) cache: Arc<ReportCache>,
    pub(crate) config: AppConfig,
}

pub fn app(cache: Arc<ReportCache>, config: AppConfig) -> Router {
    let state = AppState { cache, config };
    Router::new()
        .route("/", get(|| async { "loadpulse: load-test analytics" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/reports/recent", get(http::recent_reports_handler)) // GET /api/reports/recent
        .route("/api/snapshot", get(http::snapshot_handler)) // GET /api/snapshot
        .route("/api/anomalies", get(http::anomalies_handler)) // GET /api/anomalies
        .route("/api/overview", get(http::overview_handler)) // GET /api/overview
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
