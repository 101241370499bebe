// Background poll worker: refreshes the report window from upstream on a
// fixed interval. Analytics stay request-time; this task only keeps the
// cache fresh.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::time::{Duration, interval};

use crate::report_repo::{ReportCache, ReportRepo};

/// Repos, cache, and shutdown for the worker.
pub struct WorkerDeps {
    pub report_repo: Arc<ReportRepo>,
    pub cache: Arc<ReportCache>,
    pub shutdown_rx: tokio::sync::oneshot::Receiver<()>,
}

/// Worker timing and logging config.
pub struct WorkerConfig {
    pub poll_interval_secs: u64,
    /// How often to log app stats (real seconds).
    pub stats_log_interval_secs: u64,
}

pub fn spawn(deps: WorkerDeps, config: WorkerConfig) -> tokio::task::JoinHandle<()> {
    let WorkerDeps {
        report_repo,
        cache,
        mut shutdown_rx,
    } = deps;
    let WorkerConfig {
        poll_interval_secs,
        stats_log_interval_secs,
    } = config;

    tokio::spawn(async move {
        let mut tick = interval(Duration::from_secs(poll_interval_secs));
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut stats_log_tick = interval(Duration::from_secs(stats_log_interval_secs));
        stats_log_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let windows_fetched = AtomicU64::new(0);
        let fetch_failures = AtomicU64::new(0);

        let worker_span = tracing::span!(tracing::Level::DEBUG, "worker", poll_interval_secs);
        let _guard = worker_span.enter();

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    match report_repo.fetch_recent_reports().await {
                        Ok(reports) => {
                            let reports_count = reports.len();
                            cache.replace(reports).await;
                            windows_fetched.fetch_add(1, Ordering::Relaxed);
                            tracing::debug!(
                                operation = "fetch_recent_reports",
                                reports_count,
                                "Report window refreshed"
                            );
                        }
                        Err(e) => {
                            fetch_failures.fetch_add(1, Ordering::Relaxed);
                            tracing::warn!(
                                error = %e,
                                operation = "fetch_recent_reports",
                                "Report fetch failed; keeping previous window"
                            );
                        }
                    }
                }
                _ = &mut shutdown_rx => {
                    tracing::debug!("Worker shutting down");
                    break;
                }
                _ = stats_log_tick.tick() => {
                    tracing::info!(
                        windows_fetched = windows_fetched.load(Ordering::Relaxed),
                        fetch_failures = fetch_failures.load(Ordering::Relaxed),
                        "app stats"
                    );
                }
            }
        }
    })
}
