use serde::Deserialize;

use crate::analytics::anomaly::{DEFAULT_MIN_BASELINE_SAMPLES, DEFAULT_Z_THRESHOLD};

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub analytics: AnalyticsConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the reports API, without trailing slash.
    pub base_url: String,
    /// Bearer token for the reports API. Unset means unauthenticated requests.
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Reports fetched per refresh (the "last N" window).
    #[serde(default = "default_recent_limit")]
    pub recent_limit: u32,
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_recent_limit() -> u32 {
    25
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsConfig {
    /// |z-score| above which a run counts as anomalous.
    #[serde(default = "default_z_threshold")]
    pub anomaly_z_threshold: f64,
    /// Prior p95 samples a task needs before its baseline is trusted.
    #[serde(default = "default_min_baseline_samples")]
    pub min_baseline_samples: usize,
}

fn default_z_threshold() -> f64 {
    DEFAULT_Z_THRESHOLD
}

fn default_min_baseline_samples() -> usize {
    DEFAULT_MIN_BASELINE_SAMPLES
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    /// How often the worker refreshes the report window from upstream.
    pub poll_interval_secs: u64,
    /// How often to log app stats (windows fetched, fetch failures) at INFO level.
    pub stats_log_interval_secs: u64,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.upstream.base_url.is_empty(),
            "upstream.base_url must be non-empty"
        );
        anyhow::ensure!(
            self.upstream.request_timeout_secs > 0,
            "upstream.request_timeout_secs must be > 0, got {}",
            self.upstream.request_timeout_secs
        );
        anyhow::ensure!(
            self.upstream.recent_limit > 0,
            "upstream.recent_limit must be > 0, got {}",
            self.upstream.recent_limit
        );
        anyhow::ensure!(
            self.analytics.anomaly_z_threshold > 0.0,
            "analytics.anomaly_z_threshold must be > 0, got {}",
            self.analytics.anomaly_z_threshold
        );
        anyhow::ensure!(
            self.analytics.min_baseline_samples > 0,
            "analytics.min_baseline_samples must be > 0, got {}",
            self.analytics.min_baseline_samples
        );
        anyhow::ensure!(
            self.monitoring.poll_interval_secs > 0,
            "monitoring.poll_interval_secs must be > 0, got {}",
            self.monitoring.poll_interval_secs
        );
        anyhow::ensure!(
            self.monitoring.stats_log_interval_secs > 0,
            "monitoring.stats_log_interval_secs must be > 0, got {}",
            self.monitoring.stats_log_interval_secs
        );
        Ok(())
    }
}
