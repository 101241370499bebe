// Upstream reports API client + in-memory window cache.
// On fetch failure callers keep serving the previously cached window.

use std::time::Duration;

use serde::Serialize;
use tokio::sync::RwLock;

use crate::config::UpstreamConfig;
use crate::models::TaskReportActivity;

#[derive(Debug, thiserror::Error)]
pub enum ReportSourceError {
    #[error("reports API request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("reports API returned {status}: {body}")]
    Api { status: u16, body: String },
}

pub struct ReportRepo {
    client: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
    recent_limit: u32,
}

impl ReportRepo {
    pub fn new(config: &UpstreamConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
            recent_limit: config.recent_limit,
        })
    }

    /// GET /projects/_/tasks/reports/recent — newest-first, bounded window.
    pub async fn fetch_recent_reports(
        &self,
    ) -> Result<Vec<TaskReportActivity>, ReportSourceError> {
        let url = format!("{}/projects/_/tasks/reports/recent", self.base_url);

        let mut request = self
            .client
            .get(&url)
            .query(&[("limit", self.recent_limit)]);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let body = response.text().await.unwrap_or_default();
            return Err(ReportSourceError::Api { status, body });
        }

        Ok(response.json().await?)
    }
}

/// The most recent report window plus when it was fetched (epoch millis).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportWindow {
    pub reports: Vec<TaskReportActivity>,
    pub fetched_at: Option<u64>,
}

/// Shared cache between the poll worker (writer) and HTTP handlers (readers).
#[derive(Default)]
pub struct ReportCache {
    window: RwLock<ReportWindow>,
}

impl ReportCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn replace(&self, reports: Vec<TaskReportActivity>) {
        let fetched_at = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .ok();
        let mut window = self.window.write().await;
        *window = ReportWindow {
            reports,
            fetched_at,
        };
    }

    pub async fn window(&self) -> ReportWindow {
        self.window.read().await.clone()
    }
}
