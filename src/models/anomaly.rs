// Per-report anomaly verdict, carried through to the dashboard as-is.

use serde::{Deserialize, Serialize};

/// A run whose p95 latency deviates materially from its task's baseline.
/// Baseline stats and the z-score are kept for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatencyAnomaly {
    pub report_id: String,
    pub task_id: String,
    pub task_label: String,
    pub project_name: String,
    pub organization_name: String,
    pub started_at: String,
    pub metric: String,
    pub value: f64,
    pub baseline_mean: f64,
    pub baseline_std_dev: f64,
    pub z_score: f64,
    pub success_rate: Option<f64>,
}
