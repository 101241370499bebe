// Presentation-ready snapshot metrics. Recomputed per request; never stored.

use serde::{Deserialize, Serialize};

/// Direction of a metric's change. `Up` always means improving, regardless of
/// whether the underlying number rose or fell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeltaIntent {
    Up,
    Down,
    Steady,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotDelta {
    pub value: String,
    pub intent: DeltaIntent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMetric {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<SnapshotDelta>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSnapshot {
    pub latency: SnapshotMetric,
    pub success_rate: SnapshotMetric,
}
