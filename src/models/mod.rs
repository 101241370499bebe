// Domain models (wire shapes of the upstream reports API)

mod anomaly;
mod report;
mod snapshot;

pub use anomaly::LatencyAnomaly;
pub use report::{
    OrganizationRef, ProjectRef, ReportSummary, SummaryMetrics, SummaryResults, SummaryScenario,
    TaskReportActivity, TaskRef,
};
pub use snapshot::{DeltaIntent, PerformanceSnapshot, SnapshotDelta, SnapshotMetric};
