// Report analytics: performance snapshot aggregation + latency anomaly detection.
// Pure functions over an already-fetched report window; no I/O in here.

pub mod anomaly;
pub mod snapshot;

pub use anomaly::{AnomalyConfig, detect_anomalies};
pub use snapshot::{
    MetricUnit, SAMPLE_SIZE, SampleWindow, SnapshotOptions, build_performance_snapshot,
    collect_samples, compute_snapshot_metric,
};
