// Latency anomaly detection: per-task p95 baselines (mean/stddev over prior
// runs) and a z-score verdict for the most recent run.

use std::collections::HashMap;

use crate::models::{LatencyAnomaly, TaskReportActivity};

/// Observed deployment default: runs beyond ±2.25σ of baseline are flagged.
pub const DEFAULT_Z_THRESHOLD: f64 = 2.25;

/// Prior runs required before a baseline is trusted at all.
pub const DEFAULT_MIN_BASELINE_SAMPLES: usize = 3;

#[derive(Debug, Clone, Copy)]
pub struct AnomalyConfig {
    pub z_threshold: f64,
    pub min_baseline_samples: usize,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            z_threshold: DEFAULT_Z_THRESHOLD,
            min_baseline_samples: DEFAULT_MIN_BASELINE_SAMPLES,
        }
    }
}

/// Classifies the most recent run of every task in the window against that
/// task's historical p95 baseline. Reports arrive newest-first; the newest
/// run with a p95 value is the observation, all older p95 values form the
/// baseline. Under-sampled or zero-variance baselines never classify as
/// anomalous. Output is sorted most severe first (|z| descending).
pub fn detect_anomalies(
    reports: &[TaskReportActivity],
    config: &AnomalyConfig,
) -> Vec<LatencyAnomaly> {
    let mut by_task: HashMap<&str, Vec<&TaskReportActivity>> = HashMap::new();
    for report in reports {
        by_task.entry(&report.task.id).or_default().push(report);
    }

    let mut anomalies: Vec<LatencyAnomaly> = Vec::new();
    for runs in by_task.values() {
        if let Some(anomaly) = classify_task(runs, config) {
            anomalies.push(anomaly);
        }
    }

    anomalies.sort_by(|a, b| {
        b.z_score
            .abs()
            .total_cmp(&a.z_score.abs())
            .then_with(|| b.started_at.cmp(&a.started_at))
    });
    anomalies
}

/// One task's runs, newest-first. Returns a verdict only when the newest p95
/// observation deviates beyond the threshold against a usable baseline.
fn classify_task(
    runs: &[&TaskReportActivity],
    config: &AnomalyConfig,
) -> Option<LatencyAnomaly> {
    let mut sampled = runs.iter().filter_map(|&r| Some((r, p95_of(r)?)));
    let (observed_run, observed) = sampled.next()?;
    let baseline: Vec<f64> = sampled.map(|(_, v)| v).collect();

    if baseline.len() < config.min_baseline_samples {
        return None;
    }

    let baseline_mean = mean(&baseline);
    let baseline_std_dev = std_dev(&baseline, baseline_mean);
    if baseline_std_dev <= 0.0 || !baseline_std_dev.is_finite() {
        return None;
    }

    let z_score = (observed - baseline_mean) / baseline_std_dev;
    if !z_score.is_finite() || z_score.abs() <= config.z_threshold {
        return None;
    }

    Some(LatencyAnomaly {
        report_id: observed_run.id.clone(),
        task_id: observed_run.task.id.clone(),
        task_label: observed_run.task.label.clone(),
        project_name: observed_run.task.project.name.clone(),
        organization_name: observed_run.task.project.organization.name.clone(),
        started_at: observed_run.started_at.clone(),
        metric: "p95Ms".to_string(),
        value: observed,
        baseline_mean,
        baseline_std_dev,
        z_score,
        success_rate: success_rate_of(observed_run),
    })
}

fn p95_of(report: &TaskReportActivity) -> Option<f64> {
    report
        .summary_json
        .as_ref()?
        .metrics
        .as_ref()?
        .p95_ms
        .filter(|v| v.is_finite())
}

/// Success rate for display: the explicit metric when present, else derived
/// from raw counts. Same fallback chain the snapshot extractor uses.
fn success_rate_of(report: &TaskReportActivity) -> Option<f64> {
    let summary = report.summary_json.as_ref()?;
    if let Some(rate) = summary
        .metrics
        .as_ref()
        .and_then(|m| m.success_rate)
        .filter(|v| v.is_finite())
    {
        return Some(rate);
    }

    let results = summary.results.as_ref()?;
    let success_count = results.success_count.filter(|v| v.is_finite())?;
    let total = results
        .total_requests
        .filter(|v| v.is_finite())
        .or_else(|| {
            results
                .failure_count
                .filter(|v| v.is_finite())
                .map(|f| success_count + f)
        })?;
    if total > 0.0 {
        let derived = success_count / total * 100.0;
        derived.is_finite().then_some(derived)
    } else {
        None
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / (values.len() as f64)
}

/// Population standard deviation around `mean`.
fn std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() as f64);
    variance.sqrt()
}
