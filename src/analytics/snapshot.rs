// Performance snapshot: sample extraction over the recent report window,
// then current-vs-trailing-average deltas per metric.

use crate::models::{
    DeltaIntent, PerformanceSnapshot, SnapshotDelta, SnapshotMetric, TaskReportActivity,
};

/// Samples per metric considered by the snapshot (newest-first).
pub const SAMPLE_SIZE: usize = 10;

/// Latency and success-rate samples pulled from a report window, in report
/// order. Each report contributes at most one sample per metric.
#[derive(Debug, Default)]
pub struct SampleWindow {
    pub latencies: Vec<f64>,
    pub success_rates: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricUnit {
    Millis,
    Percent,
}

impl MetricUnit {
    fn label(self) -> &'static str {
        match self {
            MetricUnit::Millis => "ms",
            MetricUnit::Percent => "%",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SnapshotOptions {
    pub unit: MetricUnit,
    pub fraction_digits: usize,
    pub invert_delta: bool,
}

/// Walks reports newest-first and collects up to SAMPLE_SIZE latency and
/// success-rate samples. Latency prefers p95 over average; success rate
/// prefers the explicit metric, falling back to a rate derived from raw
/// success/failure counts. Only the derived path checks the cap before
/// appending; the loop stops once both arrays are full.
pub fn collect_samples(reports: &[TaskReportActivity]) -> SampleWindow {
    let mut latencies: Vec<f64> = Vec::new();
    let mut success_rates: Vec<f64> = Vec::new();

    for report in reports {
        let summary = report.summary_json.as_ref();
        let mut success_recorded = false;

        if let Some(metrics) = summary.and_then(|s| s.metrics.as_ref()) {
            let latency = metrics
                .p95_ms
                .filter(|v| v.is_finite())
                .or(metrics.average_ms.filter(|v| v.is_finite()));
            if let Some(latency) = latency {
                latencies.push(latency);
            }
            if let Some(rate) = metrics.success_rate.filter(|v| v.is_finite()) {
                success_rates.push(rate);
                success_recorded = true;
            }
        }

        if !success_recorded
            && success_rates.len() < SAMPLE_SIZE
            && let Some(results) = summary.and_then(|s| s.results.as_ref())
        {
            let success_count = results.success_count.filter(|v| v.is_finite());
            let failure_count = results.failure_count.filter(|v| v.is_finite());
            let total_requests = results
                .total_requests
                .filter(|v| v.is_finite())
                .or_else(|| match (success_count, failure_count) {
                    (Some(s), Some(f)) => Some(s + f),
                    _ => None,
                });

            if let (Some(total), Some(success)) = (total_requests, success_count)
                && total > 0.0
            {
                let derived = success / total * 100.0;
                if derived.is_finite() {
                    success_rates.push(derived);
                }
            }
        }

        if latencies.len() >= SAMPLE_SIZE && success_rates.len() >= SAMPLE_SIZE {
            break;
        }
    }

    SampleWindow {
        latencies,
        success_rates,
    }
}

/// Turns a newest-first sample sequence into a headline value plus an optional
/// delta against the trailing average. Empty input yields the "no data"
/// sentinel; a single sample has no baseline to compare against.
pub fn compute_snapshot_metric(values: &[f64], options: SnapshotOptions) -> SnapshotMetric {
    let sample = &values[..values.len().min(SAMPLE_SIZE)];
    if sample.is_empty() {
        return SnapshotMetric {
            value: "—".to_string(),
            delta: None,
        };
    }

    let avg = mean(sample);
    let formatted_value = format_metric_value(avg, options.unit, options.fraction_digits, false);

    if sample.len() == 1 {
        return SnapshotMetric {
            value: formatted_value,
            delta: None,
        };
    }

    let trailing_avg = mean(&sample[1..]);
    let delta_raw = sample[0] - trailing_avg;

    let intent = if delta_raw.abs() < f64::EPSILON {
        DeltaIntent::Steady
    } else if options.invert_delta {
        if delta_raw < 0.0 {
            DeltaIntent::Up
        } else {
            DeltaIntent::Down
        }
    } else if delta_raw > 0.0 {
        DeltaIntent::Up
    } else {
        DeltaIntent::Down
    };

    let delta_value = format_metric_value(delta_raw, options.unit, options.fraction_digits, true);

    SnapshotMetric {
        value: formatted_value,
        delta: Some(SnapshotDelta {
            value: delta_value,
            intent,
        }),
    }
}

/// Snapshot over a report window: p95 latency (lower is better) and success
/// rate (higher is better).
pub fn build_performance_snapshot(reports: &[TaskReportActivity]) -> PerformanceSnapshot {
    let window = collect_samples(reports);

    PerformanceSnapshot {
        latency: compute_snapshot_metric(
            &window.latencies,
            SnapshotOptions {
                unit: MetricUnit::Millis,
                fraction_digits: 0,
                invert_delta: true,
            },
        ),
        success_rate: compute_snapshot_metric(
            &window.success_rates,
            SnapshotOptions {
                unit: MetricUnit::Percent,
                fraction_digits: 1,
                invert_delta: false,
            },
        ),
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / (values.len() as f64)
}

/// Formats `value` with the metric unit. With `include_sign`, positive values
/// get "+" and negative values the U+2212 minus (what the dashboard renders);
/// a zero delta has no sign.
fn format_metric_value(
    value: f64,
    unit: MetricUnit,
    fraction_digits: usize,
    include_sign: bool,
) -> String {
    let sign = if include_sign {
        if value > 0.0 {
            "+"
        } else if value < 0.0 {
            "\u{2212}"
        } else {
            ""
        }
    } else {
        ""
    };
    format!(
        "{}{:.*} {}",
        sign,
        fraction_digits,
        value.abs(),
        unit.label()
    )
}
