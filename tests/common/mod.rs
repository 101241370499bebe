// Shared test helpers

#![allow(dead_code)]

use loadpulse::models::*;

pub fn minimal_report(id: &str, task_id: &str) -> TaskReportActivity {
    TaskReportActivity {
        id: id.to_string(),
        status: "completed".to_string(),
        started_at: "2026-07-01T12:00:00.000Z".to_string(),
        completed_at: Some("2026-07-01T12:05:00.000Z".to_string()),
        summary_json: None,
        task: TaskRef {
            id: task_id.to_string(),
            label: format!("task {task_id}"),
            method: Some("GET".to_string()),
            project: ProjectRef {
                id: "proj-1".to_string(),
                name: "Checkout".to_string(),
                organization: OrganizationRef {
                    id: "org-1".to_string(),
                    name: "Acme".to_string(),
                    slug: "acme".to_string(),
                },
            },
        },
    }
}

/// Report with a summaryJson.metrics section.
pub fn metrics_report(
    id: &str,
    task_id: &str,
    p95_ms: Option<f64>,
    average_ms: Option<f64>,
    success_rate: Option<f64>,
) -> TaskReportActivity {
    let mut report = minimal_report(id, task_id);
    report.summary_json = Some(ReportSummary {
        metrics: Some(SummaryMetrics {
            p95_ms,
            average_ms,
            success_rate,
            ..Default::default()
        }),
        ..Default::default()
    });
    report
}

/// Report with a summaryJson.results section (no metrics).
pub fn results_report(
    id: &str,
    task_id: &str,
    total_requests: Option<f64>,
    success_count: Option<f64>,
    failure_count: Option<f64>,
) -> TaskReportActivity {
    let mut report = minimal_report(id, task_id);
    report.summary_json = Some(ReportSummary {
        results: Some(SummaryResults {
            total_requests,
            success_count,
            failure_count,
        }),
        ..Default::default()
    });
    report
}
