//! Report aggregation and summary rendering.
//!
//! The aggregator folds an ordered report sequence into one overall verdict
//! and the human-readable summary the orchestrator prints. Success is
//! recursive: one failed sub-report anywhere fails the whole run.
use crate::engine::JobReport;

pub const STATUS_SUCCESS: &str = "Successful";
pub const STATUS_FAILED: &str = "Failed";

/// Aggregated outcome of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub overall_success: bool,
    pub lines: Vec<String>,
}

pub fn aggregate(reports: &[JobReport]) -> RunSummary {
    let overall_success = reports.iter().all(JobReport::is_success_recursive);
    let mut lines = Vec::new();
    for report in reports {
        render_report(report, &mut lines);
    }
    RunSummary {
        overall_success,
        lines,
    }
}

/// Depth-first, parent before children, so nested sub-jobs are all visible.
fn render_report(report: &JobReport, lines: &mut Vec<String>) {
    lines.push(format!("Importer type: {}", report.import_type));
    lines.push(format!("Importable DataSets: {}", report.expected_count));
    lines.push(format!("Imported DataSets: {}", report.imported_count));
    lines.push(format!("Import Time Used: {:.2} ms", report.elapsed_ms));
    lines.push(format!("Import status: {}", status_label(report.is_success)));
    for sub_report in &report.sub_reports {
        render_report(sub_report, lines);
    }
}

pub fn status_label(is_success: bool) -> &'static str {
    if is_success {
        STATUS_SUCCESS
    } else {
        STATUS_FAILED
    }
}
