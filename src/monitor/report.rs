//! Human-readable performance report.

use crate::monitor::OperationSummary;

/// Report text when no samples are retained.
pub const NO_METRICS_MESSAGE: &str = "No performance metrics available";

/// Number of entries in the report's slowest-operations section.
pub(crate) const REPORT_SLOWEST: usize = 5;

/// Renders totals, per-operation figures and the slowest operations.
pub fn render_report(
    total_samples: usize,
    summaries: &[OperationSummary],
    slowest: &[(String, u64)],
) -> String {
    if total_samples == 0 {
        return NO_METRICS_MESSAGE.to_string();
    }

    let mut lines = vec![
        "=== PERFORMANCE REPORT ===".to_string(),
        format!("Total samples: {}", total_samples),
        String::new(),
        "By operation:".to_string(),
    ];

    for summary in summaries {
        lines.push(format!("  {}:", summary.operation));
        lines.push(format!("    Calls: {}", summary.calls));
        lines.push(format!("    Average: {}ms", summary.average_ms()));
        lines.push(format!("    Min: {}ms", summary.min_ms));
        lines.push(format!("    Max: {}ms", summary.max_ms));
    }

    lines.push(String::new());
    lines.push("Slowest operations (average):".to_string());
    for (rank, (operation, average)) in slowest.iter().enumerate() {
        lines.push(format!("  {}. {}: {}ms", rank + 1, operation, average));
    }

    let mut report = lines.join("\n");
    report.push('\n');
    report
}
