//! Statistics report formatting

use crate::stats::StatsReport;

use super::student::format_marks_table;

/// Format a stats report: aggregates to two decimals, then the toppers
pub fn format_stats_report(report: &StatsReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("Mean marks: {}\n", two_decimals(report.mean)));
    output.push_str(&format!("Median marks: {}\n", two_decimals(report.median)));
    output.push_str(&format!("Std deviation: {}\n", two_decimals(report.std_dev)));
    if report.scored_count < report.row_count {
        output.push_str(&format!(
            "({} of {} students have no numeric marks)\n",
            report.row_count - report.scored_count,
            report.row_count
        ));
    }

    output.push_str("\nTopper(s):\n");
    if report.toppers.is_empty() {
        output.push_str("(none)\n");
    } else {
        output.push_str(&format_marks_table(&report.toppers));
        output.push('\n');
    }

    output
}

fn two_decimals(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "N/A".to_string(),
    }
}
