//! Marks report: aggregates plus the ranked toppers

use crate::models::StudentMarks;

use super::descriptive::DescriptiveStats;

/// Number of toppers listed in a report
pub const TOPPER_COUNT: usize = 3;

/// Statistics over the marks column
///
/// Rows whose marks are not numeric are left out of every aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsReport {
    /// Rows the report was built from
    pub row_count: usize,
    /// Rows with numeric marks
    pub scored_count: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    /// Sample standard deviation; `None` with fewer than two scores
    pub std_dev: Option<f64>,
    /// Highest marks first
    pub toppers: Vec<StudentMarks>,
}

impl StatsReport {
    /// Build a report from rows in fetch order
    ///
    /// Returns `None` when there are no rows at all.
    pub fn from_rows(rows: &[StudentMarks]) -> Option<Self> {
        if rows.is_empty() {
            return None;
        }

        let scores = rows.iter().filter_map(|row| row.marks.value());
        let stats = DescriptiveStats::new(scores);

        Some(Self {
            row_count: rows.len(),
            scored_count: stats.as_ref().map_or(0, |s| s.count),
            mean: stats.as_ref().map(|s| s.mean),
            median: stats.as_ref().map(|s| s.median),
            std_dev: stats.as_ref().and_then(|s| s.std_dev),
            toppers: top_n(rows, TOPPER_COUNT),
        })
    }
}

/// The `n` rows with the highest numeric marks
///
/// Equal marks keep their input order.
pub fn top_n(rows: &[StudentMarks], n: usize) -> Vec<StudentMarks> {
    let mut scored: Vec<(f64, &StudentMarks)> = rows
        .iter()
        .filter_map(|row| row.marks.value().map(|v| (v, row)))
        .collect();
    // sort_by is stable
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().take(n).map(|(_, row)| row.clone()).collect()
}
