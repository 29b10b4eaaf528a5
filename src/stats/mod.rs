//! Statistics over the marks column
//!
//! - `descriptive`: mean, median, sample standard deviation
//! - `histogram`: equal-width frequency bins for the distribution chart
//! - `report`: the aggregates plus the ranked toppers

pub mod descriptive;
pub mod histogram;
pub mod report;

pub use descriptive::DescriptiveStats;
pub use histogram::{Histogram, HistogramBin, DEFAULT_BIN_COUNT};
pub use report::{top_n, StatsReport, TOPPER_COUNT};
