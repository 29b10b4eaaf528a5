//! Display formatting for terminal output
//!
//! Provides utilities for formatting students and statistics as text.

pub mod stats;
pub mod student;

pub use stats::format_stats_report;
pub use student::{format_marks_table, format_student_table};
