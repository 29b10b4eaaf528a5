//! Diff generation for audit logging
//!
//! Summarizes which fields of a student changed.

use crate::models::Student;

/// Describe the changed fields between two states of a student
///
/// Returns `None` when nothing changed.
pub fn generate_diff(before: &Student, after: &Student) -> Option<String> {
    let mut changes = Vec::new();

    if before.name != after.name {
        changes.push(format!(
            "name: {} -> {}",
            quoted(&before.name),
            quoted(&after.name)
        ));
    }
    if before.marks != after.marks {
        changes.push(format!("marks: {} -> {}", before.marks, after.marks));
    }
    if before.grade != after.grade {
        changes.push(format!(
            "grade: {} -> {}",
            quoted(&before.grade),
            quoted(&after.grade)
        ));
    }

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn quoted(s: &str) -> String {
    // Truncate long strings
    if s.chars().count() > 50 {
        let head: String = s.chars().take(47).collect();
        format!("\"{}...\"", head)
    } else {
        format!("\"{}\"", s)
    }
}
