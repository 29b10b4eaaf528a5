//! CSV backup writer
//!
//! Writes the full student table to a flat CSV file whose header matches the
//! store's column names.

use std::fs::File;
use std::path::Path;

use crate::error::{GradebookError, GradebookResult};
use crate::models::Student;

/// Write all students to `path` as CSV
///
/// Returns the number of rows written. An empty set is refused before the
/// file is created, so an existing backup is never replaced by an empty one.
pub fn write_backup(path: &Path, students: &[Student]) -> GradebookResult<usize> {
    if students.is_empty() {
        return Err(GradebookError::EmptyResult("Nothing to backup.".into()));
    }

    let file = File::create(path).map_err(|e| {
        GradebookError::File(format!("Failed to create {}: {}", path.display(), e))
    })?;

    let mut writer = csv::Writer::from_writer(file);
    for student in students {
        writer.serialize(student)?;
    }
    writer.flush()?;

    Ok(students.len())
}
