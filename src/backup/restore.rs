//! CSV restore
//!
//! Parses a backup file and reconciles each row with the store by roll
//! number: insert first, and if the insert fails fall back to an update.

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::{GradebookError, GradebookResult};
use crate::models::{Marks, Student, StudentUpdate};
use crate::storage::schema::STUDENT_COLUMNS;
use crate::storage::StudentRepository;

#[derive(Debug, Deserialize)]
struct BackupRecord {
    roll_no: String,
    name: String,
    marks: String,
    grade: String,
}

/// One parsed row of a backup file
#[derive(Debug, Clone, PartialEq)]
pub struct RestoreRow {
    /// Line number in the file (the header is line 1)
    pub line: u64,
    pub roll_no: String,
    pub name: String,
    pub marks: String,
    pub grade: String,
}

impl RestoreRow {
    /// Coerce the marks field to a number
    pub fn marks_value(&self) -> GradebookResult<f64> {
        Marks::coerce(&self.marks).value().ok_or_else(|| {
            GradebookError::Validation(format!("Invalid marks '{}'", self.marks))
        })
    }

    /// The student this row describes
    pub fn to_student(&self) -> GradebookResult<Student> {
        Ok(Student::new(
            self.roll_no.clone(),
            self.name.clone(),
            self.marks_value()?,
            self.grade.clone(),
        ))
    }
}

/// Read and parse every row of a backup file
///
/// Nothing is returned unless the whole file parses and carries every
/// student column.
pub fn read_backup(path: &Path) -> GradebookResult<Vec<RestoreRow>> {
    if !path.exists() {
        return Err(GradebookError::File(format!(
            "CSV file not found: {}",
            path.display()
        )));
    }

    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| GradebookError::File(format!("Could not read CSV: {}", e)))?;

    let headers = reader
        .headers()
        .map_err(|e| GradebookError::File(format!("Could not read CSV: {}", e)))?
        .clone();
    for column in STUDENT_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(GradebookError::File(format!(
                "Could not read CSV: missing column '{}'",
                column
            )));
        }
    }

    let mut rows = Vec::new();
    for (i, result) in reader.deserialize::<BackupRecord>().enumerate() {
        let record =
            result.map_err(|e| GradebookError::File(format!("Could not read CSV: {}", e)))?;
        rows.push(RestoreRow {
            line: i as u64 + 2,
            roll_no: record.roll_no,
            name: record.name,
            marks: record.marks,
            grade: record.grade,
        });
    }

    Ok(rows)
}

/// How a row made it into the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreAction {
    Inserted,
    Updated,
}

/// A row that could be neither inserted nor updated
#[derive(Debug, Clone)]
pub struct RestoreFailure {
    pub line: u64,
    pub roll_no: String,
    pub reason: String,
}

impl fmt::Display for RestoreFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error restoring row {} (roll no '{}'): {}",
            self.line, self.roll_no, self.reason
        )
    }
}

/// Outcome of a restore run
#[derive(Debug, Default)]
pub struct RestoreSummary {
    /// Rows that reached the store, in file order
    pub restored: Vec<(RestoreAction, Student)>,
    /// Rows that did not
    pub failures: Vec<RestoreFailure>,
}

impl RestoreSummary {
    /// Number of inserted rows
    pub fn inserted(&self) -> usize {
        self.count(RestoreAction::Inserted)
    }

    /// Number of rows that fell back to an update
    pub fn updated(&self) -> usize {
        self.count(RestoreAction::Updated)
    }

    fn count(&self, action: RestoreAction) -> usize {
        self.restored.iter().filter(|(a, _)| *a == action).count()
    }

    /// Summary line for display
    pub fn summary(&self) -> String {
        format!(
            "{} inserted, {} updated, {} failed",
            self.inserted(),
            self.updated(),
            self.failures.len()
        )
    }
}

/// Upsert every row, one at a time
///
/// Each row is independent: a failure is recorded and the next row is tried.
/// The fallback to update fires on any insert failure, not only on a
/// duplicate roll number. A row counts as updated only if the update
/// changed a stored row.
pub fn apply_rows(repo: &mut StudentRepository<'_>, rows: &[RestoreRow]) -> RestoreSummary {
    let mut summary = RestoreSummary::default();

    for row in rows {
        let student = match row.to_student() {
            Ok(student) => student,
            Err(e) => {
                summary.failures.push(RestoreFailure {
                    line: row.line,
                    roll_no: row.roll_no.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        if repo.insert(&student).is_ok() {
            summary.restored.push((RestoreAction::Inserted, student));
            continue;
        }

        let mut update = StudentUpdate::new()
            .with_name(student.name.clone())
            .with_grade(student.grade.clone());
        update.marks = student.marks.value();
        match repo.update(&student.roll_no, &update) {
            Ok(0) => summary.failures.push(RestoreFailure {
                line: row.line,
                roll_no: row.roll_no.clone(),
                reason: "insert failed and no existing row has this roll no".into(),
            }),
            Ok(_) => summary.restored.push((RestoreAction::Updated, student)),
            Err(e) => summary.failures.push(RestoreFailure {
                line: row.line,
                roll_no: row.roll_no.clone(),
                reason: e.to_string(),
            }),
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Database, DatabaseConfig, ExecOptions};
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("restore.csv");
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn row(line: u64, roll: &str, name: &str, marks: &str, grade: &str) -> RestoreRow {
        RestoreRow {
            line,
            roll_no: roll.into(),
            name: name.into(),
            marks: marks.into(),
            grade: grade.into(),
        }
    }

    #[test]
    fn test_read_backup() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "roll_no,name,marks,grade\nR1,Asha,91.5,A\nR2,Ben,40,D\n");

        let rows = read_backup(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], row(2, "R1", "Asha", "91.5", "A"));
        assert_eq!(rows[1].line, 3);
    }

    #[test]
    fn test_read_backup_column_order_is_free() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "grade,marks,name,roll_no\nA,91.5,Asha,R1\n");

        let rows = read_backup(&path).unwrap();
        assert_eq!(rows[0], row(2, "R1", "Asha", "91.5", "A"));
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_backup(&temp_dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, GradebookError::File(_)));
    }

    #[test]
    fn test_missing_column_rejects_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "roll_no,name,grade\nR1,Asha,A\n");

        let err = read_backup(&path).unwrap_err();
        assert!(err.to_string().contains("missing column 'marks'"));
    }

    #[test]
    fn test_ragged_rows_reject_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "roll_no,name,marks,grade\nR1,Asha,91.5\n");

        assert!(matches!(
            read_backup(&path).unwrap_err(),
            GradebookError::File(_)
        ));
    }

    #[test]
    fn test_apply_rows_inserts_then_updates() {
        let mut db = Database::new(DatabaseConfig::in_memory());
        let mut repo = StudentRepository::new(&mut db);
        repo.insert(&Student::new("R1", "Old Name", 10.0, "F")).unwrap();

        let rows = vec![
            row(2, "R1", "Asha", "91.5", "A"),
            row(3, "R2", "Ben", "40", "D"),
        ];
        let summary = apply_rows(&mut repo, &rows);

        assert_eq!(summary.updated(), 1);
        assert_eq!(summary.inserted(), 1);
        assert!(summary.failures.is_empty());
        assert_eq!(
            repo.get("R1").unwrap(),
            Some(Student::new("R1", "Asha", 91.5, "A"))
        );
        assert_eq!(summary.summary(), "1 inserted, 1 updated, 0 failed");
    }

    fn add_trigger(db: &mut Database, sql: &str) {
        db.execute(sql, &[], ExecOptions::commit()).unwrap();
    }

    #[test]
    fn test_fallback_that_matches_no_row_is_a_failure() {
        let mut db = Database::new(DatabaseConfig::in_memory());
        add_trigger(
            &mut db,
            "CREATE TRIGGER reject_r9 BEFORE INSERT ON students \
             WHEN NEW.roll_no = 'R9' BEGIN SELECT RAISE(ABORT, 'rejected'); END",
        );
        let mut repo = StudentRepository::new(&mut db);

        let summary = apply_rows(&mut repo, &[row(2, "R9", "Ira", "55", "C")]);

        assert_eq!(summary.summary(), "0 inserted, 0 updated, 1 failed");
        assert_eq!(summary.failures[0].line, 2);
        assert!(summary.failures[0].reason.contains("no existing row"));
        assert!(repo.get("R9").unwrap().is_none());
    }

    #[test]
    fn test_insert_and_update_both_failing_moves_on() {
        let mut db = Database::new(DatabaseConfig::in_memory());
        add_trigger(
            &mut db,
            "CREATE TRIGGER lock_students BEFORE UPDATE ON students \
             BEGIN SELECT RAISE(ABORT, 'locked'); END",
        );
        let mut repo = StudentRepository::new(&mut db);
        repo.insert(&Student::new("R1", "Asha", 60.0, "C")).unwrap();

        let rows = vec![
            row(2, "R1", "Asha", "95", "A+"),
            row(3, "R2", "Ben", "40", "D"),
        ];
        let summary = apply_rows(&mut repo, &rows);

        assert_eq!(summary.summary(), "1 inserted, 0 updated, 1 failed");
        let failure = summary.failures[0].to_string();
        assert!(failure.starts_with("Error restoring row 2 (roll no 'R1'):"));
        assert!(failure.contains("locked"));
        assert_eq!(
            repo.get("R1").unwrap(),
            Some(Student::new("R1", "Asha", 60.0, "C"))
        );
        assert!(repo.get("R2").unwrap().is_some());
    }

    #[test]
    fn test_bad_marks_fail_only_that_row() {
        let mut db = Database::new(DatabaseConfig::in_memory());
        let mut repo = StudentRepository::new(&mut db);

        let rows = vec![
            row(2, "R1", "Asha", "ninety", "A"),
            row(3, "R2", "Ben", "40", "D"),
        ];
        let summary = apply_rows(&mut repo, &rows);

        assert_eq!(summary.inserted(), 1);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].line, 2);
        assert!(repo.get("R1").unwrap().is_none());
        assert!(repo.get("R2").unwrap().is_some());
    }
}
