//! Student repository
//!
//! Typed statements over the gateway. Rows are turned into `Student` values
//! here so nothing above the storage layer handles raw column maps.

use rusqlite::types::Value;

use super::database::{Database, ExecOptions, Row};
use crate::error::{GradebookError, GradebookResult};
use crate::models::{Marks, Student, StudentMarks, StudentUpdate};

const INSERT_STUDENT: &str =
    "INSERT INTO students (roll_no, name, marks, grade) VALUES (?1, ?2, ?3, ?4)";
const SELECT_ALL: &str = "SELECT roll_no, name, marks, grade FROM students ORDER BY roll_no";
const SELECT_ONE: &str = "SELECT roll_no, name, marks, grade FROM students WHERE roll_no = ?1";
const DELETE_STUDENT: &str = "DELETE FROM students WHERE roll_no = ?1";
const SELECT_MARKS_ROWS: &str = "SELECT roll_no, name, marks FROM students ORDER BY roll_no";
const SELECT_MARKS: &str = "SELECT marks FROM students";

/// Repository for the students table
pub struct StudentRepository<'a> {
    db: &'a mut Database,
}

impl<'a> StudentRepository<'a> {
    /// Create a repository over the gateway
    pub fn new(db: &'a mut Database) -> Self {
        Self { db }
    }

    /// Insert a new student; a duplicate roll number is a query error
    pub fn insert(&mut self, student: &Student) -> GradebookResult<()> {
        self.db.execute(
            INSERT_STUDENT,
            &[
                Value::Text(student.roll_no.clone()),
                Value::Text(student.name.clone()),
                student.marks.to_value(),
                Value::Text(student.grade.clone()),
            ],
            ExecOptions::commit(),
        )?;
        Ok(())
    }

    /// All students ordered by roll number
    pub fn get_all(&mut self) -> GradebookResult<Vec<Student>> {
        let rows = self.fetch(SELECT_ALL, &[])?;
        rows.iter().map(row_to_student).collect()
    }

    /// One student by roll number
    pub fn get(&mut self, roll_no: &str) -> GradebookResult<Option<Student>> {
        let rows = self.fetch(SELECT_ONE, &[Value::Text(roll_no.to_string())])?;
        rows.first().map(row_to_student).transpose()
    }

    /// Apply a partial update, returning the number of rows changed
    ///
    /// Returns 0 without touching the store when no field is supplied, and 0
    /// when no student has this roll number.
    pub fn update(&mut self, roll_no: &str, update: &StudentUpdate) -> GradebookResult<usize> {
        let Some((query, params)) = build_update_statement(roll_no, update) else {
            return Ok(0);
        };
        self.db.execute_changes(&query, &params)
    }

    /// Delete by roll number; deleting a missing row is not an error
    pub fn delete(&mut self, roll_no: &str) -> GradebookResult<()> {
        self.db.execute(
            DELETE_STUDENT,
            &[Value::Text(roll_no.to_string())],
            ExecOptions::commit(),
        )?;
        Ok(())
    }

    /// Roll number, name, and marks for every student, ordered by roll number
    pub fn marks_rows(&mut self) -> GradebookResult<Vec<StudentMarks>> {
        let rows = self.fetch(SELECT_MARKS_ROWS, &[])?;
        rows.iter()
            .map(|row| {
                Ok(StudentMarks {
                    roll_no: text_column(row, "roll_no")?,
                    name: text_column(row, "name")?,
                    marks: Marks::from_value(row.require("marks")?),
                })
            })
            .collect()
    }

    /// Every numeric marks value; NULL and text values are skipped
    pub fn numeric_marks(&mut self) -> GradebookResult<Vec<f64>> {
        let rows = self.fetch(SELECT_MARKS, &[])?;
        let mut marks = Vec::with_capacity(rows.len());
        for row in &rows {
            if let Some(v) = Marks::from_value(row.require("marks")?).value() {
                marks.push(v);
            }
        }
        Ok(marks)
    }

    fn fetch(&mut self, query: &str, params: &[Value]) -> GradebookResult<Vec<Row>> {
        Ok(self
            .db
            .execute(query, params, ExecOptions::fetch())?
            .unwrap_or_default())
    }
}

/// Build `UPDATE students SET ... WHERE roll_no = ?N` from the supplied fields
///
/// Only supplied fields appear in the `SET` clause. Returns `None` when the
/// update is empty.
pub fn build_update_statement(
    roll_no: &str,
    update: &StudentUpdate,
) -> Option<(String, Vec<Value>)> {
    let mut assignments = Vec::new();
    let mut params = Vec::new();

    if let Some(name) = &update.name {
        params.push(Value::Text(name.clone()));
        assignments.push(format!("name = ?{}", params.len()));
    }
    if let Some(marks) = update.marks {
        params.push(Value::Real(marks));
        assignments.push(format!("marks = ?{}", params.len()));
    }
    if let Some(grade) = &update.grade {
        params.push(Value::Text(grade.clone()));
        assignments.push(format!("grade = ?{}", params.len()));
    }

    if assignments.is_empty() {
        return None;
    }

    params.push(Value::Text(roll_no.to_string()));
    let query = format!(
        "UPDATE students SET {} WHERE roll_no = ?{}",
        assignments.join(", "),
        params.len()
    );

    Some((query, params))
}

fn row_to_student(row: &Row) -> GradebookResult<Student> {
    Ok(Student {
        roll_no: text_column(row, "roll_no")?,
        name: text_column(row, "name")?,
        marks: Marks::from_value(row.require("marks")?),
        grade: text_column(row, "grade")?,
    })
}

fn text_column(row: &Row, column: &str) -> GradebookResult<String> {
    match row.require(column)? {
        Value::Text(s) => Ok(s.clone()),
        Value::Integer(i) => Ok(i.to_string()),
        Value::Real(f) => Ok(f.to_string()),
        Value::Null => Ok(String::new()),
        Value::Blob(_) => Err(GradebookError::Query(format!(
            "Column {} holds binary data",
            column
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::DatabaseConfig;

    fn test_db() -> Database {
        let mut db = Database::new(DatabaseConfig::in_memory());
        assert!(db.connect());
        db
    }

    #[test]
    fn test_build_update_only_supplied_fields() {
        let update = StudentUpdate::new().with_marks(88.0);
        let (query, params) = build_update_statement("R1", &update).unwrap();

        assert_eq!(query, "UPDATE students SET marks = ?1 WHERE roll_no = ?2");
        assert_eq!(
            params,
            vec![Value::Real(88.0), Value::Text("R1".into())]
        );
    }

    #[test]
    fn test_build_update_all_fields() {
        let update = StudentUpdate::new()
            .with_name("Nila")
            .with_marks(64.5)
            .with_grade("B");
        let (query, params) = build_update_statement("R9", &update).unwrap();

        assert_eq!(
            query,
            "UPDATE students SET name = ?1, marks = ?2, grade = ?3 WHERE roll_no = ?4"
        );
        assert_eq!(params.len(), 4);
        assert_eq!(params[3], Value::Text("R9".into()));
    }

    #[test]
    fn test_build_update_empty() {
        assert!(build_update_statement("R1", &StudentUpdate::new()).is_none());
    }

    #[test]
    fn test_insert_and_get() {
        let mut db = test_db();
        let mut repo = StudentRepository::new(&mut db);

        let student = Student::new("R1", "Asha", 91.0, "A");
        repo.insert(&student).unwrap();

        assert_eq!(repo.get("R1").unwrap(), Some(student));
        assert_eq!(repo.get("R2").unwrap(), None);
    }

    #[test]
    fn test_get_all_ordered_by_roll_no() {
        let mut db = test_db();
        let mut repo = StudentRepository::new(&mut db);

        repo.insert(&Student::new("R3", "C", 30.0, "F")).unwrap();
        repo.insert(&Student::new("R1", "A", 10.0, "F")).unwrap();
        repo.insert(&Student::new("R2", "B", 20.0, "F")).unwrap();

        let rolls: Vec<String> = repo.get_all().unwrap().into_iter().map(|s| s.roll_no).collect();
        assert_eq!(rolls, vec!["R1", "R2", "R3"]);
    }

    #[test]
    fn test_duplicate_insert_fails() {
        let mut db = test_db();
        let mut repo = StudentRepository::new(&mut db);

        repo.insert(&Student::new("R1", "Asha", 91.0, "A")).unwrap();
        let err = repo.insert(&Student::new("R1", "Other", 10.0, "F")).unwrap_err();
        assert!(matches!(err, GradebookError::Query(_)));
    }

    #[test]
    fn test_partial_update_leaves_other_fields() {
        let mut db = test_db();
        let mut repo = StudentRepository::new(&mut db);

        repo.insert(&Student::new("R1", "Asha", 70.0, "B")).unwrap();
        assert_eq!(repo.update("R1", &StudentUpdate::new().with_marks(95.0)).unwrap(), 1);

        let stored = repo.get("R1").unwrap().unwrap();
        assert_eq!(stored.name, "Asha");
        assert_eq!(stored.grade, "B");
        assert_eq!(stored.marks, Marks::Score(95.0));
    }

    #[test]
    fn test_empty_update_is_noop() {
        let mut db = test_db();
        let mut repo = StudentRepository::new(&mut db);
        assert_eq!(repo.update("R1", &StudentUpdate::new()).unwrap(), 0);
    }

    #[test]
    fn test_update_missing_student_changes_nothing() {
        let mut db = test_db();
        let mut repo = StudentRepository::new(&mut db);

        let changed = repo
            .update("R9", &StudentUpdate::new().with_name("Nobody"))
            .unwrap();
        assert_eq!(changed, 0);
        assert!(repo.get("R9").unwrap().is_none());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut db = test_db();
        let mut repo = StudentRepository::new(&mut db);

        repo.insert(&Student::new("R1", "Asha", 70.0, "B")).unwrap();
        repo.delete("R1").unwrap();
        repo.delete("R1").unwrap();
        assert!(repo.get("R1").unwrap().is_none());
    }

    #[test]
    fn test_text_marks_survive_listing_but_not_numeric_marks() {
        let mut db = test_db();
        db.execute(
            "INSERT INTO students (roll_no, name, marks, grade) VALUES ('R2', 'Ben', 'absent', 'F')",
            &[],
            ExecOptions::commit(),
        )
        .unwrap();

        let mut repo = StudentRepository::new(&mut db);
        repo.insert(&Student::new("R1", "Asha", 80.0, "A")).unwrap();

        let all = repo.get_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].marks, Marks::Unparsed("absent".into()));

        assert_eq!(repo.numeric_marks().unwrap(), vec![80.0]);

        let rows = repo.marks_rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].roll_no, "R1");
    }
}
