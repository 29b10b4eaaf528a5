//! Database schema definitions

/// Name of the student table
pub const STUDENTS_TABLE: &str = "students";

/// Column names in the order every student query selects them
pub const STUDENT_COLUMNS: [&str; 4] = ["roll_no", "name", "marks", "grade"];

/// SQL to create the students table
///
/// `marks` has REAL affinity only; the store does not reject text values.
pub const CREATE_STUDENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS students (
    roll_no TEXT NOT NULL PRIMARY KEY,
    name TEXT NOT NULL,
    marks REAL,
    grade TEXT NOT NULL
)
"#;

/// All schema statements, run on every connect
pub fn all_schema_statements() -> Vec<&'static str> {
    vec![CREATE_STUDENTS_TABLE]
}
