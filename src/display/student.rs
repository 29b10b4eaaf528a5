//! Student display formatting
//!
//! Formats students as tables for terminal output.

use tabled::{settings::Style, Table, Tabled};

use crate::models::{Student, StudentMarks};

#[derive(Tabled)]
struct StudentRow {
    roll_no: String,
    name: String,
    marks: String,
    grade: String,
}

impl From<&Student> for StudentRow {
    fn from(student: &Student) -> Self {
        Self {
            roll_no: student.roll_no.clone(),
            name: student.name.clone(),
            marks: student.marks.to_string(),
            grade: student.grade.clone(),
        }
    }
}

#[derive(Tabled)]
struct MarksRow {
    roll_no: String,
    name: String,
    marks: String,
}

/// Format students as a table, one row per student
pub fn format_student_table(students: &[Student]) -> String {
    if students.is_empty() {
        return "No students found.".to_string();
    }

    let rows: Vec<StudentRow> = students.iter().map(StudentRow::from).collect();
    Table::new(rows).with(Style::psql()).to_string()
}

/// Format roll number, name, and marks columns as a table
pub fn format_marks_table(entries: &[StudentMarks]) -> String {
    let rows: Vec<MarksRow> = entries
        .iter()
        .map(|e| MarksRow {
            roll_no: e.roll_no.clone(),
            name: e.name.clone(),
            marks: e.marks.to_string(),
        })
        .collect();
    Table::new(rows).with(Style::psql()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Marks;

    #[test]
    fn test_empty_table() {
        assert_eq!(format_student_table(&[]), "No students found.");
    }

    #[test]
    fn test_table_has_header_and_rows() {
        let students = vec![
            Student::new("R1", "Asha", 91.5, "A"),
            Student {
                roll_no: "R2".into(),
                name: "Ben".into(),
                marks: Marks::Unparsed("absent".into()),
                grade: "F".into(),
            },
        ];

        let output = format_student_table(&students);
        let header = output.lines().next().unwrap();
        assert!(header.contains("roll_no"));
        assert!(header.contains("grade"));
        assert!(output.contains("Asha"));
        assert!(output.contains("91.5"));
        assert!(output.contains("absent"));
    }

    #[test]
    fn test_marks_table() {
        let entries = vec![StudentMarks {
            roll_no: "R5".into(),
            name: "Dev".into(),
            marks: Marks::Score(100.0),
        }];

        let output = format_marks_table(&entries);
        assert!(output.contains("R5"));
        assert!(output.contains("100.0"));
        assert!(!output.contains("grade"));
    }
}
