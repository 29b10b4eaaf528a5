//! Student model
//!
//! A student record and the input checks applied before anything reaches the
//! store.

use serde::Serialize;
use std::fmt;

use super::marks::{Marks, MAX_MARKS, MIN_MARKS};

/// One student's record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Student {
    /// Roll number (primary key)
    pub roll_no: String,

    /// Student name
    pub name: String,

    /// Marks out of 100
    pub marks: Marks,

    /// Free-form grade such as "A" or "B+"
    pub grade: String,
}

impl Student {
    /// Create a new student with numeric marks
    pub fn new(
        roll_no: impl Into<String>,
        name: impl Into<String>,
        marks: f64,
        grade: impl Into<String>,
    ) -> Self {
        Self {
            roll_no: roll_no.into(),
            name: name.into(),
            marks: Marks::Score(marks),
            grade: grade.into(),
        }
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.roll_no)
    }
}

/// The columns statistics are computed over
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentMarks {
    pub roll_no: String,
    pub name: String,
    pub marks: Marks,
}

/// The fields to change on an existing student
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentUpdate {
    pub name: Option<String>,
    pub marks: Option<f64>,
    pub grade: Option<String>,
}

impl StudentUpdate {
    /// An update that changes nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a new name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set new marks
    pub fn with_marks(mut self, marks: f64) -> Self {
        self.marks = Some(marks);
        self
    }

    /// Set a new grade
    pub fn with_grade(mut self, grade: impl Into<String>) -> Self {
        self.grade = Some(grade.into());
        self
    }

    /// Whether no field was supplied
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.marks.is_none() && self.grade.is_none()
    }

    /// Apply the update to an in-memory copy, for audit before/after values
    pub fn apply_to(&self, student: &Student) -> Student {
        Student {
            roll_no: student.roll_no.clone(),
            name: self.name.clone().unwrap_or_else(|| student.name.clone()),
            marks: self.marks.map(Marks::Score).unwrap_or_else(|| student.marks.clone()),
            grade: self.grade.clone().unwrap_or_else(|| student.grade.clone()),
        }
    }
}

/// Check a roll number, returning it trimmed
pub fn validate_roll_no(input: &str) -> Result<String, StudentValidationError> {
    non_empty(input, StudentValidationError::EmptyRollNo)
}

/// Check a name, returning it trimmed
pub fn validate_name(input: &str) -> Result<String, StudentValidationError> {
    non_empty(input, StudentValidationError::EmptyName)
}

/// Check a grade, returning it trimmed
pub fn validate_grade(input: &str) -> Result<String, StudentValidationError> {
    non_empty(input, StudentValidationError::EmptyGrade)
}

/// Parse marks typed by the user; must be a number in [0, 100]
pub fn parse_marks(input: &str) -> Result<f64, StudentValidationError> {
    let trimmed = input.trim();
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| StudentValidationError::InvalidMarks(trimmed.to_string()))?;
    check_marks_range(value)
}

fn check_marks_range(value: f64) -> Result<f64, StudentValidationError> {
    if (MIN_MARKS..=MAX_MARKS).contains(&value) {
        Ok(value)
    } else {
        Err(StudentValidationError::MarksOutOfRange(value))
    }
}

fn non_empty(input: &str, err: StudentValidationError) -> Result<String, StudentValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        Err(err)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Validation errors for student input
#[derive(Debug, Clone, PartialEq)]
pub enum StudentValidationError {
    EmptyRollNo,
    EmptyName,
    EmptyGrade,
    InvalidMarks(String),
    MarksOutOfRange(f64),
}

impl fmt::Display for StudentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRollNo => write!(f, "Roll no cannot be empty."),
            Self::EmptyName => write!(f, "Name cannot be empty."),
            Self::EmptyGrade => write!(f, "Grade cannot be empty."),
            Self::InvalidMarks(raw) => write!(
                f,
                "Invalid marks '{}'; enter a number between 0 and 100.",
                raw
            ),
            Self::MarksOutOfRange(v) => {
                write!(f, "Marks must be between 0 and 100 (got {}).", v)
            }
        }
    }
}

impl std::error::Error for StudentValidationError {}
