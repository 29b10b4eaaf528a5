//! Core data models for Gradebook
//!
//! A student record, its marks value, and the optional-field update set.

pub mod marks;
pub mod student;

pub use marks::{Marks, MAX_MARKS, MIN_MARKS};
pub use student::{
    parse_marks, validate_grade, validate_name, validate_roll_no, Student, StudentMarks,
    StudentUpdate, StudentValidationError,
};
