//! Custom error types for Gradebook
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for Gradebook operations
#[derive(Error, Debug)]
pub enum GradebookError {
    /// The relational store could not be reached
    #[error("Database connection error: {0}")]
    Connection(String),

    /// A statement failed, including constraint violations
    #[error("Query error: {0}")]
    Query(String),

    /// Bad user input
    #[error("{0}")]
    Validation(String),

    /// Backup file missing, unreadable, or unwritable
    #[error("File error: {0}")]
    File(String),

    /// The operation had nothing to act on
    #[error("{0}")]
    EmptyResult(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Terminal chart errors
    #[error("Display error: {0}")]
    Display(String),
}

impl GradebookError {
    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for GradebookError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for GradebookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for GradebookError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<rusqlite::Error> for GradebookError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Query(err.to_string())
    }
}

impl From<crate::models::StudentValidationError> for GradebookError {
    fn from(err: crate::models::StudentValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Result type alias for Gradebook operations
pub type GradebookResult<T> = Result<T, GradebookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GradebookError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_from_csv_error() {
        let mut reader = csv::Reader::from_reader("a,b\n1\n".as_bytes());
        let csv_err = reader.records().next().unwrap().unwrap_err();
        let err: GradebookError = csv_err.into();
        assert!(matches!(err, GradebookError::Csv(_)));
    }

    #[test]
    fn test_validation_error_displays_bare_message() {
        let err = GradebookError::Validation("Name cannot be empty.".into());
        assert_eq!(err.to_string(), "Name cannot be empty.");
        assert!(err.is_validation());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: GradebookError = io_err.into();
        assert!(matches!(err, GradebookError::Io(_)));
    }

    #[test]
    fn test_from_sqlite_error_is_query() {
        let err: GradebookError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, GradebookError::Query(_)));
    }
}
