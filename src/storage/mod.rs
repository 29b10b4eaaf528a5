//! Storage layer for Gradebook
//!
//! A single SQLite connection behind the [`Database`] gateway, and a typed
//! [`StudentRepository`] over it. Schema:
//! - students(roll_no PRIMARY KEY, name, marks, grade)

pub mod database;
pub mod schema;
pub mod students;

pub use database::{Database, DatabaseConfig, DatabaseLocation, ExecOptions, Row};
pub use students::{build_update_statement, StudentRepository};
