//! Gradebook - interactive student records and marks statistics
//!
//! This library provides the core functionality for the Gradebook CLI. It
//! keeps student records in SQLite, backs them up to and restores them from
//! CSV, and summarises marks as statistics and a distribution chart.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Student records, marks, and input validation
//! - `storage`: SQLite gateway and the student repository
//! - `services`: The student manager the menu drives
//! - `audit`: Audit logging system
//! - `backup`: CSV backup and restore
//! - `stats`: Descriptive statistics and histograms
//! - `display`: Table formatting for terminal output
//! - `tui`: Full-screen distribution chart
//! - `cli`: Interactive menu
//!
//! # Example
//!
//! ```rust,ignore
//! use gradebook::config::{paths::GradebookPaths, settings::Settings};
//! use gradebook::services::StudentManager;
//! use gradebook::storage::Database;
//!
//! let paths = GradebookPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut db = Database::new(settings.database_config(&paths));
//! if db.connect() {
//!     let mut manager = StudentManager::new(db, std::io::stdout());
//!     manager.view_all();
//! }
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod stats;
pub mod storage;
pub mod tui;

pub use error::{GradebookError, GradebookResult};
