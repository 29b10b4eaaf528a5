//! CSV backup and restore for Gradebook
//!
//! The CSV file is a derived snapshot of the students table. It carries no
//! identity of its own; restore reconciles rows with the store by roll
//! number only.
//!
//! # Backup Format
//!
//! UTF-8 CSV with a header row equal to the store's column names:
//! `roll_no,name,marks,grade`, one data row per student.
//!
//! # Restore
//!
//! Every row is attempted independently (upsert-by-retry): insert, and if
//! that fails, update the existing row with the same roll number. There is
//! no transaction around the run, so a partially failed restore leaves the
//! successful rows in place.
//!
//! # Example
//!
//! ```rust,ignore
//! use gradebook::backup::{apply_rows, read_backup, write_backup};
//!
//! write_backup(Path::new("students_backup.csv"), &students)?;
//!
//! let rows = read_backup(Path::new("students_backup.csv"))?;
//! let summary = apply_rows(&mut repo, &rows);
//! println!("{}", summary.summary());
//! ```

mod manager;
mod restore;

pub use manager::write_backup;
pub use restore::{
    apply_rows, read_backup, RestoreAction, RestoreFailure, RestoreRow, RestoreSummary,
};
