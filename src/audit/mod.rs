//! Audit logging for Gradebook
//!
//! Records every successful add, update, delete, and restored row in an
//! append-only audit log.
//!
//! # Architecture
//!
//! - `AuditEntry`: one operation on one student, with optional before/after
//!   values.
//! - `AuditLogger`: appends entries to the log file as line-delimited JSON
//!   (JSONL).
//! - `generate_diff`: a `field: old -> new` summary for updates.
//!
//! # Example
//!
//! ```rust,ignore
//! use gradebook::audit::{generate_diff, AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::create(&student))?;
//!
//! let diff = generate_diff(&before, &after);
//! logger.log(&AuditEntry::update(Some(&before), &after, diff))?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
