//! Audit entry data structures
//!
//! Defines the operation types and the entry format written for every
//! successful change to the students table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Student;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Student was added
    Create,
    /// Student was updated
    Update,
    /// Student was deleted
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Roll number of the affected student
    pub roll_no: String,

    /// Student name, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The record before the operation (updates/deletes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// The record after the operation (creates/updates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Human-readable change summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    /// Entry for an added student
    pub fn create(student: &Student) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            roll_no: student.roll_no.clone(),
            name: Some(student.name.clone()),
            before: None,
            after: serde_json::to_value(student).ok(),
            diff_summary: None,
        }
    }

    /// Entry for an updated student
    ///
    /// `before` is `None` when the previous state was not read (restore).
    pub fn update(
        before: Option<&Student>,
        after: &Student,
        diff_summary: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Update,
            roll_no: after.roll_no.clone(),
            name: Some(after.name.clone()),
            before: before.and_then(|s| serde_json::to_value(s).ok()),
            after: serde_json::to_value(after).ok(),
            diff_summary,
        }
    }

    /// Entry for a delete by roll number
    ///
    /// `before` is `None` when no row existed.
    pub fn delete(roll_no: impl Into<String>, before: Option<&Student>) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Delete,
            roll_no: roll_no.into(),
            name: before.map(|s| s.name.clone()),
            before: before.and_then(|s| serde_json::to_value(s).ok()),
            after: None,
            diff_summary: None,
        }
    }

    /// Attach a change summary
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.diff_summary = Some(summary.into());
        self
    }
}
