//! Student manager
//!
//! The façade the menu talks to. Every operation goes through the gateway
//! (reconnecting lazily), contains its own failures by printing a diagnostic
//! to the output stream, and returns a neutral value instead of an error.

use std::fmt::Display;
use std::io::Write;
use std::path::Path;

use crate::audit::{generate_diff, AuditEntry, AuditLogger};
use crate::backup::{apply_rows, read_backup, write_backup, RestoreAction, RestoreSummary};
use crate::display::{format_stats_report, format_student_table};
use crate::error::GradebookResult;
use crate::models::{Student, StudentUpdate};
use crate::stats::{Histogram, StatsReport, DEFAULT_BIN_COUNT};
use crate::storage::{Database, StudentRepository};
use crate::tui::{DistributionView, TerminalChart};

/// Student record operations over one gateway
pub struct StudentManager<W: Write> {
    db: Database,
    audit: Option<AuditLogger>,
    view: Box<dyn DistributionView>,
    out: W,
}

impl<W: Write> StudentManager<W> {
    /// Create a manager that writes its messages to `out`
    ///
    /// Distribution plots go to the terminal; auditing is off until
    /// [`with_audit`](Self::with_audit) is called.
    pub fn new(db: Database, out: W) -> Self {
        Self {
            db,
            audit: None,
            view: Box::new(TerminalChart::new()),
            out,
        }
    }

    /// Record every successful mutation in an audit log
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    /// Replace the view used by [`plot_distribution`](Self::plot_distribution)
    pub fn with_view(mut self, view: Box<dyn DistributionView>) -> Self {
        self.view = view;
        self
    }

    /// The output stream
    pub fn output(&self) -> &W {
        &self.out
    }

    /// The output stream, for callers that print alongside the manager
    pub fn output_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Add a student; a duplicate roll number is reported and returns `false`
    pub fn add(&mut self, student: &Student) -> bool {
        let result = self.students().insert(student);
        match result {
            Ok(()) => {
                self.say("Student added.");
                self.record(&[AuditEntry::create(student)]);
                true
            }
            Err(e) => {
                self.say(format!("Error adding student: {}", e));
                false
            }
        }
    }

    /// Print every student as a table and return them, ordered by roll number
    pub fn view_all(&mut self) -> Vec<Student> {
        let Some(students) = self.load_all() else {
            return Vec::new();
        };
        let table = format_student_table(&students);
        self.say(table);
        students
    }

    /// Look up one student
    pub fn get_by_roll(&mut self, roll_no: &str) -> Option<Student> {
        let result = self.students().get(roll_no);
        match result {
            Ok(student) => student,
            Err(e) => {
                self.say(format!("Error: {}", e));
                None
            }
        }
    }

    /// Apply the supplied fields of `update` to an existing student
    pub fn update(&mut self, roll_no: &str, update: &StudentUpdate) -> bool {
        let lookup = self.students().get(roll_no);
        let existing = match lookup {
            Ok(Some(student)) => student,
            Ok(None) => {
                self.say("Student not found.");
                return false;
            }
            Err(e) => {
                self.say(format!("Error updating student: {}", e));
                return false;
            }
        };

        if update.is_empty() {
            self.say("Nothing to update.");
            return false;
        }

        let result = self.students().update(roll_no, update);
        match result {
            Ok(_) => {
                self.say("Student updated.");
                let after = update.apply_to(&existing);
                let diff = generate_diff(&existing, &after);
                self.record(&[AuditEntry::update(Some(&existing), &after, diff)]);
                true
            }
            Err(e) => {
                self.say(format!("Error updating student: {}", e));
                false
            }
        }
    }

    /// Delete by roll number; succeeds whether or not the row existed
    pub fn delete(&mut self, roll_no: &str) -> bool {
        // Only read so the audit entry can carry the removed record
        let before = if self.audit.is_some() {
            self.students().get(roll_no).ok().flatten()
        } else {
            None
        };

        let result = self.students().delete(roll_no);
        match result {
            Ok(()) => {
                self.say("Student deleted (if existed).");
                if let Some(before) = before {
                    self.record(&[AuditEntry::delete(roll_no, Some(&before))]);
                }
                true
            }
            Err(e) => {
                self.say(format!("Error deleting student: {}", e));
                false
            }
        }
    }

    /// Write every student to a CSV file
    ///
    /// Nothing is written when there are no students.
    pub fn backup(&mut self, path: &Path) -> bool {
        let Some(students) = self.load_all() else {
            return false;
        };
        if students.is_empty() {
            self.say("Nothing to backup.");
            return false;
        }

        match write_backup(path, &students) {
            Ok(_) => {
                self.say(format!("Backup saved to {}", path.display()));
                true
            }
            Err(e) => {
                self.say(format!("Backup error: {}", e));
                false
            }
        }
    }

    /// Upsert every row of a backup file
    ///
    /// A file that cannot be read leaves the store untouched. Otherwise each
    /// row is tried on its own and every failed row is reported.
    pub fn restore(&mut self, path: &Path) -> Option<RestoreSummary> {
        if !path.exists() {
            self.say("CSV file not found.");
            return None;
        }

        let rows = match read_backup(path) {
            Ok(rows) => rows,
            Err(e) => {
                self.say(e);
                return None;
            }
        };

        let summary = apply_rows(&mut self.students(), &rows);
        for failure in &summary.failures {
            let _ = writeln!(self.out, "{}", failure);
        }
        self.say(format!("Restore complete. ({})", summary.summary()));

        let source = format!("restored from {}", path.display());
        let entries: Vec<AuditEntry> = summary
            .restored
            .iter()
            .map(|(action, student)| match action {
                RestoreAction::Inserted => AuditEntry::create(student),
                RestoreAction::Updated => AuditEntry::update(None, student, None),
            })
            .map(|entry| entry.with_summary(source.clone()))
            .collect();
        self.record(&entries);

        Some(summary)
    }

    /// Print mean, median, standard deviation, and the top three students
    pub fn stats(&mut self) -> Option<StatsReport> {
        let result = self.students().marks_rows();
        let rows = match result {
            Ok(rows) => rows,
            Err(e) => {
                self.say(format!("Error computing stats: {}", e));
                return None;
            }
        };

        let Some(report) = StatsReport::from_rows(&rows) else {
            self.say("No data to compute stats.");
            return None;
        };
        let text = format_stats_report(&report);
        self.say(text.trim_end());
        Some(report)
    }

    /// Show a histogram of every numeric mark
    pub fn plot_distribution(&mut self) -> bool {
        let result = self.students().numeric_marks();
        let marks = match result {
            Ok(marks) => marks,
            Err(e) => {
                self.say(format!("Error loading marks: {}", e));
                return false;
            }
        };
        if marks.is_empty() {
            self.say("No marks to plot.");
            return false;
        }

        let histogram = Histogram::equal_width(marks, DEFAULT_BIN_COUNT);
        match self.view.show(&histogram) {
            Ok(()) => true,
            Err(e) => {
                self.say(format!("Plot error: {}", e));
                false
            }
        }
    }

    /// Release the connection
    pub fn close(&mut self) {
        self.db.close();
    }

    fn students(&mut self) -> StudentRepository<'_> {
        StudentRepository::new(&mut self.db)
    }

    fn load_all(&mut self) -> Option<Vec<Student>> {
        let result: GradebookResult<Vec<Student>> = self.students().get_all();
        match result {
            Ok(students) => Some(students),
            Err(e) => {
                self.say(format!("Error fetching students: {}", e));
                None
            }
        }
    }

    fn record(&mut self, entries: &[AuditEntry]) {
        let Some(logger) = &self.audit else {
            return;
        };
        if let Err(e) = logger.log_batch(entries) {
            let _ = writeln!(self.out, "Warning: audit log not written: {}", e);
        }
    }

    fn say(&mut self, message: impl Display) {
        let _ = writeln!(self.out, "{}", message);
    }
}
