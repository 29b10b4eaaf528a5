//! Interactive menu
//!
//! Prints the menu, reads a choice, collects and validates the fields the
//! choice needs, and dispatches to the manager. Input problems are reported
//! and the loop carries on; only a broken input stream ends it early.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::display::format_student_table;
use crate::error::{GradebookError, GradebookResult};
use crate::models::{
    parse_marks, validate_grade, validate_name, validate_roll_no, Student, StudentUpdate,
    StudentValidationError,
};
use crate::services::StudentManager;

use super::prompt::Prompt;

const MENU: &str = "\n--- Student Performance Management ---
1. Add Student
2. View All Students
3. View Student by Roll No
4. Update Student
5. Delete Student
6. Backup to CSV
7. Restore from CSV
8. Statistics (mean, median, toppers)
9. Plot Marks Distribution
0. Exit";

/// Why a menu action stopped early
enum Interrupt {
    /// Input is exhausted; treated like Exit
    EndOfInput,
    /// Reading input or writing prompts failed
    Stream(GradebookError),
    /// The action failed; report and show the menu again
    Failed(GradebookError),
}

impl From<GradebookError> for Interrupt {
    fn from(err: GradebookError) -> Self {
        Self::Failed(err)
    }
}

impl From<StudentValidationError> for Interrupt {
    fn from(err: StudentValidationError) -> Self {
        Self::Failed(err.into())
    }
}

enum Flow {
    Continue,
    Exit,
}

/// Run the menu until Exit is chosen or the input ends
///
/// `backup_file` is offered as the default path for backup and restore.
/// Returns an error only when the input or output stream itself fails.
pub fn run_menu<R: BufRead, W: Write>(
    manager: &mut StudentManager<W>,
    input: R,
    backup_file: &Path,
) -> GradebookResult<()> {
    let mut menu = Menu {
        manager,
        prompt: Prompt::new(input),
        backup_file: backup_file.to_path_buf(),
    };
    menu.run()
}

struct Menu<'m, R, W: Write> {
    manager: &'m mut StudentManager<W>,
    prompt: Prompt<R>,
    backup_file: PathBuf,
}

impl<R: BufRead, W: Write> Menu<'_, R, W> {
    fn run(&mut self) -> GradebookResult<()> {
        loop {
            writeln!(self.manager.output_mut(), "{}", MENU)?;

            let outcome = self
                .ask("Choose an option: ")
                .and_then(|choice| self.dispatch(&choice));

            match outcome {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => return Ok(()),
                Err(Interrupt::EndOfInput) => {
                    writeln!(self.manager.output_mut())?;
                    self.say("Exiting...")?;
                    return Ok(());
                }
                Err(Interrupt::Stream(e)) => return Err(e),
                Err(Interrupt::Failed(e)) if e.is_validation() => {
                    self.say(&format!("Input error: {}", e))?;
                }
                Err(Interrupt::Failed(e)) => {
                    self.say(&format!("Unexpected error: {}", e))?;
                }
            }
        }
    }

    fn dispatch(&mut self, choice: &str) -> Result<Flow, Interrupt> {
        match choice {
            "1" => self.add()?,
            "2" => {
                self.manager.view_all();
            }
            "3" => self.view_one()?,
            "4" => self.update()?,
            "5" => self.delete()?,
            "6" => {
                let path = self.ask_path("Backup file")?;
                self.manager.backup(&path);
            }
            "7" => {
                let path = self.ask_path("Restore from")?;
                self.manager.restore(&path);
            }
            "8" => {
                self.manager.stats();
            }
            "9" => {
                self.manager.plot_distribution();
            }
            "0" => {
                self.say("Exiting...").map_err(Interrupt::Stream)?;
                return Ok(Flow::Exit);
            }
            _ => self.say("Invalid choice.").map_err(Interrupt::Stream)?,
        }
        Ok(Flow::Continue)
    }

    fn add(&mut self) -> Result<(), Interrupt> {
        let roll_no = self.ask_roll_no()?;
        let name = validate_name(&self.ask("Enter Name: ")?)?;
        let marks = parse_marks(&self.ask("Enter Marks (0-100): ")?)?;
        let grade = validate_grade(&self.ask("Enter Grade (e.g. A, B+, C): ")?)?;

        self.manager
            .add(&Student::new(roll_no, name, marks, grade));
        Ok(())
    }

    fn view_one(&mut self) -> Result<(), Interrupt> {
        let roll_no = self.ask_roll_no()?;
        let text = match self.manager.get_by_roll(&roll_no) {
            Some(student) => format_student_table(std::slice::from_ref(&student)),
            None => "Not found.".to_string(),
        };
        self.say(&text).map_err(Interrupt::Stream)
    }

    fn update(&mut self) -> Result<(), Interrupt> {
        let roll_no = self.ask_roll_no()?;
        self.say("Leave a field blank to skip updating it.")
            .map_err(Interrupt::Stream)?;

        let mut update = StudentUpdate::new();
        let name = self.ask("New Name: ")?;
        if !name.is_empty() {
            update = update.with_name(name);
        }
        let marks = self.ask("New Marks: ")?;
        if !marks.is_empty() {
            update = update.with_marks(parse_marks(&marks)?);
        }
        let grade = self.ask("New Grade: ")?;
        if !grade.is_empty() {
            update = update.with_grade(grade);
        }

        self.manager.update(&roll_no, &update);
        Ok(())
    }

    fn delete(&mut self) -> Result<(), Interrupt> {
        let roll_no = self.ask_roll_no()?;
        let confirm = self.ask(&format!("Type 'yes' to delete student {}: ", roll_no))?;

        if confirm.to_lowercase() == "yes" {
            self.manager.delete(&roll_no);
            Ok(())
        } else {
            self.say("Delete cancelled.").map_err(Interrupt::Stream)
        }
    }

    fn ask_roll_no(&mut self) -> Result<String, Interrupt> {
        let answer = self.ask("Enter Roll No: ")?;
        Ok(validate_roll_no(&answer)?)
    }

    /// Ask for a file path, falling back to the configured backup file
    fn ask_path(&mut self, label: &str) -> Result<PathBuf, Interrupt> {
        let prompt = format!("{} [{}]: ", label, self.backup_file.display());
        let answer = self.ask(&prompt)?;
        if answer.is_empty() {
            Ok(self.backup_file.clone())
        } else {
            Ok(PathBuf::from(answer))
        }
    }

    fn ask(&mut self, prompt: &str) -> Result<String, Interrupt> {
        match self.prompt.ask(self.manager.output_mut(), prompt) {
            Ok(Some(answer)) => Ok(answer),
            Ok(None) => Err(Interrupt::EndOfInput),
            Err(e) => Err(Interrupt::Stream(e)),
        }
    }

    fn say(&mut self, message: &str) -> GradebookResult<()> {
        writeln!(self.manager.output_mut(), "{}", message)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Marks;
    use crate::stats::Histogram;
    use crate::storage::{Database, DatabaseConfig};
    use crate::tui::DistributionView;
    use tempfile::TempDir;

    struct NullView;

    impl DistributionView for NullView {
        fn show(&mut self, _histogram: &Histogram) -> GradebookResult<()> {
            Ok(())
        }
    }

    fn create_test_manager() -> StudentManager<Vec<u8>> {
        let mut db = Database::new(DatabaseConfig::in_memory());
        assert!(db.connect());
        StudentManager::new(db, Vec::new()).with_view(Box::new(NullView))
    }

    fn run(manager: &mut StudentManager<Vec<u8>>, input: &str) -> String {
        run_menu(manager, input.as_bytes(), Path::new("students_backup.csv")).unwrap();
        String::from_utf8_lossy(manager.output()).into_owned()
    }

    #[test]
    fn test_add_view_exit() {
        let mut manager = create_test_manager();
        let out = run(&mut manager, "1\nR1\nAsha\n91.5\nA\n2\n0\n");

        assert!(out.contains("--- Student Performance Management ---"));
        assert!(out.contains("Student added."));
        assert!(out.contains("Asha"));
        assert!(out.trim_end().ends_with("Exiting..."));
        assert_eq!(manager.get_by_roll("R1").unwrap().marks, Marks::Score(91.5));
    }

    #[test]
    fn test_marks_boundaries() {
        let mut manager = create_test_manager();
        let input = "1\nR1\nA\n0\nA\n\
                     1\nR2\nB\n100\nA\n\
                     1\nR3\nC\n-0.01\n\
                     1\nR4\nD\n100.01\n\
                     1\nR5\nE\nabc\n0\n";
        let out = run(&mut manager, input);

        assert!(manager.get_by_roll("R1").is_some());
        assert!(manager.get_by_roll("R2").is_some());
        assert!(manager.get_by_roll("R3").is_none());
        assert!(manager.get_by_roll("R4").is_none());
        assert!(manager.get_by_roll("R5").is_none());
        assert_eq!(out.matches("Input error: Marks must be between 0 and 100").count(), 2);
        assert!(out.contains("Input error: Invalid marks 'abc'"));
    }

    #[test]
    fn test_empty_fields_rejected() {
        let mut manager = create_test_manager();
        let out = run(&mut manager, "1\n   \n1\nR1\n\n1\nR1\nAsha\n50\n \n0\n");

        assert!(out.contains("Input error: Roll no cannot be empty."));
        assert!(out.contains("Input error: Name cannot be empty."));
        assert!(out.contains("Input error: Grade cannot be empty."));
        assert!(manager.get_by_roll("R1").is_none());
    }

    #[test]
    fn test_invalid_choice() {
        let mut manager = create_test_manager();
        let out = run(&mut manager, "42\n0\n");

        assert!(out.contains("Invalid choice."));
    }

    #[test]
    fn test_end_of_input_exits() {
        let mut manager = create_test_manager();
        let out = run(&mut manager, "1\nR1\n");

        assert!(out.contains("Exiting..."));
        assert!(manager.get_by_roll("R1").is_none());
    }

    #[test]
    fn test_update_skips_blank_fields() {
        let mut manager = create_test_manager();
        manager.add(&Student::new("R1", "Asha", 70.0, "B"));

        let out = run(&mut manager, "4\nR1\n\n85\n\n0\n");

        assert!(out.contains("Leave a field blank to skip updating it."));
        assert_eq!(
            manager.get_by_roll("R1").unwrap(),
            Student::new("R1", "Asha", 85.0, "B")
        );
    }

    #[test]
    fn test_delete_requires_yes() {
        let mut manager = create_test_manager();
        manager.add(&Student::new("R1", "Asha", 70.0, "B"));

        let out = run(&mut manager, "5\nR1\nno\n");
        assert!(out.contains("Delete cancelled."));
        assert!(manager.get_by_roll("R1").is_some());

        run(&mut manager, "5\nR1\nYES\n0\n");
        assert!(manager.get_by_roll("R1").is_none());
    }

    #[test]
    fn test_view_by_roll() {
        let mut manager = create_test_manager();
        manager.add(&Student::new("R1", "Asha", 70.0, "B"));

        let out = run(&mut manager, "3\nR1\n3\nR9\n0\n");

        assert!(out.contains("Asha"));
        assert!(out.contains("Not found."));
    }

    #[test]
    fn test_backup_uses_default_path() {
        let dir = TempDir::new().unwrap();
        let default = dir.path().join("students_backup.csv");
        let mut manager = create_test_manager();
        manager.add(&Student::new("R1", "Asha", 70.0, "B"));

        run_menu(&mut manager, "6\n\n0\n".as_bytes(), &default).unwrap();

        let content = std::fs::read_to_string(&default).unwrap();
        assert!(content.starts_with("roll_no,name,marks,grade"));
        assert!(content.contains("R1,Asha,70.0,B"));
    }
}
