//! Interactive menu integration tests.
//!
//! Each test drives the binary through stdin against its own data directory.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn gradebook(data_dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("gradebook");
    cmd.env("GRADEBOOK_CLI_DATA_DIR", data_dir.path())
        .env_remove("GRADEBOOK_DATABASE")
        .env_remove("GRADEBOOK_BACKUP_FILE");
    cmd
}

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    gradebook(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--data-dir"))
        .stdout(predicate::str::contains("--database"))
        .stdout(predicate::str::contains("--no-audit"));
}

#[test]
fn test_add_view_exit() {
    let dir = TempDir::new().unwrap();
    gradebook(&dir)
        .write_stdin("1\nR1\nAsha\n91.5\nA\n2\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Student added."))
        .stdout(predicate::str::contains("Asha"))
        .stdout(predicate::str::contains("Exiting..."));

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").join("students.db").exists());
    assert!(dir.path().join("audit.log").exists());
}

#[test]
fn test_records_persist_between_sessions() {
    let dir = TempDir::new().unwrap();
    gradebook(&dir)
        .write_stdin("1\nR1\nAsha\n91.5\nA\n0\n")
        .assert()
        .success();

    gradebook(&dir)
        .write_stdin("3\nR1\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Asha"))
        .stdout(predicate::str::contains("Not found.").not());
}

#[test]
fn test_end_of_input_exits_cleanly() {
    let dir = TempDir::new().unwrap();
    gradebook(&dir)
        .write_stdin("2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No students found."))
        .stdout(predicate::str::contains("Exiting..."));
}

#[test]
fn test_input_errors_keep_the_loop_running() {
    let dir = TempDir::new().unwrap();
    gradebook(&dir)
        .write_stdin("1\nR1\nAsha\n101\nx\n8\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Input error: Marks must be between 0 and 100"))
        .stdout(predicate::str::contains("Invalid choice."))
        .stdout(predicate::str::contains("No data to compute stats."));
}

#[test]
fn test_backup_and_restore() {
    let dir = TempDir::new().unwrap();
    let csv = dir.path().join("export.csv");
    let csv = csv.to_str().unwrap();

    gradebook(&dir)
        .write_stdin(format!(
            "1\nR1\nAsha\n91.5\nA\n1\nR2\nBen\n40\nD\n6\n{csv}\n5\nR1\nyes\n7\n{csv}\n0\n"
        ))
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup saved to"))
        .stdout(predicate::str::contains(
            "Restore complete. (1 inserted, 1 updated, 0 failed)",
        ));

    let content = std::fs::read_to_string(csv).unwrap();
    assert!(content.starts_with("roll_no,name,marks,grade"));
}

#[test]
fn test_no_audit_flag() {
    let dir = TempDir::new().unwrap();
    gradebook(&dir)
        .arg("--no-audit")
        .write_stdin("1\nR1\nAsha\n91.5\nA\n0\n")
        .assert()
        .success();

    assert!(!dir.path().join("audit.log").exists());
}

#[test]
fn test_unreachable_database_exits_with_failure() {
    let dir = TempDir::new().unwrap();
    let not_a_file = TempDir::new().unwrap();

    gradebook(&dir)
        .arg("--database")
        .arg(not_a_file.path())
        .write_stdin("0\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Cannot continue without database"));
}
