use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use gradebook::audit::AuditLogger;
use gradebook::cli::run_menu;
use gradebook::config::{paths::GradebookPaths, settings::Settings};
use gradebook::services::StudentManager;
use gradebook::storage::Database;

#[derive(Parser)]
#[command(
    name = "gradebook",
    version,
    about = "Interactive student records and marks statistics",
    long_about = "Gradebook keeps student records (roll number, name, marks, grade) \
                  in a local SQLite database. It runs an interactive menu for adding, \
                  viewing, updating, and deleting students, backing up to and \
                  restoring from CSV, and summarising marks."
)]
struct Cli {
    /// Directory holding settings, the database, and the audit log
    #[arg(long, env = "GRADEBOOK_CLI_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Database file to use instead of the configured one
    #[arg(long, env = "GRADEBOOK_DATABASE")]
    database: Option<PathBuf>,

    /// Default CSV file offered for backup and restore
    #[arg(long, env = "GRADEBOOK_BACKUP_FILE")]
    backup_file: Option<PathBuf>,

    /// Don't write the audit log for this session
    #[arg(long)]
    no_audit: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = match cli.data_dir {
        Some(dir) => GradebookPaths::with_base_dir(dir),
        None => GradebookPaths::new()?,
    };
    paths.ensure_directories()?;
    let mut settings = Settings::load_or_create(&paths)?;
    if !paths.is_initialized() {
        settings.save(&paths)?;
    }

    // Command-line overrides apply to this session only
    if let Some(database) = cli.database {
        settings.database.path = Some(database);
    }
    if let Some(backup_file) = cli.backup_file {
        settings.backup_file = backup_file;
    }
    if cli.no_audit {
        settings.audit_enabled = false;
    }

    let mut db = Database::new(settings.database_config(&paths));
    if !db.connect() {
        eprintln!("Cannot continue without database. Check the database path and permissions.");
        return Ok(ExitCode::from(1));
    }

    let mut manager = StudentManager::new(db, io::stdout());
    if settings.audit_enabled {
        manager = manager.with_audit(AuditLogger::new(paths.audit_log()));
    }

    let result = run_menu(&mut manager, io::stdin().lock(), &settings.backup_file);
    manager.close();
    result?;

    Ok(ExitCode::SUCCESS)
}
