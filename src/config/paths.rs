//! Path management for Gradebook
//!
//! Resolves where the settings file, the student database, and the audit log
//! live.
//!
//! ## Path Resolution Order
//!
//! 1. `GRADEBOOK_CLI_DATA_DIR` environment variable (if set)
//! 2. The platform config directory for `gradebook-cli`
//!    (`~/.config/gradebook-cli` on Linux, `%APPDATA%\gradebook-cli` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::GradebookError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "GRADEBOOK_CLI_DATA_DIR";

/// Manages all paths used by Gradebook
#[derive(Debug, Clone)]
pub struct GradebookPaths {
    /// Base directory for all Gradebook data
    base_dir: PathBuf,
}

impl GradebookPaths {
    /// Create a new GradebookPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no platform config directory can be determined.
    pub fn new() -> Result<Self, GradebookError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create GradebookPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (holds the SQLite database)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the default student database
    pub fn database_file(&self) -> PathBuf {
        self.data_dir().join("students.db")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), GradebookError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| GradebookError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| GradebookError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if Gradebook has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, GradebookError> {
    ProjectDirs::from("", "", "gradebook-cli")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| GradebookError::Config("Could not determine config directory".into()))
}
