//! User settings for Gradebook
//!
//! Manages where the student database lives, the default backup file, and
//! whether mutations are written to the audit log.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::paths::GradebookPaths;
use crate::error::GradebookError;
use crate::storage::DatabaseConfig;

/// Connection settings for the student database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Database file; defaults to `data/students.db` under the base directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// How long a statement waits on a locked database
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: None,
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

/// User settings for Gradebook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Student database connection
    #[serde(default)]
    pub database: DatabaseSettings,

    /// Default CSV file for backup and restore
    #[serde(default = "default_backup_file")]
    pub backup_file: PathBuf,

    /// Whether successful mutations are appended to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_busy_timeout_ms() -> u64 {
    5_000
}

fn default_backup_file() -> PathBuf {
    PathBuf::from("students_backup.csv")
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            database: DatabaseSettings::default(),
            backup_file: default_backup_file(),
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &GradebookPaths) -> Result<Self, GradebookError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                GradebookError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                GradebookError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &GradebookPaths) -> Result<(), GradebookError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            GradebookError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            GradebookError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Resolve the database file, falling back to the default location
    pub fn database_path(&self, paths: &GradebookPaths) -> PathBuf {
        self.database
            .path
            .clone()
            .unwrap_or_else(|| paths.database_file())
    }

    /// Build the explicit connection configuration handed to the gateway
    pub fn database_config(&self, paths: &GradebookPaths) -> DatabaseConfig {
        DatabaseConfig::file(self.database_path(paths))
            .with_busy_timeout(Duration::from_millis(self.database.busy_timeout_ms))
    }
}
