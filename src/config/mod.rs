//! Configuration module for Gradebook
//!
//! This module provides configuration management including:
//! - Base directory resolution
//! - User settings persistence
//! - The database connection configuration handed to the storage layer

pub mod paths;
pub mod settings;

pub use paths::GradebookPaths;
pub use settings::{DatabaseSettings, Settings};
