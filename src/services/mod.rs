//! Service layer for Gradebook
//!
//! The manager sits between the interactive menu and the storage, backup,
//! statistics, and chart modules.

pub mod manager;

pub use manager::StudentManager;
