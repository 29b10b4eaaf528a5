//! Interactive command-line front end
//!
//! The menu loop and the prompts it reads answers with. Argument parsing
//! lives in the binary; this module only drives the manager.

pub mod menu;
pub mod prompt;

pub use menu::run_menu;
pub use prompt::Prompt;
