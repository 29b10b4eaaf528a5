//! Terminal User Interface module
//!
//! Full-screen views opened from the menu. The menu itself stays line
//! oriented; only the marks distribution chart takes over the screen.

pub mod chart;
pub mod terminal;

pub use chart::{render_distribution, DistributionView, TerminalChart};
pub use terminal::{init_terminal, restore_terminal, Tui};
