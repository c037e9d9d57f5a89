//! Presentation layer for llmdesk
//!
//! This crate contains the CLI definition, console formatting,
//! and the session progress spinner.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat, ThemeChoice};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::SessionSpinner;
