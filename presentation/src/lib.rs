//! Presentation layer for victor-devops
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the JSON-lines tool server.

pub mod cli;
pub mod output;
pub mod progress;
pub mod server;

// Re-export commonly used types
pub use cli::arguments::{ArgumentError, build_tool_call};
pub use cli::commands::{Cli, Command, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use output::json::JsonFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
pub use server::{JsonLineServer, ServeStats};
