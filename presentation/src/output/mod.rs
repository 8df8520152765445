//! Output formatting for the command line

pub mod console;
pub mod formatter;
pub mod json;
