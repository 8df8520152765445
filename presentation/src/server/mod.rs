//! Host-facing tool server

mod json_lines;

pub use json_lines::{JsonLineServer, ServeStats};
