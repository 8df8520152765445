//! Progress reporting while a tool call runs

pub mod reporter;
