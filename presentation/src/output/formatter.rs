//! Output formatter trait

use devops_domain::{ToolCatalog, ToolResponse};
use serde_json::Value;

/// Trait for formatting command results
pub trait OutputFormatter {
    /// Format the outcome of one tool call
    fn format_response(&self, response: &ToolResponse) -> String;

    /// Format the catalog summary printed by `list`
    fn format_tools(&self, catalog: &ToolCatalog) -> String;

    /// Format JSON Schema documents printed by `list --schema`
    fn format_schemas(&self, schemas: &[Value]) -> String;
}
