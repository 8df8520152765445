//! Tool schema conversion port.
//!
//! Separates "which tools exist" (domain) from "how to present them to the
//! host framework" (infrastructure). The domain layer defines
//! [`ToolDefinition`] and [`ToolCatalog`]; this port handles the JSON Schema
//! conversion that function-calling hosts require.

use devops_domain::{ToolCatalog, ToolDefinition};

/// Port for converting tool definitions to JSON Schema.
pub trait ToolSchemaPort: Send + Sync {
    /// Convert a single tool definition to provider-neutral JSON Schema.
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value;

    /// Convert all tools to a JSON Schema array (catalog order).
    fn all_tools_schema(&self, catalog: &ToolCatalog) -> Vec<serde_json::Value>;

    /// Convert low-risk tools only to a JSON Schema array (catalog order).
    fn low_risk_tools_schema(&self, catalog: &ToolCatalog) -> Vec<serde_json::Value>;
}
