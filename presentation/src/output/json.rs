//! JSON output formatter
//!
//! Prints the same [`ToolResponse`] document the host framework receives.

use crate::output::formatter::OutputFormatter;
use devops_domain::{ToolCatalog, ToolResponse};
use serde::Serialize;
use serde_json::Value;

pub struct JsonFormatter;

impl JsonFormatter {
    fn pretty<T: Serialize + ?Sized>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|e| {
            serde_json::json!({"status": "failed", "message": e.to_string()}).to_string()
        })
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_response(&self, response: &ToolResponse) -> String {
        Self::pretty(response)
    }

    fn format_tools(&self, catalog: &ToolCatalog) -> String {
        Self::pretty(catalog.list())
    }

    fn format_schemas(&self, schemas: &[Value]) -> String {
        Self::pretty(schemas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devops_domain::{InvocationResult, ToolError, default_catalog};

    #[test]
    fn test_completed_response_shape() {
        let result = InvocationResult::generated("github_workflow", "name: CI\n");
        let text = JsonFormatter.format_response(&ToolResponse::Completed { result });
        let value: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["status"], "completed");
        assert_eq!(value["result"]["generated_artifact"], "name: CI\n");
        assert_eq!(value["result"]["exit_code"], 0);
    }

    #[test]
    fn test_failed_response_shape() {
        let response = ToolResponse::from(Err(ToolError::unknown_tool("helm_install")));
        let value: Value = serde_json::from_str(&JsonFormatter.format_response(&response)).unwrap();

        assert_eq!(value["status"], "failed");
        assert_eq!(value["code"], "NOT_FOUND");
        assert_eq!(value["retryable"], true);
    }

    #[test]
    fn test_tools_list() {
        let catalog = default_catalog().unwrap();
        let value: Value = serde_json::from_str(&JsonFormatter.format_tools(&catalog)).unwrap();
        let tools = value.as_array().unwrap();
        assert_eq!(tools.len(), 6);
        assert_eq!(tools[0]["name"], "docker_build");
        assert_eq!(tools[0]["kind"], "spawn_process");
    }
}
