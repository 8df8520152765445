//! Tool domain traits
//!
//! Contains pure domain logic traits for tool validation.
//! The async command execution port is defined in the application layer.

use super::entities::{ToolCall, ToolDefinition, ToolKind};
use super::value_objects::ToolError;

/// Validator for tool calls
///
/// This is a pure domain trait that validates tool calls
/// against their definitions without any I/O operations.
pub trait ToolValidator {
    /// Validate a tool call against its definition
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), ToolError>;
}

/// Default implementation of ToolValidator
///
/// Parameters are checked in declaration order and the first mismatch wins,
/// so the reported parameter is deterministic.
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), ToolError> {
        for param in &definition.parameters {
            let Some(value) = call.arguments.get(&param.name) else {
                if param.required {
                    return Err(ToolError::invalid_argument(
                        &param.name,
                        format!("required by '{}'", definition.name),
                    ));
                }
                continue;
            };

            // An explicit null is the same as leaving an optional parameter out
            if value.is_null() && !param.required {
                continue;
            }

            if !param.param_type.accepts(value) {
                return Err(ToolError::invalid_argument(
                    &param.name,
                    format!("expected {}, got {}", param.param_type, json_type_name(value)),
                ));
            }

            if param.required && value.as_str().is_some_and(|s| s.trim().is_empty()) {
                return Err(ToolError::invalid_argument(&param.name, "must not be empty"));
            }

            if let (Some(allowed), Some(text)) = (&param.allowed_values, value.as_str())
                && !allowed.iter().any(|a| a == text)
            {
                return Err(ToolError::invalid_argument(
                    &param.name,
                    format!("'{}' is not one of: {}", text, allowed.join(", ")),
                ));
            }

            // A leading dash would be parsed as a flag by the external CLI
            if definition.kind == ToolKind::SpawnProcess
                && !param.allows_leading_dash
                && let Some(text) = leading_dash(value)
            {
                return Err(ToolError::invalid_argument(
                    &param.name,
                    format!("'{}' must not start with '-'", text),
                ));
            }
        }

        let mut unknown: Vec<&String> = call
            .arguments
            .keys()
            .filter(|name| definition.parameter(name).is_none())
            .collect();
        unknown.sort();
        if let Some(name) = unknown.first() {
            return Err(ToolError::invalid_argument(
                name.as_str(),
                format!("unknown parameter for '{}'", definition.name),
            ));
        }

        Ok(())
    }
}

/// The first string, list item or map key that starts with `-`
fn leading_dash(value: &serde_json::Value) -> Option<&str> {
    let is_flag = |s: &&str| s.starts_with('-');
    match value {
        serde_json::Value::String(s) => Some(s.as_str()).filter(is_flag),
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(serde_json::Value::as_str)
            .find(is_flag),
        serde_json::Value::Object(map) => map.keys().map(String::as_str).find(is_flag),
        _ => None,
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::entities::{ParamType, RiskLevel, ToolKind, ToolParameter};
    use serde_json::json;

    fn definition() -> ToolDefinition {
        ToolDefinition::new("test", "test tool", ToolKind::SpawnProcess, RiskLevel::Low)
            .with_parameter(ToolParameter::new("dir", "Directory", true).with_type(ParamType::Path))
            .with_parameter(ToolParameter::new("tag", "Tag", true))
            .with_parameter(
                ToolParameter::new("mode", "Mode", false).with_allowed_values(&["client", "server"]),
            )
            .with_parameter(ToolParameter::new("force", "Force", false).with_type(ParamType::Boolean))
    }

    #[test]
    fn test_validator_missing_required() {
        let call = ToolCall::new("test").with_arg("tag", "v1");
        let err = DefaultToolValidator.validate(&call, &definition()).unwrap_err();
        assert_eq!(err.parameter(), Some("dir"));
        assert_eq!(err.code(), "INVALID_ARGUMENT");
    }

    #[test]
    fn test_validator_reports_first_missing_in_declaration_order() {
        let call = ToolCall::new("test");
        let err = DefaultToolValidator.validate(&call, &definition()).unwrap_err();
        assert_eq!(err.parameter(), Some("dir"));
    }

    #[test]
    fn test_validator_empty_required() {
        let call = ToolCall::new("test").with_arg("dir", "  ").with_arg("tag", "v1");
        let err = DefaultToolValidator.validate(&call, &definition()).unwrap_err();
        assert_eq!(err.parameter(), Some("dir"));
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_validator_wrong_type() {
        let call = ToolCall::new("test")
            .with_arg("dir", ".")
            .with_arg("tag", "v1")
            .with_arg("force", "yes");
        let err = DefaultToolValidator.validate(&call, &definition()).unwrap_err();
        assert_eq!(err.parameter(), Some("force"));
        assert!(err.to_string().contains("expected boolean, got string"));
    }

    #[test]
    fn test_validator_allowed_values() {
        let call = ToolCall::new("test")
            .with_arg("dir", ".")
            .with_arg("tag", "v1")
            .with_arg("mode", "cluster");
        let err = DefaultToolValidator.validate(&call, &definition()).unwrap_err();
        assert_eq!(err.parameter(), Some("mode"));
    }

    #[test]
    fn test_validator_unknown_param() {
        let call = ToolCall::new("test")
            .with_arg("dir", ".")
            .with_arg("tag", "v1")
            .with_arg("zeta", 1)
            .with_arg("alpha", 1);
        let err = DefaultToolValidator.validate(&call, &definition()).unwrap_err();
        assert_eq!(err.parameter(), Some("alpha"));
        assert!(err.to_string().contains("unknown parameter"));
    }

    #[test]
    fn test_validator_null_optional_is_ignored() {
        let call = ToolCall::new("test")
            .with_arg("dir", ".")
            .with_arg("tag", "v1")
            .with_arg("force", json!(null));
        assert!(DefaultToolValidator.validate(&call, &definition()).is_ok());
    }

    #[test]
    fn test_validator_rejects_leading_dash() {
        let call = ToolCall::new("test").with_arg("dir", "-destroy").with_arg("tag", "v1");
        let err = DefaultToolValidator.validate(&call, &definition()).unwrap_err();
        assert_eq!(err.parameter(), Some("dir"));
        assert!(err.to_string().contains("'-destroy' must not start with '-'"));

        let call = ToolCall::new("test").with_arg("dir", ".").with_arg("tag", "--privileged");
        let err = DefaultToolValidator.validate(&call, &definition()).unwrap_err();
        assert_eq!(err.parameter(), Some("tag"));
    }

    #[test]
    fn test_validator_rejects_leading_dash_in_lists_and_maps() {
        let definition = definition()
            .with_parameter(ToolParameter::new("ports", "Ports", false).with_type(ParamType::StringList))
            .with_parameter(ToolParameter::new("env", "Env", false).with_type(ParamType::StringMap));

        let call = ToolCall::new("test")
            .with_arg("dir", ".")
            .with_arg("tag", "v1")
            .with_arg("ports", json!(["8080:80", "--privileged"]));
        let err = DefaultToolValidator.validate(&call, &definition).unwrap_err();
        assert_eq!(err.parameter(), Some("ports"));

        let call = ToolCall::new("test")
            .with_arg("dir", ".")
            .with_arg("tag", "v1")
            .with_arg("env", json!({"--net": "host"}));
        let err = DefaultToolValidator.validate(&call, &definition).unwrap_err();
        assert_eq!(err.parameter(), Some("env"));

        // Map values follow `KEY=` in the same argument
        let call = ToolCall::new("test")
            .with_arg("dir", ".")
            .with_arg("tag", "v1")
            .with_arg("env", json!({"OFFSET": "-1"}));
        assert!(DefaultToolValidator.validate(&call, &definition).is_ok());
    }

    #[test]
    fn test_validator_leading_dash_allowed() {
        let definition = definition().with_parameter(
            ToolParameter::new("command", "Command", false)
                .with_type(ParamType::StringList)
                .allow_leading_dash(),
        );
        let call = ToolCall::new("test")
            .with_arg("dir", ".")
            .with_arg("tag", "v1")
            .with_arg("command", json!(["nginx", "-g", "daemon off;"]));
        assert!(DefaultToolValidator.validate(&call, &definition).is_ok());

        let rendered = ToolDefinition::new("doc", "doc tool", ToolKind::RenderTemplate, RiskLevel::Low)
            .with_parameter(ToolParameter::new("name", "Name", false));
        let call = ToolCall::new("doc").with_arg("name", "-nightly");
        assert!(DefaultToolValidator.validate(&call, &rendered).is_ok());
    }

    #[test]
    fn test_validator_valid_call() {
        let call = ToolCall::new("test")
            .with_arg("dir", "./infra")
            .with_arg("tag", "v1")
            .with_arg("mode", "client")
            .with_arg("force", true);
        assert!(DefaultToolValidator.validate(&call, &definition()).is_ok());
    }
}
