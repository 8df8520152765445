//! Turning `--arg KEY=VALUE` and `--args-json` into a [`ToolCall`]
//!
//! Raw values are coerced with the declared [`ParamType`] of the parameter
//! when the tool and parameter are known. Anything else is passed through as
//! a string so the dispatcher reports the problem with its usual error codes.
//!
//! [`ParamType`]: devops_domain::ParamType

use devops_domain::{ToolCall, ToolCatalog};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    #[error("expected KEY=VALUE, got '{0}'")]
    MissingEquals(String),

    #[error("empty argument name in '{0}'")]
    EmptyKey(String),

    #[error("--arg {key}: {reason}")]
    Coercion { key: String, reason: String },

    #[error("--args-json: {0}")]
    InvalidJson(String),

    #[error("--args-json must be a JSON object")]
    NotAnObject,
}

/// Build the call for `tool` from command-line arguments.
pub fn build_tool_call(
    catalog: &ToolCatalog,
    tool: &str,
    args: &[String],
    args_json: Option<&str>,
) -> Result<ToolCall, ArgumentError> {
    let mut call = ToolCall::new(tool);

    if let Some(raw) = args_json {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| ArgumentError::InvalidJson(e.to_string()))?;
        let Value::Object(map) = value else {
            return Err(ArgumentError::NotAnObject);
        };
        call.arguments.extend(map);
    }

    let definition = catalog.lookup(tool).ok();
    for arg in args {
        let (key, raw) = arg
            .split_once('=')
            .ok_or_else(|| ArgumentError::MissingEquals(arg.clone()))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ArgumentError::EmptyKey(arg.clone()));
        }

        let value = match definition.and_then(|d| d.parameter(key)) {
            Some(param) => param
                .param_type
                .coerce(raw)
                .map_err(|reason| ArgumentError::Coercion {
                    key: key.to_string(),
                    reason,
                })?,
            None => Value::String(raw.to_string()),
        };
        call.arguments.insert(key.to_string(), value);
    }

    Ok(call)
}

#[cfg(test)]
mod tests {
    use super::*;
    use devops_domain::default_catalog;
    use serde_json::json;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_typed_coercion() {
        let catalog = default_catalog().unwrap();
        let call = build_tool_call(
            &catalog,
            "docker_run",
            &args(&["image=nginx:1.27", "ports=8080:80,8443:443", "env=A=1,B=2", "detach=yes"]),
            None,
        )
        .unwrap();

        assert_eq!(call.tool_name, "docker_run");
        assert_eq!(call.arguments["image"], json!("nginx:1.27"));
        assert_eq!(call.arguments["ports"], json!(["8080:80", "8443:443"]));
        assert_eq!(call.arguments["env"], json!({"A": "1", "B": "2"}));
        assert_eq!(call.arguments["detach"], json!(true));
    }

    #[test]
    fn test_value_may_contain_equals() {
        let catalog = default_catalog().unwrap();
        let call = build_tool_call(
            &catalog,
            "docker_build",
            &args(&["path=./app", "tag=app:v1", "build_args=VERSION=1.2"]),
            None,
        )
        .unwrap();
        assert_eq!(call.arguments["build_args"], json!({"VERSION": "1.2"}));
    }

    #[test]
    fn test_args_override_json() {
        let catalog = default_catalog().unwrap();
        let call = build_tool_call(
            &catalog,
            "k8s_apply",
            &args(&["namespace=qa"]),
            Some(r#"{"manifest": "deploy.yaml", "namespace": "staging"}"#),
        )
        .unwrap();
        assert_eq!(call.arguments["manifest"], json!("deploy.yaml"));
        assert_eq!(call.arguments["namespace"], json!("qa"));
    }

    #[test]
    fn test_unknown_tool_passes_strings_through() {
        let catalog = default_catalog().unwrap();
        let call = build_tool_call(&catalog, "helm_install", &args(&["chart=x"]), None).unwrap();
        assert_eq!(call.arguments["chart"], json!("x"));
    }

    #[test]
    fn test_errors() {
        let catalog = default_catalog().unwrap();
        assert_eq!(
            build_tool_call(&catalog, "docker_build", &args(&["path"]), None).unwrap_err(),
            ArgumentError::MissingEquals("path".to_string())
        );
        assert_eq!(
            build_tool_call(&catalog, "docker_build", &args(&["=x"]), None).unwrap_err(),
            ArgumentError::EmptyKey("=x".to_string())
        );
        assert!(matches!(
            build_tool_call(&catalog, "docker_run", &args(&["detach=maybe"]), None).unwrap_err(),
            ArgumentError::Coercion { key, .. } if key == "detach"
        ));
        assert_eq!(
            build_tool_call(&catalog, "docker_run", &[], Some("[1]")).unwrap_err(),
            ArgumentError::NotAnObject
        );
        assert!(matches!(
            build_tool_call(&catalog, "docker_run", &[], Some("{")).unwrap_err(),
            ArgumentError::InvalidJson(_)
        ));
    }
}
