//! Tool domain entities

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Risk level of a tool operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Low risk - read-only or local generation (e.g., terraform_plan, github_workflow)
    Low,
    /// High risk - operations that change images, clusters or infrastructure
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::High => "high",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a tool produces its result.
///
/// The set is closed: every tool either spawns exactly one external process
/// or renders exactly one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    /// Build an argument vector and run an external CLI
    SpawnProcess,
    /// Render a document from a template, no process spawned
    RenderTemplate,
}

impl ToolKind {
    pub fn as_str(&self) -> &str {
        match self {
            ToolKind::SpawnProcess => "spawn_process",
            ToolKind::RenderTemplate => "render_template",
        }
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Expected type of a tool parameter value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    String,
    /// A filesystem path (a string on the wire)
    Path,
    Integer,
    Boolean,
    /// Array of strings
    StringList,
    /// Object whose values are scalars (rendered as strings)
    StringMap,
}

impl ParamType {
    pub fn as_str(&self) -> &str {
        match self {
            ParamType::String => "string",
            ParamType::Path => "path",
            ParamType::Integer => "integer",
            ParamType::Boolean => "boolean",
            ParamType::StringList => "string_list",
            ParamType::StringMap => "string_map",
        }
    }

    /// Check whether a JSON value conforms to this type.
    pub fn accepts(&self, value: &serde_json::Value) -> bool {
        use serde_json::Value;
        match self {
            ParamType::String | ParamType::Path => value.is_string(),
            ParamType::Integer => value.as_i64().is_some(),
            ParamType::Boolean => value.is_boolean(),
            ParamType::StringList => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
            ParamType::StringMap => value.as_object().is_some_and(|map| {
                map.values()
                    .all(|v| v.is_string() || v.is_number() || v.is_boolean())
            }),
        }
    }

    /// Convert a raw command-line string into a JSON value of this type.
    ///
    /// Lists are comma separated (`8080:80,443:443`), maps are comma
    /// separated `KEY=VALUE` pairs.
    pub fn coerce(&self, raw: &str) -> Result<serde_json::Value, String> {
        use serde_json::Value;
        match self {
            ParamType::String | ParamType::Path => Ok(Value::String(raw.to_string())),
            ParamType::Integer => raw
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| format!("expected an integer, got '{}'", raw)),
            ParamType::Boolean => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Ok(Value::Bool(true)),
                "false" | "no" | "0" => Ok(Value::Bool(false)),
                _ => Err(format!("expected a boolean, got '{}'", raw)),
            },
            ParamType::StringList => Ok(Value::Array(
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| Value::String(s.to_string()))
                    .collect(),
            )),
            ParamType::StringMap => {
                let mut map = serde_json::Map::new();
                for pair in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                    let (key, value) = pair
                        .split_once('=')
                        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", pair))?;
                    map.insert(key.trim().to_string(), Value::String(value.to_string()));
                }
                Ok(Value::Object(map))
            }
        }
    }
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Definition of a tool exposed to the host framework
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "docker_build")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Execution strategy
    pub kind: ToolKind,
    /// Risk level of this tool
    pub risk_level: RiskLevel,
    /// Parameter specifications, in declaration order
    pub parameters: Vec<ToolParameter>,
}

/// Parameter specification for a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Parameter name
    pub name: String,
    /// Parameter description
    pub description: String,
    /// Whether this parameter is required
    pub required: bool,
    /// Expected value type
    pub param_type: ParamType,
    /// Closed set of accepted values (string parameters only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<String>>,
    /// Values may begin with `-`. Only for arguments handed to a program
    /// inside the container, never for a slot the external CLI parses.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub allows_leading_dash: bool,
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        kind: ToolKind,
        risk_level: RiskLevel,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
            risk_level,
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&ToolParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn required_parameters(&self) -> impl Iterator<Item = &ToolParameter> {
        self.parameters.iter().filter(|p| p.required)
    }

    pub fn is_high_risk(&self) -> bool {
        matches!(self.risk_level, RiskLevel::High)
    }
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: ParamType::String,
            allowed_values: None,
            allows_leading_dash: false,
        }
    }

    pub fn with_type(mut self, param_type: ParamType) -> Self {
        self.param_type = param_type;
        self
    }

    pub fn with_allowed_values(mut self, values: &[&str]) -> Self {
        self.allowed_values = Some(values.iter().map(|v| v.to_string()).collect());
        self
    }

    pub fn allow_leading_dash(mut self) -> Self {
        self.allows_leading_dash = true;
        self
    }
}

/// A call to a tool with arguments (the invocation request)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to call
    pub tool_name: String,
    /// Arguments passed to the tool
    #[serde(default)]
    pub arguments: HashMap<String, serde_json::Value>,
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments: HashMap::new(),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// Get a string argument
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }

    /// Get a string argument, treating blank strings as absent
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get_string(key).filter(|s| !s.trim().is_empty())
    }

    /// Get a required string argument or return an error message
    pub fn require_string(&self, key: &str) -> Result<&str, String> {
        self.get_non_empty(key)
            .ok_or_else(|| format!("Missing required argument: {}", key))
    }

    /// Get an optional i64 argument
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.arguments.get(key).and_then(|v| v.as_i64())
    }

    /// Get an optional bool argument
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.arguments.get(key).and_then(|v| v.as_bool())
    }

    /// Get a list-of-strings argument (empty when absent)
    pub fn get_string_list(&self, key: &str) -> Vec<String> {
        self.arguments
            .get(key)
            .and_then(|v| v.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get a map argument with scalar values rendered as strings.
    ///
    /// Keys come back sorted so argument vectors are deterministic.
    pub fn get_string_map(&self, key: &str) -> BTreeMap<String, String> {
        let Some(map) = self.arguments.get(key).and_then(|v| v.as_object()) else {
            return BTreeMap::new();
        };
        map.iter()
            .map(|(k, v)| {
                let rendered = match v {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), rendered)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_definition() {
        let tool = ToolDefinition::new(
            "docker_build",
            "Build an image",
            ToolKind::SpawnProcess,
            RiskLevel::High,
        )
        .with_parameter(ToolParameter::new("path", "Build context", true).with_type(ParamType::Path))
        .with_parameter(ToolParameter::new("no_cache", "Disable cache", false).with_type(ParamType::Boolean));

        assert_eq!(tool.name, "docker_build");
        assert!(tool.is_high_risk());
        assert_eq!(tool.parameters.len(), 2);
        assert_eq!(tool.required_parameters().count(), 1);
        assert_eq!(tool.parameter("no_cache").unwrap().param_type, ParamType::Boolean);
        assert!(tool.parameter("missing").is_none());
    }

    #[test]
    fn test_param_type_accepts() {
        assert!(ParamType::String.accepts(&json!("x")));
        assert!(!ParamType::String.accepts(&json!(1)));
        assert!(ParamType::Integer.accepts(&json!(8080)));
        assert!(!ParamType::Integer.accepts(&json!(1.5)));
        assert!(ParamType::Boolean.accepts(&json!(true)));
        assert!(!ParamType::Boolean.accepts(&json!("true")));
        assert!(ParamType::StringList.accepts(&json!(["a", "b"])));
        assert!(!ParamType::StringList.accepts(&json!(["a", 1])));
        assert!(ParamType::StringMap.accepts(&json!({"A": "1", "B": 2, "C": false})));
        assert!(!ParamType::StringMap.accepts(&json!({"A": {"nested": true}})));
    }

    #[test]
    fn test_param_type_coerce() {
        assert_eq!(ParamType::Boolean.coerce("yes").unwrap(), json!(true));
        assert!(ParamType::Boolean.coerce("maybe").is_err());
        assert_eq!(ParamType::Integer.coerce(" 42 ").unwrap(), json!(42));
        assert_eq!(
            ParamType::StringList.coerce("8080:80, 443:443").unwrap(),
            json!(["8080:80", "443:443"])
        );
        assert_eq!(
            ParamType::StringMap.coerce("A=1,B=x=y").unwrap(),
            json!({"A": "1", "B": "x=y"})
        );
        assert!(ParamType::StringMap.coerce("novalue").is_err());
        // Strings are never reinterpreted
        assert_eq!(ParamType::String.coerce("1").unwrap(), json!("1"));
    }

    #[test]
    fn test_tool_call_accessors() {
        let call = ToolCall::new("docker_run")
            .with_arg("image", "nginx:1.27")
            .with_arg("name", "  ")
            .with_arg("detach", false)
            .with_arg("ports", json!(["8080:80"]))
            .with_arg("env", json!({"B": "2", "A": 1}));

        assert_eq!(call.get_string("image"), Some("nginx:1.27"));
        assert_eq!(call.get_non_empty("name"), None);
        assert!(call.require_string("name").is_err());
        assert_eq!(call.get_bool("detach"), Some(false));
        assert_eq!(call.get_string_list("ports"), vec!["8080:80".to_string()]);
        assert!(call.get_string_list("missing").is_empty());

        let env: Vec<(String, String)> = call.get_string_map("env").into_iter().collect();
        assert_eq!(
            env,
            vec![
                ("A".to_string(), "1".to_string()),
                ("B".to_string(), "2".to_string())
            ]
        );
    }

    #[test]
    fn test_tool_call_deserializes_without_arguments() {
        let call: ToolCall = serde_json::from_str(r#"{"tool_name": "k8s_apply"}"#).unwrap();
        assert_eq!(call.tool_name, "k8s_apply");
        assert!(call.arguments.is_empty());
    }
}
