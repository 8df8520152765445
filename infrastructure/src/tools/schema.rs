//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`] that produces provider-neutral
//! JSON Schema for presenting the catalog to a function-calling host.

use devops_application::ports::tool_schema::ToolSchemaPort;
use devops_domain::{ParamType, ToolCatalog, ToolDefinition};
use serde_json::{Map, Value, json};

/// Default implementation producing provider-neutral JSON Schema.
///
/// | ParamType | JSON Schema |
/// |-----------|-------------|
/// | `String`, `Path` | `string` |
/// | `Integer` | `integer` |
/// | `Boolean` | `boolean` |
/// | `StringList` | `array` of `string` |
/// | `StringMap` | `object` with scalar values |
///
/// `allowed_values` become `enum`; risk and kind are exposed as `x-` fields.
pub struct JsonSchemaToolConverter;

fn param_schema(param_type: ParamType) -> Map<String, Value> {
    let value = match param_type {
        ParamType::String | ParamType::Path => json!({"type": "string"}),
        ParamType::Integer => json!({"type": "integer"}),
        ParamType::Boolean => json!({"type": "boolean"}),
        ParamType::StringList => json!({"type": "array", "items": {"type": "string"}}),
        ParamType::StringMap => json!({
            "type": "object",
            "additionalProperties": {"type": ["string", "number", "boolean"]}
        }),
    };
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in &tool.parameters {
            let mut prop = param_schema(param.param_type);
            prop.insert("description".to_string(), json!(param.description));
            if let Some(allowed) = &param.allowed_values {
                prop.insert("enum".to_string(), json!(allowed));
            }
            properties.insert(param.name.clone(), Value::Object(prop));

            if param.required {
                required.push(json!(param.name));
            }
        }

        json!({
            "name": tool.name,
            "description": tool.description,
            "x-risk-level": tool.risk_level.as_str(),
            "x-kind": tool.kind.as_str(),
            "input_schema": {
                "type": "object",
                "properties": properties,
                "required": required,
                "additionalProperties": false,
            }
        })
    }

    fn all_tools_schema(&self, catalog: &ToolCatalog) -> Vec<Value> {
        catalog.list().iter().map(|t| self.tool_to_schema(t)).collect()
    }

    fn low_risk_tools_schema(&self, catalog: &ToolCatalog) -> Vec<Value> {
        catalog
            .list()
            .iter()
            .filter(|t| !t.is_high_risk())
            .map(|t| self.tool_to_schema(t))
            .collect()
    }
}
