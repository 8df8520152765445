//! Tool catalog: the registry of tools exposed to the host framework.
//!
//! Built once at startup and read-only afterwards, so a single catalog can be
//! shared behind an `Arc` by any number of concurrent dispatches.

use super::entities::ToolDefinition;
use super::value_objects::ToolError;
use std::collections::HashMap;

/// Ordered set of tool definitions with lookup by exact name.
#[derive(Debug, Clone, Default)]
pub struct ToolCatalog {
    tools: Vec<ToolDefinition>,
    /// name → index into `tools`
    index: HashMap<String, usize>,
}

impl ToolCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool definition. Fails if the name is already taken.
    pub fn register(&mut self, definition: ToolDefinition) -> Result<(), ToolError> {
        if self.index.contains_key(&definition.name) {
            return Err(ToolError::DuplicateTool {
                name: definition.name,
            });
        }
        self.index.insert(definition.name.clone(), self.tools.len());
        self.tools.push(definition);
        Ok(())
    }

    /// Builder-style [`register`](Self::register)
    pub fn with_tool(mut self, definition: ToolDefinition) -> Result<Self, ToolError> {
        self.register(definition)?;
        Ok(self)
    }

    /// Look up a tool by exact name
    pub fn lookup(&self, name: &str) -> Result<&ToolDefinition, ToolError> {
        self.index
            .get(name)
            .map(|&i| &self.tools[i])
            .ok_or_else(|| ToolError::unknown_tool(name))
    }

    /// All tools in registration order
    pub fn list(&self) -> &[ToolDefinition] {
        &self.tools
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(|t| t.name.as_str())
    }

    pub fn high_risk_tools(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.iter().filter(|t| t.is_high_risk())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
