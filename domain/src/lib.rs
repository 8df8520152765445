//! Domain layer for victor-devops
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns: nothing
//! here spawns a process, reads a file, or looks at the environment.
//!
//! # Core Concepts
//!
//! ## Tool Catalog
//!
//! The host agent framework sees a fixed set of named tools. Each call names
//! exactly one of them; there is no aliasing or fuzzy matching.
//!
//! ## Two Execution Kinds
//!
//! - **Process tools** turn a call into a [`CommandLine`] for an existing CLI
//!   (`docker`, `kubectl`, `terraform`)
//! - **Template tools** turn a call into a [`WorkflowSpec`] that an adapter
//!   renders into a document
//!
//! ## Configuration Resolution
//!
//! Per-call override > configured value > hard default, see
//! [`DevOpsConfig::resolve`].

pub mod config;
pub mod devops;
pub mod tool;

// Re-export commonly used types
pub use config::{
    ConfigKeyInfo, ConfigOverrides, ContainerRuntime, DevOpsConfig, OutputFormat,
    ResolvedConfig, Scope, known_keys, lookup_key,
};
pub use devops::{
    CommandBuilder, DOCKER_BUILD, DOCKER_RUN, GITHUB_WORKFLOW, K8S_APPLY, TERRAFORM_APPLY,
    TERRAFORM_PLAN,
    command::CommandLine,
    default_catalog,
    github::{Language, Trigger, WorkflowSpec},
    overrides_from_call,
    safety::{SafetyFinding, SafetyLevel, SafetyScanner},
};
pub use tool::{
    DefaultToolValidator, InvocationResult, InvocationState, ParamType, RiskLevel, ToolCall,
    ToolCatalog, ToolDefinition, ToolError, ToolKind, ToolParameter, ToolResponse, ToolValidator,
};
