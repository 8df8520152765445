//! Tool domain module
//!
//! This module defines the core abstractions of the **Tool System**: the
//! catalog of tools exposed to the host agent framework, how a call is
//! validated, and what comes back.
//!
//! # Overview
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────────┐
//! │ ToolCatalog  │───▶│ ToolCall     │───▶│ InvocationResult │
//! │ (registry)   │    │ (request)    │    │   or ToolError   │
//! └──────┬───────┘    └──────────────┘    └──────────────────┘
//!        │
//!        └─ "docker_build" → ToolDefinition { kind: SpawnProcess, .. }
//! ```
//!
//! # Execution Kinds
//!
//! | Kind | Tools | Side effect |
//! |------|-------|-------------|
//! | `SpawnProcess` | `docker_build`, `docker_run`, `k8s_apply`, `terraform_plan`, `terraform_apply` | one external CLI process |
//! | `RenderTemplate` | `github_workflow` | none, returns the rendered document |
//!
//! # Key Types
//!
//! - [`ToolCatalog`]: ordered registry, exact-name lookup
//! - [`ToolDefinition`]: schema for a single tool (name, kind, params, risk)
//! - [`ToolCall`]: an invocation request with JSON arguments
//! - [`InvocationResult`] / [`ToolError`]: the two outcomes of a dispatch
//! - [`ToolValidator`]: pure parameter validation
//! - [`InvocationState`]: lifecycle of one dispatch

pub mod catalog;
pub mod entities;
pub mod state;
pub mod traits;
pub mod value_objects;

pub use catalog::ToolCatalog;
pub use entities::{ParamType, RiskLevel, ToolCall, ToolDefinition, ToolKind, ToolParameter};
pub use state::InvocationState;
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::{InvocationResult, ToolError, ToolResponse};
