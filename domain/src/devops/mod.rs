//! DevOps tools: definitions, argument-vector construction and the checks
//! around them.
//!
//! | Tool | Kind | Program |
//! |------|------|---------|
//! | `docker_build` | process | `docker`/`podman` |
//! | `docker_run` | process | `docker`/`podman` |
//! | `k8s_apply` | process | `kubectl` |
//! | `terraform_plan` | process | `terraform`/`tofu` |
//! | `terraform_apply` | process | `terraform`/`tofu` |
//! | `github_workflow` | template | none |

pub mod command;
pub mod docker;
pub mod github;
pub mod kubernetes;
pub mod redact;
pub mod safety;
pub mod terraform;

use crate::config::ConfigOverrides;
use crate::config::ResolvedConfig;
use crate::tool::{ToolCall, ToolCatalog, ToolDefinition, ToolError};
use command::CommandLine;

pub const DOCKER_BUILD: &str = "docker_build";
pub const DOCKER_RUN: &str = "docker_run";
pub const K8S_APPLY: &str = "k8s_apply";
pub const TERRAFORM_PLAN: &str = "terraform_plan";
pub const TERRAFORM_APPLY: &str = "terraform_apply";
pub const GITHUB_WORKFLOW: &str = "github_workflow";

/// Every tool definition, in catalog order
pub fn all_definitions() -> Vec<ToolDefinition> {
    vec![
        docker::docker_build_definition(),
        docker::docker_run_definition(),
        kubernetes::k8s_apply_definition(),
        terraform::terraform_plan_definition(),
        terraform::terraform_apply_definition(),
        github::github_workflow_definition(),
    ]
}

/// Catalog with all six DevOps tools
pub fn default_catalog() -> Result<ToolCatalog, ToolError> {
    let mut catalog = ToolCatalog::new();
    for definition in all_definitions() {
        catalog.register(definition)?;
    }
    Ok(catalog)
}

/// Per-call configuration overrides carried in the call's arguments.
///
/// `namespace`, `registry` and `cloud_provider` map onto the matching
/// configuration options; validation has already rejected them for tools
/// that do not declare them.
pub fn overrides_from_call(call: &ToolCall) -> ConfigOverrides {
    ConfigOverrides {
        cloud_provider: call.get_non_empty("cloud_provider").map(str::to_string),
        k8s_namespace: call.get_non_empty("namespace").map(str::to_string),
        docker_registry: call.get_non_empty("registry").map(str::to_string),
    }
}

/// Turns a validated process-tool call into the command to run.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandBuilder;

impl CommandBuilder {
    pub fn build(&self, call: &ToolCall, resolved: &ResolvedConfig) -> Result<CommandLine, ToolError> {
        match call.tool_name.as_str() {
            DOCKER_BUILD => docker::build_docker_build(call, resolved),
            DOCKER_RUN => docker::build_docker_run(call, resolved),
            K8S_APPLY => kubernetes::build_k8s_apply(call, resolved),
            TERRAFORM_PLAN => terraform::build_terraform_plan(call, resolved),
            TERRAFORM_APPLY => terraform::build_terraform_apply(call, resolved),
            other => Err(ToolError::unknown_tool(other)),
        }
    }
}

/// Non-blank string argument, or `InvalidArgument`
pub(crate) fn required<'a>(call: &'a ToolCall, name: &str) -> Result<&'a str, ToolError> {
    call.get_non_empty(name)
        .ok_or_else(|| ToolError::invalid_argument(name, format!("required by '{}'", call.tool_name)))
}
