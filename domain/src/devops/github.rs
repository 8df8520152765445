//! `github_workflow`: the parameters of a GitHub Actions CI workflow.
//!
//! This module only turns a call into a [`WorkflowSpec`]; rendering the YAML
//! document belongs to a `WorkflowRenderer` adapter.

use super::GITHUB_WORKFLOW;
use super::docker::qualify_image;
use crate::config::ResolvedConfig;
use crate::tool::{ParamType, RiskLevel, ToolCall, ToolDefinition, ToolError, ToolKind, ToolParameter};
use serde::{Deserialize, Serialize};

/// Cron used by the `schedule` trigger (Mondays 06:00 UTC)
pub const DEFAULT_SCHEDULE: &str = "0 6 * * 1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Node,
    Python,
    Rust,
    Go,
    Java,
}

impl Language {
    pub const ALL: [&'static str; 5] = ["node", "python", "rust", "go", "java"];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "node" => Some(Self::Node),
            "python" => Some(Self::Python),
            "rust" => Some(Self::Rust),
            "go" => Some(Self::Go),
            "java" => Some(Self::Java),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Node => "node",
            Self::Python => "python",
            Self::Rust => "rust",
            Self::Go => "go",
            Self::Java => "java",
        }
    }

    pub fn default_version(&self) -> &str {
        match self {
            Self::Node => "20",
            Self::Python => "3.12",
            Self::Rust => "stable",
            Self::Go => "1.22",
            Self::Java => "21",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    Push,
    PullRequest,
    PushAndPr,
    Schedule,
}

impl Trigger {
    pub const ALL: [&'static str; 4] = ["push", "pull_request", "push_and_pr", "schedule"];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "push" => Some(Self::Push),
            "pull_request" => Some(Self::PullRequest),
            "push_and_pr" => Some(Self::PushAndPr),
            "schedule" => Some(Self::Schedule),
            _ => None,
        }
    }

    pub fn on_push(&self) -> bool {
        matches!(self, Self::Push | Self::PushAndPr)
    }

    pub fn on_pull_request(&self) -> bool {
        matches!(self, Self::PullRequest | Self::PushAndPr)
    }
}

/// Everything a renderer needs to produce one workflow document.
///
/// Serialized as-is into the template context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowSpec {
    pub name: String,
    pub language: Language,
    pub language_version: String,
    pub trigger: Trigger,
    pub on_push: bool,
    pub on_pull_request: bool,
    pub schedule: Option<String>,
    pub branches: Vec<String>,
    /// Fully qualified image to build and push, when publishing
    pub image: Option<String>,
    /// Registry host to log in to, when publishing
    pub registry_host: Option<String>,
}

impl WorkflowSpec {
    /// Build the workflow description from a validated call.
    ///
    /// Publishing needs a registry; without one the call fails with
    /// `GenerationFailure` since the workflow could not push anywhere.
    pub fn from_call(call: &ToolCall, resolved: &ResolvedConfig) -> Result<Self, ToolError> {
        let language_name = super::required(call, "language")?;
        let language = Language::parse(language_name).ok_or_else(|| {
            ToolError::invalid_argument("language", format!("unsupported language '{}'", language_name))
        })?;
        let trigger_name = super::required(call, "trigger")?;
        let trigger = Trigger::parse(trigger_name).ok_or_else(|| {
            ToolError::invalid_argument("trigger", format!("unsupported trigger '{}'", trigger_name))
        })?;

        let mut branches = call.get_string_list("branches");
        if branches.is_empty() {
            branches.push("main".to_string());
        }

        let (image, registry_host) = if call.get_bool("publish_image").unwrap_or(false) {
            let registry = resolved.docker_registry.as_deref().ok_or_else(|| {
                ToolError::generation_failed(
                    "publish_image requires a docker registry (argument 'registry' or configuration)",
                )
            })?;
            let image_name = call
                .get_non_empty("image_name")
                .unwrap_or("${{ github.event.repository.name }}");
            let image = qualify_image(image_name, Some(registry));
            let host = image.split('/').next().unwrap_or(registry).to_string();
            (Some(image), Some(host))
        } else {
            (None, None)
        };

        Ok(Self {
            name: call.get_non_empty("name").unwrap_or("CI").to_string(),
            language,
            language_version: call
                .get_non_empty("language_version")
                .unwrap_or(language.default_version())
                .to_string(),
            trigger,
            on_push: trigger.on_push(),
            on_pull_request: trigger.on_pull_request(),
            schedule: (trigger == Trigger::Schedule).then(|| DEFAULT_SCHEDULE.to_string()),
            branches,
            image,
            registry_host,
        })
    }
}

pub fn github_workflow_definition() -> ToolDefinition {
    ToolDefinition::new(
        GITHUB_WORKFLOW,
        "Generate a GitHub Actions CI workflow (YAML) for a project. Does not write files or run anything.",
        ToolKind::RenderTemplate,
        RiskLevel::Low,
    )
    .with_parameter(
        ToolParameter::new("language", "Project language", true).with_allowed_values(&Language::ALL),
    )
    .with_parameter(
        ToolParameter::new("trigger", "Workflow trigger", true).with_allowed_values(&Trigger::ALL),
    )
    .with_parameter(ToolParameter::new("name", "Workflow name (default: CI)", false))
    .with_parameter(
        ToolParameter::new("branches", "Branches for push/pull_request triggers (default: main)", false)
            .with_type(ParamType::StringList),
    )
    .with_parameter(ToolParameter::new(
        "language_version",
        "Toolchain version (defaults per language)",
        false,
    ))
    .with_parameter(
        ToolParameter::new("publish_image", "Add a job that builds and pushes a container image", false)
            .with_type(ParamType::Boolean),
    )
    .with_parameter(ToolParameter::new(
        "image_name",
        "Image name to publish (default: repository name)",
        false,
    ))
    .with_parameter(ToolParameter::new(
        "registry",
        "Registry override for this call",
        false,
    ))
}
