//! `terraform_plan` and `terraform_apply`.
//!
//! The working directory is passed with `-chdir` rather than by changing the
//! child's cwd, so relative `var_file`/`plan_file` paths resolve against it.
//! The cloud provider reaches the configuration as `TF_VAR_cloud_provider`;
//! a `-var` for an undeclared variable would be an error.

use super::command::CommandLine;
use super::{TERRAFORM_APPLY, TERRAFORM_PLAN, required};
use crate::config::ResolvedConfig;
use crate::tool::{ParamType, RiskLevel, ToolCall, ToolDefinition, ToolError, ToolKind, ToolParameter};

/// Plan file written by `terraform_plan` and read by `terraform_apply`
pub const DEFAULT_PLAN_FILE: &str = "tfplan";
pub const CLOUD_PROVIDER_ENV: &str = "TF_VAR_cloud_provider";

pub fn terraform_plan_definition() -> ToolDefinition {
    ToolDefinition::new(
        TERRAFORM_PLAN,
        "Create a Terraform execution plan for a configuration directory.",
        ToolKind::SpawnProcess,
        RiskLevel::Low,
    )
    .with_parameter(
        ToolParameter::new("dir", "Terraform configuration directory", true)
            .with_type(ParamType::Path),
    )
    .with_parameter(
        ToolParameter::new("var_file", "Variable definitions file", false).with_type(ParamType::Path),
    )
    .with_parameter(
        ToolParameter::new("vars", "Input variables (KEY=VALUE)", false)
            .with_type(ParamType::StringMap),
    )
    .with_parameter(
        ToolParameter::new("out", "Plan output file (default: tfplan)", false)
            .with_type(ParamType::Path),
    )
    .with_parameter(ToolParameter::new(
        "cloud_provider",
        "Cloud provider override for this call",
        false,
    ))
}

pub fn terraform_apply_definition() -> ToolDefinition {
    ToolDefinition::new(
        TERRAFORM_APPLY,
        "Apply a saved Terraform plan, or apply directly with auto-approve.",
        ToolKind::SpawnProcess,
        RiskLevel::High,
    )
    .with_parameter(
        ToolParameter::new("dir", "Terraform configuration directory", true)
            .with_type(ParamType::Path),
    )
    .with_parameter(
        ToolParameter::new("plan_file", "Saved plan to apply (default: tfplan)", false)
            .with_type(ParamType::Path),
    )
    .with_parameter(
        ToolParameter::new("auto_approve", "Apply without a saved plan or confirmation", false)
            .with_type(ParamType::Boolean),
    )
    .with_parameter(ToolParameter::new(
        "cloud_provider",
        "Cloud provider override for this call",
        false,
    ))
}

/// `terraform -chdir=<dir> plan -input=false -out=<out> [-var-file=F] [-var K=V]…`
pub fn build_terraform_plan(call: &ToolCall, resolved: &ResolvedConfig) -> Result<CommandLine, ToolError> {
    let dir = required(call, "dir")?;
    let out = call.get_non_empty("out").unwrap_or(DEFAULT_PLAN_FILE);

    let mut cmd = base(dir, resolved)
        .args(["plan", "-input=false"])
        .arg(format!("-out={}", out));
    if let Some(var_file) = call.get_non_empty("var_file") {
        cmd = cmd.arg(format!("-var-file={}", var_file));
    }
    for (key, value) in call.get_string_map("vars") {
        cmd = cmd.arg("-var").arg(format!("{}={}", key, value));
    }
    Ok(cmd)
}

/// `terraform -chdir=<dir> apply -input=false (-auto-approve | <plan_file>)`
pub fn build_terraform_apply(call: &ToolCall, resolved: &ResolvedConfig) -> Result<CommandLine, ToolError> {
    let dir = required(call, "dir")?;
    let cmd = base(dir, resolved).args(["apply", "-input=false"]);

    Ok(if call.get_bool("auto_approve").unwrap_or(false) {
        cmd.arg("-auto-approve")
    } else {
        cmd.arg(call.get_non_empty("plan_file").unwrap_or(DEFAULT_PLAN_FILE))
    })
}

fn base(dir: &str, resolved: &ResolvedConfig) -> CommandLine {
    CommandLine::new(&resolved.terraform_binary)
        .arg(format!("-chdir={}", dir))
        .env(CLOUD_PROVIDER_ENV, &resolved.cloud_provider)
}

/// Directory a terraform command runs against, from its `-chdir=` argument
pub fn chdir_of(cmd: &CommandLine) -> Option<&str> {
    cmd.args.iter().find_map(|a| a.strip_prefix("-chdir="))
}
