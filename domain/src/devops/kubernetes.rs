//! `k8s_apply`.

use super::command::CommandLine;
use super::{K8S_APPLY, required};
use crate::config::ResolvedConfig;
use crate::tool::{ParamType, RiskLevel, ToolCall, ToolDefinition, ToolError, ToolKind, ToolParameter};

pub fn k8s_apply_definition() -> ToolDefinition {
    ToolDefinition::new(
        K8S_APPLY,
        "Apply a Kubernetes manifest (file or directory) with kubectl.",
        ToolKind::SpawnProcess,
        RiskLevel::High,
    )
    .with_parameter(
        ToolParameter::new("manifest", "Manifest file or directory", true).with_type(ParamType::Path),
    )
    .with_parameter(ToolParameter::new(
        "namespace",
        "Target namespace (overrides the configured namespace)",
        false,
    ))
    .with_parameter(ToolParameter::new("context", "kubeconfig context", false))
    .with_parameter(
        ToolParameter::new("dry_run", "Dry-run mode", false)
            .with_allowed_values(&["none", "client", "server"]),
    )
}

/// `kubectl apply -f <manifest> -n <ns> [--context C] [--dry-run=<mode>]`
pub fn build_k8s_apply(call: &ToolCall, resolved: &ResolvedConfig) -> Result<CommandLine, ToolError> {
    let manifest = required(call, "manifest")?;

    let cmd = CommandLine::new(&resolved.kubectl_binary)
        .args(["apply", "-f", manifest, "-n", resolved.k8s_namespace.as_str()])
        .opt("--context", call.get_non_empty("context"));

    Ok(match call.get_non_empty("dry_run") {
        Some(mode) if mode != "none" => cmd.arg(format!("--dry-run={}", mode)),
        _ => cmd,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigOverrides, DevOpsConfig};

    fn staging() -> DevOpsConfig {
        DevOpsConfig {
            k8s_namespace: Some("staging".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_k8s_apply_uses_configured_namespace() {
        let call = ToolCall::new("k8s_apply").with_arg("manifest", "deploy.yaml");
        let cmd = build_k8s_apply(&call, &staging().resolve(&ConfigOverrides::default())).unwrap();
        assert_eq!(
            cmd.to_argv(),
            vec!["kubectl", "apply", "-f", "deploy.yaml", "-n", "staging"]
        );
    }

    #[test]
    fn test_k8s_apply_override_and_options() {
        let call = ToolCall::new("k8s_apply")
            .with_arg("manifest", "k8s/")
            .with_arg("context", "eks-prod")
            .with_arg("dry_run", "server");
        let overrides = ConfigOverrides::default().with_k8s_namespace("prod");
        let cmd = build_k8s_apply(&call, &staging().resolve(&overrides)).unwrap();
        assert_eq!(
            cmd.to_argv(),
            vec![
                "kubectl",
                "apply",
                "-f",
                "k8s/",
                "-n",
                "prod",
                "--context",
                "eks-prod",
                "--dry-run=server"
            ]
        );
    }

    #[test]
    fn test_k8s_apply_dry_run_none_adds_nothing() {
        let call = ToolCall::new("k8s_apply")
            .with_arg("manifest", "a.yaml")
            .with_arg("dry_run", "none");
        let resolved = DevOpsConfig::default().resolve(&ConfigOverrides::default());
        let cmd = build_k8s_apply(&call, &resolved).unwrap();
        assert_eq!(cmd.args.last().map(String::as_str), Some("default"));
    }

    #[test]
    fn test_custom_kubectl_binary() {
        let config = DevOpsConfig {
            kubectl_binary: "/opt/bin/kubectl".to_string(),
            ..Default::default()
        };
        let call = ToolCall::new("k8s_apply").with_arg("manifest", "a.yaml");
        let cmd = build_k8s_apply(&call, &config.resolve(&ConfigOverrides::default())).unwrap();
        assert_eq!(cmd.program, "/opt/bin/kubectl");
    }
}
