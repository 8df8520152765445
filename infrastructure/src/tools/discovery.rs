//! CLI binary discovery
//!
//! Checks which of the external programs the DevOps tools spawn are on
//! `PATH`, and suggests an installed alternative when the configured one is
//! missing (podman for docker, tofu for terraform).
//!
//! ```text
//! $ victor-devops doctor
//!   ✓ docker     /usr/bin/docker       docker_build, docker_run
//!   ✓ kubectl    /usr/local/bin/kubectl k8s_apply
//!   ✗ terraform  not found             terraform_plan, terraform_apply
//!       → tofu is installed; set devops.terraform_binary = "tofu"
//! ```

use devops_domain::{
    DOCKER_BUILD, DOCKER_RUN, DevOpsConfig, K8S_APPLY, TERRAFORM_APPLY, TERRAFORM_PLAN,
};
use serde::Serialize;
use std::path::PathBuf;

/// One configured binary and where (if anywhere) it was found
#[derive(Debug, Clone, Serialize)]
pub struct DetectedBinary {
    /// Config key that selects it (e.g. `"kubectl_binary"`)
    pub config_key: &'static str,
    /// Configured command (name or path)
    pub command: String,
    /// Resolved location, `None` when not installed
    pub path: Option<PathBuf>,
    /// Tools that spawn this binary
    pub tools: Vec<&'static str>,
    /// Installed alternative worth switching to, if the command is missing
    pub alternative: Option<String>,
}

impl DetectedBinary {
    pub fn is_available(&self) -> bool {
        self.path.is_some()
    }
}

/// Result of binary discovery
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiscoveryResult {
    pub binaries: Vec<DetectedBinary>,
}

impl DiscoveryResult {
    pub fn all_available(&self) -> bool {
        self.binaries.iter().all(DetectedBinary::is_available)
    }

    pub fn missing(&self) -> impl Iterator<Item = &DetectedBinary> {
        self.binaries.iter().filter(|b| !b.is_available())
    }
}

/// Discover the binaries the current configuration would spawn.
pub fn discover_binaries(config: &DevOpsConfig) -> DiscoveryResult {
    discover_with(config, |command| which::which(command).ok())
}

fn discover_with<F>(config: &DevOpsConfig, locate: F) -> DiscoveryResult
where
    F: Fn(&str) -> Option<PathBuf>,
{
    let runtime = config.container_runtime.binary().to_string();
    let entries: [(&'static str, String, Vec<&'static str>, &[&str]); 3] = [
        (
            "container_runtime",
            runtime,
            vec![DOCKER_BUILD, DOCKER_RUN],
            &["docker", "podman"],
        ),
        (
            "kubectl_binary",
            config.kubectl_binary.clone(),
            vec![K8S_APPLY],
            &[],
        ),
        (
            "terraform_binary",
            config.terraform_binary.clone(),
            vec![TERRAFORM_PLAN, TERRAFORM_APPLY],
            &["terraform", "tofu"],
        ),
    ];

    let binaries = entries
        .into_iter()
        .map(|(config_key, command, tools, family)| {
            let path = locate(&command);
            let alternative = if path.is_none() {
                family
                    .iter()
                    .filter(|candidate| **candidate != command)
                    .find(|candidate| locate(candidate).is_some())
                    .map(|candidate| candidate.to_string())
            } else {
                None
            };
            DetectedBinary {
                config_key,
                command,
                path,
                tools,
                alternative,
            }
        })
        .collect();

    DiscoveryResult { binaries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devops_domain::ContainerRuntime;

    fn fake_path(installed: &'static [&'static str]) -> impl Fn(&str) -> Option<PathBuf> {
        move |command| {
            installed
                .contains(&command)
                .then(|| PathBuf::from("/usr/bin").join(command))
        }
    }

    #[test]
    fn test_everything_installed() {
        let result = discover_with(
            &DevOpsConfig::default(),
            fake_path(&["docker", "kubectl", "terraform"]),
        );
        assert!(result.all_available());
        assert_eq!(result.binaries.len(), 3);
        assert_eq!(
            result.binaries[0].path,
            Some(PathBuf::from("/usr/bin/docker"))
        );
        assert_eq!(result.binaries[2].tools, vec!["terraform_plan", "terraform_apply"]);
    }

    #[test]
    fn test_missing_binary_suggests_alternative() {
        let result = discover_with(
            &DevOpsConfig::default(),
            fake_path(&["podman", "kubectl", "tofu"]),
        );
        assert!(!result.all_available());

        let missing: Vec<_> = result.missing().collect();
        assert_eq!(missing.len(), 2);
        assert_eq!(missing[0].command, "docker");
        assert_eq!(missing[0].alternative.as_deref(), Some("podman"));
        assert_eq!(missing[1].config_key, "terraform_binary");
        assert_eq!(missing[1].alternative.as_deref(), Some("tofu"));
    }

    #[test]
    fn test_uses_configured_commands() {
        let config = DevOpsConfig {
            container_runtime: ContainerRuntime::Podman,
            terraform_binary: "tofu".to_string(),
            ..Default::default()
        };
        let result = discover_with(&config, fake_path(&["podman", "tofu"]));
        assert_eq!(result.binaries[0].command, "podman");
        assert!(result.binaries[0].is_available());
        assert!(result.binaries[2].is_available());
        assert!(!result.binaries[1].is_available());
        assert!(result.binaries[1].alternative.is_none());
    }
}
