//! DevOps configuration value objects and the per-call resolver.

use serde::{Deserialize, Serialize};

/// Cloud provider used when neither a call nor the configuration names one.
pub const DEFAULT_CLOUD_PROVIDER: &str = "aws";
/// Kubernetes namespace used when neither a call nor the configuration names one.
pub const DEFAULT_K8S_NAMESPACE: &str = "default";

/// Container CLI used for image builds and runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerRuntime {
    #[default]
    Docker,
    Podman,
}

impl ContainerRuntime {
    /// Binary name on `PATH`
    pub fn binary(&self) -> &str {
        match self {
            ContainerRuntime::Docker => "docker",
            ContainerRuntime::Podman => "podman",
        }
    }
}

impl std::fmt::Display for ContainerRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.binary())
    }
}

impl std::str::FromStr for ContainerRuntime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "docker" => Ok(ContainerRuntime::Docker),
            "podman" => Ok(ContainerRuntime::Podman),
            other => Err(format!("unknown container runtime: {}", other)),
        }
    }
}

/// Process-wide DevOps configuration.
///
/// Loaded once at startup (files + `VICTOR_DEVOPS_*` environment) and shared
/// read-only by every dispatch. Unset options fall back to hard defaults
/// during [`resolve`](Self::resolve).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DevOpsConfig {
    pub cloud_provider: Option<String>,
    pub k8s_namespace: Option<String>,
    pub docker_registry: Option<String>,
    pub container_runtime: ContainerRuntime,
    /// `kubectl` or an absolute path to it
    pub kubectl_binary: String,
    /// `terraform`, `tofu`, or an absolute path
    pub terraform_binary: String,
    /// Namespaces and environment names that draw a safety finding when targeted
    pub protected_namespaces: Vec<String>,
}

impl Default for DevOpsConfig {
    fn default() -> Self {
        Self {
            cloud_provider: None,
            k8s_namespace: None,
            docker_registry: None,
            container_runtime: ContainerRuntime::default(),
            kubectl_binary: "kubectl".to_string(),
            terraform_binary: "terraform".to_string(),
            protected_namespaces: vec![
                "kube-system".to_string(),
                "production".to_string(),
                "prod".to_string(),
            ],
        }
    }
}

/// Values supplied with a single call that take precedence over configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub cloud_provider: Option<String>,
    pub k8s_namespace: Option<String>,
    pub docker_registry: Option<String>,
}

impl ConfigOverrides {
    pub fn with_cloud_provider(mut self, value: impl Into<String>) -> Self {
        self.cloud_provider = Some(value.into());
        self
    }

    pub fn with_k8s_namespace(mut self, value: impl Into<String>) -> Self {
        self.k8s_namespace = Some(value.into());
        self
    }

    pub fn with_docker_registry(mut self, value: impl Into<String>) -> Self {
        self.docker_registry = Some(value.into());
        self
    }

    /// Layer `self` on top of `base`: set fields here win.
    pub fn or(self, base: ConfigOverrides) -> ConfigOverrides {
        ConfigOverrides {
            cloud_provider: self.cloud_provider.or(base.cloud_provider),
            k8s_namespace: self.k8s_namespace.or(base.k8s_namespace),
            docker_registry: self.docker_registry.or(base.docker_registry),
        }
    }
}

/// Effective configuration for one call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfig {
    pub cloud_provider: String,
    pub k8s_namespace: String,
    pub docker_registry: Option<String>,
    pub container_runtime: ContainerRuntime,
    pub kubectl_binary: String,
    pub terraform_binary: String,
}

impl DevOpsConfig {
    /// Merge per-call overrides with this configuration.
    ///
    /// Order per option: non-blank override, then non-blank configured value,
    /// then the hard default. Never fails.
    pub fn resolve(&self, overrides: &ConfigOverrides) -> ResolvedConfig {
        ResolvedConfig {
            cloud_provider: pick(&overrides.cloud_provider, &self.cloud_provider)
                .unwrap_or(DEFAULT_CLOUD_PROVIDER)
                .to_string(),
            k8s_namespace: pick(&overrides.k8s_namespace, &self.k8s_namespace)
                .unwrap_or(DEFAULT_K8S_NAMESPACE)
                .to_string(),
            docker_registry: pick(&overrides.docker_registry, &self.docker_registry)
                .map(|r| r.trim_end_matches('/').to_string()),
            container_runtime: self.container_runtime,
            kubectl_binary: self.kubectl_binary.clone(),
            terraform_binary: self.terraform_binary.clone(),
        }
    }
}

fn pick<'a>(first: &'a Option<String>, second: &'a Option<String>) -> Option<&'a str> {
    [first, second]
        .into_iter()
        .filter_map(|v| v.as_deref())
        .map(str::trim)
        .find(|v| !v.is_empty())
}
