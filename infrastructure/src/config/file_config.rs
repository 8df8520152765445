//! On-disk configuration schema.
//!
//! ```toml
//! [devops]
//! cloud_provider = "gcp"
//! k8s_namespace = "staging"
//! docker_registry = "ghcr.io/acme"
//! container_runtime = "podman"
//! terraform_binary = "tofu"
//! protected_namespaces = ["kube-system", "production"]
//!
//! [output]
//! format = "json"
//! color = false
//!
//! [audit]
//! path = "/var/log/victor-devops/audit.jsonl"
//! ```

use devops_domain::{DevOpsConfig, OutputFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Problems `FileConfig::validate` reports. They do not stop a load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("devops.{key} must not be empty")]
    EmptyBinary { key: &'static str },

    #[error("devops.docker_registry '{value}' should be a host[/path] without a scheme")]
    RegistryWithScheme { value: String },

    #[error("devops.docker_registry '{value}' contains whitespace")]
    RegistryWhitespace { value: String },

    #[error("devops.protected_namespaces contains an empty entry")]
    EmptyProtectedNamespace,
}

/// `[output]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FileOutputConfig {
    pub format: OutputFormat,
    /// Colored text output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: true,
        }
    }
}

/// `[audit]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FileAuditConfig {
    /// JSONL file that receives one record per dispatch. Unset disables it.
    pub path: Option<PathBuf>,
}

/// Root of `config.toml` / `devops.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FileConfig {
    pub devops: DevOpsConfig,
    pub output: FileOutputConfig,
    pub audit: FileAuditConfig,
}

impl FileConfig {
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        if self.devops.kubectl_binary.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyBinary {
                key: "kubectl_binary",
            });
        }
        if self.devops.terraform_binary.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyBinary {
                key: "terraform_binary",
            });
        }

        if let Some(registry) = &self.devops.docker_registry {
            let registry = registry.trim();
            if registry.contains("://") {
                issues.push(ConfigValidationError::RegistryWithScheme {
                    value: registry.to_string(),
                });
            }
            if registry.chars().any(char::is_whitespace) {
                issues.push(ConfigValidationError::RegistryWhitespace {
                    value: registry.to_string(),
                });
            }
        }

        if self
            .devops
            .protected_namespaces
            .iter()
            .any(|ns| ns.trim().is_empty())
        {
            issues.push(ConfigValidationError::EmptyProtectedNamespace);
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devops_domain::ContainerRuntime;

    #[test]
    fn test_default_is_valid() {
        assert!(FileConfig::default().validate().is_empty());
    }

    #[test]
    fn test_parse_full_file() {
        let text = r#"
[devops]
cloud_provider = "gcp"
k8s_namespace = "staging"
docker_registry = "ghcr.io/acme"
container_runtime = "podman"
terraform_binary = "tofu"

[output]
format = "json"
color = false

[audit]
path = "/tmp/audit.jsonl"
"#;
        let config: FileConfig = toml::from_str(text).unwrap();
        assert_eq!(config.devops.cloud_provider.as_deref(), Some("gcp"));
        assert_eq!(config.devops.container_runtime, ContainerRuntime::Podman);
        assert_eq!(config.devops.terraform_binary, "tofu");
        assert_eq!(config.devops.kubectl_binary, "kubectl");
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(!config.output.color);
        assert_eq!(config.audit.path, Some(PathBuf::from("/tmp/audit.jsonl")));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: FileConfig = toml::from_str("[devops]\nk8s_namespace = \"qa\"\n").unwrap();
        assert_eq!(config.devops.k8s_namespace.as_deref(), Some("qa"));
        assert!(config.output.color);
        assert!(config.audit.path.is_none());
        assert!(
            config
                .devops
                .protected_namespaces
                .contains(&"kube-system".to_string())
        );
    }

    #[test]
    fn test_validate_reports_problems() {
        let mut config = FileConfig::default();
        config.devops.terraform_binary = " ".to_string();
        config.devops.docker_registry = Some("https://ghcr.io/acme".to_string());
        config.devops.protected_namespaces.push(String::new());

        let issues = config.validate();
        assert_eq!(issues.len(), 3);
        assert!(issues.contains(&ConfigValidationError::EmptyBinary {
            key: "terraform_binary"
        }));
        assert!(issues.contains(&ConfigValidationError::EmptyProtectedNamespace));
        assert_eq!(
            issues[1].to_string(),
            "devops.docker_registry 'https://ghcr.io/acme' should be a host[/path] without a scheme"
        );
    }
}
