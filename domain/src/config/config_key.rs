//! Config key registry.
//!
//! Metadata for every DevOps setting: its key in `devops.toml`, the
//! environment variable that sets it, and whether a single call may override
//! it. Used by `show-config`.

/// Whether a setting can be overridden by a single tool call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Can be overridden per call (or by a CLI flag)
    PerCall,
    /// Fixed at startup
    Startup,
}

/// Metadata for a single config key.
#[derive(Debug, Clone)]
pub struct ConfigKeyInfo {
    /// Key in the config file (e.g., `"k8s_namespace"`).
    pub key: &'static str,
    /// Environment variable that sets it.
    pub env_var: &'static str,
    /// Tool argument that overrides it, if any.
    pub call_argument: Option<&'static str>,
    pub description: &'static str,
    pub scope: Scope,
    /// Valid string values (empty if freeform).
    pub valid_values: &'static [&'static str],
    /// Takes a comma-separated list when set from the environment.
    pub list: bool,
}

/// All known config keys with their metadata.
pub fn known_keys() -> &'static [ConfigKeyInfo] {
    &KNOWN_KEYS
}

/// Look up a config key by name.
pub fn lookup_key(key: &str) -> Option<&'static ConfigKeyInfo> {
    KNOWN_KEYS.iter().find(|k| k.key == key)
}

static KNOWN_KEYS: [ConfigKeyInfo; 7] = [
    ConfigKeyInfo {
        key: "cloud_provider",
        env_var: "VICTOR_DEVOPS_CLOUD_PROVIDER",
        call_argument: Some("cloud_provider"),
        description: "Cloud provider passed to Terraform (default: aws)",
        scope: Scope::PerCall,
        valid_values: &[],
        list: false,
    },
    ConfigKeyInfo {
        key: "k8s_namespace",
        env_var: "VICTOR_DEVOPS_K8S_NAMESPACE",
        call_argument: Some("namespace"),
        description: "Kubernetes namespace for k8s_apply (default: default)",
        scope: Scope::PerCall,
        valid_values: &[],
        list: false,
    },
    ConfigKeyInfo {
        key: "docker_registry",
        env_var: "VICTOR_DEVOPS_DOCKER_REGISTRY",
        call_argument: Some("registry"),
        description: "Registry prefixed to unqualified image references",
        scope: Scope::PerCall,
        valid_values: &[],
        list: false,
    },
    ConfigKeyInfo {
        key: "container_runtime",
        env_var: "VICTOR_DEVOPS_CONTAINER_RUNTIME",
        call_argument: None,
        description: "Container CLI for docker_build and docker_run",
        scope: Scope::Startup,
        valid_values: &["docker", "podman"],
        list: false,
    },
    ConfigKeyInfo {
        key: "kubectl_binary",
        env_var: "VICTOR_DEVOPS_KUBECTL_BINARY",
        call_argument: None,
        description: "kubectl executable name or path",
        scope: Scope::Startup,
        valid_values: &[],
        list: false,
    },
    ConfigKeyInfo {
        key: "terraform_binary",
        env_var: "VICTOR_DEVOPS_TERRAFORM_BINARY",
        call_argument: None,
        description: "Terraform-compatible executable (terraform, tofu, or a path)",
        scope: Scope::Startup,
        valid_values: &[],
        list: false,
    },
    ConfigKeyInfo {
        key: "protected_namespaces",
        env_var: "VICTOR_DEVOPS_PROTECTED_NAMESPACES",
        call_argument: None,
        description: "Namespaces/environments that raise safety findings",
        scope: Scope::Startup,
        valid_values: &[],
        list: true,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_existing_key() {
        let info = lookup_key("container_runtime").unwrap();
        assert_eq!(info.scope, Scope::Startup);
        assert!(info.valid_values.contains(&"podman"));
    }

    #[test]
    fn test_lookup_nonexistent_key() {
        assert!(lookup_key("nonexistent.key").is_none());
    }

    #[test]
    fn test_per_call_keys_have_arguments() {
        let per_call: Vec<_> = known_keys()
            .iter()
            .filter(|k| k.scope == Scope::PerCall)
            .collect();
        assert_eq!(per_call.len(), 3);
        assert!(per_call.iter().all(|k| k.call_argument.is_some()));
    }

    #[test]
    fn test_only_protected_namespaces_is_a_list() {
        let lists: Vec<_> = known_keys().iter().filter(|k| k.list).map(|k| k.key).collect();
        assert_eq!(lists, vec!["protected_namespaces"]);
    }

    #[test]
    fn test_env_vars_share_prefix() {
        for info in known_keys() {
            assert!(info.env_var.starts_with("VICTOR_DEVOPS_"), "{}", info.key);
            assert!(info.env_var.ends_with(&info.key.to_ascii_uppercase()));
        }
    }
}
