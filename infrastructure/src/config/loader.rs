//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use devops_domain::known_keys;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
    value::{Dict, Value},
};
use std::path::PathBuf;

const APP_DIR: &str = "victor-devops";
const PROJECT_FILES: [&str; 2] = ["devops.toml", ".devops.toml"];

/// Prefix of the environment variables that override `[devops]` keys
pub const ENV_PREFIX: &str = "VICTOR_DEVOPS_";

/// One place configuration can come from, as shown by `show-config`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    pub label: String,
    pub location: String,
    pub found: bool,
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `VICTOR_DEVOPS_*` environment variables (`[devops]` keys only)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./devops.toml` or `./.devops.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/victor-devops/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            if !path.exists() {
                return Err(Box::new(figment::Error::from(format!(
                    "config file not found: {}",
                    path.display()
                ))));
            }
            figment = figment.merge(Toml::file(path));
        }

        figment
            .merge(Self::env_provider())
            .extract()
            .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config). The environment
    /// still applies.
    pub fn load_defaults() -> Result<FileConfig, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Self::env_provider())
            .extract()
            .map_err(Box::new)
    }

    /// `VICTOR_DEVOPS_K8S_NAMESPACE=qa` becomes `devops.k8s_namespace = "qa"`.
    /// Values are taken as plain strings, so `2024` stays a namespace name.
    /// List keys split on commas. Unknown suffixes are ignored.
    fn env_provider() -> Serialized<Dict> {
        let mut devops = Dict::new();
        for info in known_keys() {
            let Ok(raw) = std::env::var(info.env_var) else {
                continue;
            };
            let value = if info.list {
                Value::from(split_list(&raw))
            } else {
                Value::from(raw)
            };
            devops.insert(info.key.to_string(), value);
        }
        Serialized::default("devops", devops)
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Sources in priority order, highest first
    pub fn sources(config_path: Option<&PathBuf>) -> Vec<ConfigSource> {
        let mut sources = Vec::new();

        let env_vars: Vec<&str> = known_keys()
            .iter()
            .map(|k| k.env_var)
            .filter(|var| std::env::var_os(var).is_some())
            .collect();
        sources.push(ConfigSource {
            label: "Env".to_string(),
            location: if env_vars.is_empty() {
                format!("{}*", ENV_PREFIX)
            } else {
                env_vars.join(", ")
            },
            found: !env_vars.is_empty(),
        });

        if let Some(path) = config_path {
            sources.push(ConfigSource {
                label: "Explicit".to_string(),
                location: path.display().to_string(),
                found: path.exists(),
            });
        }

        sources.push(match Self::project_config_path() {
            Some(path) => ConfigSource {
                label: "Project".to_string(),
                location: path.display().to_string(),
                found: true,
            },
            None => ConfigSource {
                label: "Project".to_string(),
                location: "./devops.toml or ./.devops.toml".to_string(),
                found: false,
            },
        });

        if let Some(path) = Self::global_config_path() {
            sources.push(ConfigSource {
                label: "Global".to_string(),
                found: path.exists(),
                location: path.display().to_string(),
            });
        }

        sources.push(ConfigSource {
            label: "Default".to_string(),
            location: "built-in defaults".to_string(),
            found: true,
        });

        sources
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use devops_domain::{ContainerRuntime, OutputFormat};
    use figment::Jail;

    fn load(path: Option<&PathBuf>) -> figment::error::Result<FileConfig> {
        ConfigLoader::load(path).map_err(|e| *e)
    }

    #[test]
    fn test_load_defaults() {
        Jail::expect_with(|_jail| {
            let config = ConfigLoader::load_defaults().map_err(|e| *e)?;
            assert_eq!(config, FileConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path().unwrap();
        assert!(path.to_string_lossy().contains("victor-devops"));
        assert!(path.ends_with("config.toml"));
    }

    #[test]
    fn test_project_file_is_merged() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "devops.toml",
                "[devops]\nk8s_namespace = \"staging\"\n\n[output]\nformat = \"json\"\n",
            )?;
            let config = load(None)?;
            assert_eq!(config.devops.k8s_namespace.as_deref(), Some("staging"));
            assert_eq!(config.output.format, OutputFormat::Json);
            assert_eq!(config.devops.kubectl_binary, "kubectl");
            Ok(())
        });
    }

    #[test]
    fn test_hidden_project_file() {
        Jail::expect_with(|jail| {
            jail.create_file(".devops.toml", "[devops]\ncontainer_runtime = \"podman\"\n")?;
            let config = load(None)?;
            assert_eq!(config.devops.container_runtime, ContainerRuntime::Podman);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_overrides_project() {
        Jail::expect_with(|jail| {
            jail.create_file("devops.toml", "[devops]\ncloud_provider = \"aws\"\n")?;
            jail.create_file("ci.toml", "[devops]\ncloud_provider = \"gcp\"\n")?;
            let config = load(Some(&PathBuf::from("ci.toml")))?;
            assert_eq!(config.devops.cloud_provider.as_deref(), Some("gcp"));
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        Jail::expect_with(|_jail| {
            let err = ConfigLoader::load(Some(&PathBuf::from("nope.toml"))).unwrap_err();
            assert!(err.to_string().contains("nope.toml"));
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_files() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "devops.toml",
                "[devops]\nk8s_namespace = \"staging\"\ndocker_registry = \"ghcr.io\"\n",
            )?;
            jail.set_env("VICTOR_DEVOPS_K8S_NAMESPACE", "qa");
            jail.set_env("VICTOR_DEVOPS_TERRAFORM_BINARY", "tofu");
            let config = load(None)?;
            assert_eq!(config.devops.k8s_namespace.as_deref(), Some("qa"));
            assert_eq!(config.devops.docker_registry.as_deref(), Some("ghcr.io"));
            assert_eq!(config.devops.terraform_binary, "tofu");
            Ok(())
        });
    }

    #[test]
    fn test_env_applies_without_files() {
        Jail::expect_with(|jail| {
            jail.set_env("VICTOR_DEVOPS_CLOUD_PROVIDER", "azure");
            jail.set_env("VICTOR_DEVOPS_UNRELATED", "x");
            let config = ConfigLoader::load_defaults().map_err(|e| *e)?;
            assert_eq!(config.devops.cloud_provider.as_deref(), Some("azure"));
            Ok(())
        });
    }

    #[test]
    fn test_env_values_stay_strings() {
        Jail::expect_with(|jail| {
            jail.set_env("VICTOR_DEVOPS_K8S_NAMESPACE", "2024");
            jail.set_env("VICTOR_DEVOPS_CLOUD_PROVIDER", "true");
            jail.set_env("VICTOR_DEVOPS_KUBECTL_BINARY", "1.5");
            let config = ConfigLoader::load_defaults().map_err(|e| *e)?;
            assert_eq!(config.devops.k8s_namespace.as_deref(), Some("2024"));
            assert_eq!(config.devops.cloud_provider.as_deref(), Some("true"));
            assert_eq!(config.devops.kubectl_binary, "1.5");
            Ok(())
        });
    }

    #[test]
    fn test_env_protected_namespaces() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "devops.toml",
                "[devops]\nprotected_namespaces = [\"prod\", \"live\"]\n",
            )?;
            jail.set_env("VICTOR_DEVOPS_PROTECTED_NAMESPACES", "production");
            let config = load(None)?;
            assert_eq!(config.devops.protected_namespaces, vec!["production"]);

            jail.set_env("VICTOR_DEVOPS_PROTECTED_NAMESPACES", " a, b ,,");
            let config = load(None)?;
            assert_eq!(config.devops.protected_namespaces, vec!["a", "b"]);
            Ok(())
        });
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("prod"), vec!["prod"]);
        assert_eq!(split_list("prod, staging"), vec!["prod", "staging"]);
        assert!(split_list(" , ").is_empty());
    }

    #[test]
    fn test_sources_mark_found_files() {
        Jail::expect_with(|jail| {
            jail.create_file(".devops.toml", "")?;
            jail.set_env("VICTOR_DEVOPS_K8S_NAMESPACE", "qa");
            let sources = ConfigLoader::sources(None);

            assert_eq!(sources[0].label, "Env");
            assert!(sources[0].found);
            assert_eq!(sources[0].location, "VICTOR_DEVOPS_K8S_NAMESPACE");

            let project = sources.iter().find(|s| s.label == "Project").unwrap();
            assert!(project.found);
            assert_eq!(project.location, ".devops.toml");
            assert_eq!(sources.last().unwrap().label, "Default");
            Ok(())
        });
    }
}
