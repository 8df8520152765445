//! Configuration value objects for the domain layer
//!
//! These are domain concepts related to configuration that are
//! used across multiple layers.

mod config_key;
mod devops_config;
mod output_format;

pub use config_key::{ConfigKeyInfo, Scope, known_keys, lookup_key};
pub use devops_config::{
    ConfigOverrides, ContainerRuntime, DEFAULT_CLOUD_PROVIDER, DEFAULT_K8S_NAMESPACE,
    DevOpsConfig, ResolvedConfig,
};
pub use output_format::OutputFormat;
