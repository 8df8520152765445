//! Configuration file loading for victor-devops
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `VICTOR_DEVOPS_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./devops.toml` or `./.devops.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/victor-devops/config.toml`
//! 5. Default values
//!
//! Command-line flags (`--namespace`, `--registry`, `--cloud-provider`) sit
//! above all of these; they are applied per call by the dispatcher.

mod file_config;
mod loader;

pub use file_config::{ConfigValidationError, FileAuditConfig, FileConfig, FileOutputConfig};
pub use loader::{ConfigLoader, ConfigSource, ENV_PREFIX};
