//! Infrastructure layer for victor-devops
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod tools;
pub mod workflow;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigSource, ConfigValidationError, FileAuditConfig, FileConfig,
    FileOutputConfig,
};
pub use logging::JsonlInvocationLogger;
pub use tools::{
    DetectedBinary, DiscoveryResult, DryRunExecutor, JsonSchemaToolConverter, ProcessExecutor,
    discover_binaries,
};
pub use workflow::TeraWorkflowRenderer;
