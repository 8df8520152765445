//! Port definitions (interfaces) for the application layer
//!
//! Ports define the boundaries between the application and external systems.
//! Adapters in the infrastructure layer implement these interfaces.

pub mod command_executor;
pub mod invocation_logger;
pub mod progress;
pub mod tool_schema;
pub mod workflow_renderer;
