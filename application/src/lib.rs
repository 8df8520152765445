//! Application layer for victor-devops
//!
//! This crate contains the dispatch use case and the port definitions it
//! drives. It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    command_executor::{CommandExecutor, CommandOutput, ExecutorError},
    invocation_logger::{InvocationEvent, InvocationLogger, NoInvocationLogger},
    progress::{DispatchProgress, NoDispatchProgress},
    tool_schema::ToolSchemaPort,
    workflow_renderer::{RenderError, WorkflowRenderer},
};
pub use use_cases::dispatch::CommandDispatcher;
