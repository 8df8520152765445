//! Progress notification port
//!
//! Defines the interface for reporting progress while a tool call runs.

use devops_domain::{InvocationState, SafetyFinding};

/// Callback for progress updates during a dispatch
///
/// Implementations live in the presentation layer (console spinner,
/// JSON-lines server) and decide how much to show.
pub trait DispatchProgress: Send + Sync {
    /// Called on every state transition of a call
    fn on_state(&self, tool_name: &str, state: InvocationState);

    /// Called right before an external command starts
    fn on_command(&self, _tool_name: &str, _command: &str) {}

    /// Called for each advisory safety finding
    fn on_finding(&self, _tool_name: &str, _finding: &SafetyFinding) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoDispatchProgress;

impl DispatchProgress for NoDispatchProgress {
    fn on_state(&self, _tool_name: &str, _state: InvocationState) {}
}
