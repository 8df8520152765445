//! Port for structured invocation (audit) logging.
//!
//! Defines the [`InvocationLogger`] trait for recording one event per tool
//! dispatch to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures a
//! machine-readable audit trail (JSONL). Payloads are redacted before they
//! reach the logger.

use serde_json::Value;

/// A structured invocation event for logging.
pub struct InvocationEvent {
    /// Event type identifier (e.g., "tool_invocation").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl InvocationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging invocation events.
///
/// The `log` method is synchronous and non-fallible so an unwritable audit
/// log never changes the outcome of a dispatch.
pub trait InvocationLogger: Send + Sync {
    fn log(&self, event: InvocationEvent);
}

/// No-op implementation for tests and when audit logging is disabled.
pub struct NoInvocationLogger;

impl InvocationLogger for NoInvocationLogger {
    fn log(&self, _event: InvocationEvent) {}
}
