//! Logging infrastructure: structured audit logging.
//!
//! Provides [`JsonlInvocationLogger`], an append-only JSONL writer that
//! implements the [`InvocationLogger`](devops_application::InvocationLogger) port.

mod audit_log;

pub use audit_log::JsonlInvocationLogger;
