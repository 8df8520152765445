//! Tool domain value objects: immutable result and error types
//!
//! These types form the **output side** of a dispatch. A successful call
//! yields an [`InvocationResult`]; every failure is a [`ToolError`]. Neither
//! is fatal to the dispatcher: both travel back to the host framework as a
//! [`ToolResponse`].

use crate::devops::safety::SafetyFinding;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error that occurred while dispatching a tool call.
///
/// Error codes tell the host framework whether re-issuing the call with
/// different arguments can help:
///
/// | Code | Retryable? | Description |
/// |------|-----------|-------------|
/// | `NOT_FOUND` | Yes | Unknown tool name |
/// | `INVALID_ARGUMENT` | Yes | Missing/mistyped parameter |
/// | `DUPLICATE_TOOL` | No | Catalog built with the same name twice |
/// | `EXECUTION_FAILED` | No | External CLI exited non-zero or could not start |
/// | `GENERATION_FAILED` | No | Template rendering failed |
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ToolError {
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("Tool already registered: {name}")]
    DuplicateTool { name: String },

    #[error("Invalid argument '{parameter}': {reason}")]
    InvalidArgument { parameter: String, reason: String },

    /// `exit_code` is `None` when the process never started or was killed by a signal.
    #[error("{program} failed{}: {}", exit_suffix(.exit_code), trimmed(.stderr))]
    ExternalProcessFailure {
        program: String,
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("Generation failed: {message}")]
    GenerationFailure { message: String },
}

fn exit_suffix(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" with exit code {}", code),
        None => String::new(),
    }
}

fn trimmed(text: &str) -> &str {
    text.trim()
}

impl ToolError {
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool { name: name.into() }
    }

    pub fn invalid_argument(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    pub fn generation_failed(message: impl Into<String>) -> Self {
        Self::GenerationFailure {
            message: message.into(),
        }
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownTool { .. } => "NOT_FOUND",
            Self::DuplicateTool { .. } => "DUPLICATE_TOOL",
            Self::InvalidArgument { .. } => "INVALID_ARGUMENT",
            Self::ExternalProcessFailure { .. } => "EXECUTION_FAILED",
            Self::GenerationFailure { .. } => "GENERATION_FAILED",
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::UnknownTool { .. } | Self::InvalidArgument { .. })
    }

    /// The offending parameter for `InvalidArgument`
    pub fn parameter(&self) -> Option<&str> {
        match self {
            Self::InvalidArgument { parameter, .. } => Some(parameter),
            _ => None,
        }
    }
}

/// Result of a successful dispatch.
///
/// Process tools fill `command`, `stdout`, `stderr`; generation tools fill
/// `generated_artifact` and report exit code 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationResult {
    /// Name of the tool that was executed
    pub tool_name: String,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    /// Rendered document (generation tools only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_artifact: Option<String>,
    /// Full argument vector that was run, program first (process tools only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
    /// Advisory safety findings for this call
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<SafetyFinding>,
    /// Wall-clock time of the external action in milliseconds
    #[serde(default)]
    pub duration_ms: u64,
}

impl InvocationResult {
    /// Result of an external process that exited successfully
    pub fn process(
        tool_name: impl Into<String>,
        command: Vec<String>,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        Self {
            tool_name: tool_name.into(),
            exit_code: 0,
            stdout: stdout.into(),
            stderr: stderr.into(),
            generated_artifact: None,
            command: Some(command),
            warnings: Vec::new(),
            duration_ms: 0,
        }
    }

    /// Result of a template rendering
    pub fn generated(tool_name: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            exit_code: 0,
            stdout: String::new(),
            stderr: String::new(),
            generated_artifact: Some(artifact.into()),
            command: None,
            warnings: Vec::new(),
            duration_ms: 0,
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<SafetyFinding>) -> Self {
        self.warnings = warnings;
        self
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn is_generated(&self) -> bool {
        self.generated_artifact.is_some()
    }
}

/// Wire shape returned to the host framework for every tool call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolResponse {
    Completed {
        result: InvocationResult,
    },
    Failed {
        code: String,
        message: String,
        retryable: bool,
        error: ToolError,
    },
}

impl ToolResponse {
    pub fn is_completed(&self) -> bool {
        matches!(self, ToolResponse::Completed { .. })
    }
}

impl From<Result<InvocationResult, ToolError>> for ToolResponse {
    fn from(outcome: Result<InvocationResult, ToolError>) -> Self {
        match outcome {
            Ok(result) => ToolResponse::Completed { result },
            Err(error) => ToolResponse::Failed {
                code: error.code().to_string(),
                message: error.to_string(),
                retryable: error.is_retryable(),
                error,
            },
        }
    }
}
