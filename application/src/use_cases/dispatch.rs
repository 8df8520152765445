//! Dispatch use case.
//!
//! Takes one [`ToolCall`] from the host framework through lookup, argument
//! validation, configuration resolution and exactly one external action
//! (a process run or a template render).
//!
//! ```text
//! lookup ─▶ validate ─▶ resolve config ─┬─▶ build argv ─▶ scan ─▶ CommandExecutor::run
//!                                       └─▶ WorkflowSpec ─────▶ WorkflowRenderer::render
//! ```
//!
//! Every failure before the external action returns without side effects.

use crate::ports::command_executor::CommandExecutor;
use crate::ports::invocation_logger::{InvocationEvent, InvocationLogger, NoInvocationLogger};
use crate::ports::progress::{DispatchProgress, NoDispatchProgress};
use crate::ports::workflow_renderer::WorkflowRenderer;
use devops_domain::devops::redact::{redact_argv, redact_value};
use devops_domain::{
    CommandBuilder, ConfigOverrides, DefaultToolValidator, DevOpsConfig, InvocationResult,
    InvocationState, ResolvedConfig, SafetyScanner, ToolCall, ToolCatalog, ToolError, ToolKind,
    ToolResponse, ToolValidator, WorkflowSpec, overrides_from_call,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Use case for dispatching tool calls.
///
/// Holds only shared, read-only state, so one dispatcher serves any number of
/// concurrent calls.
pub struct CommandDispatcher {
    catalog: Arc<ToolCatalog>,
    config: Arc<DevOpsConfig>,
    executor: Arc<dyn CommandExecutor>,
    renderer: Arc<dyn WorkflowRenderer>,
    /// Applied under each call's own overrides (CLI flags)
    default_overrides: ConfigOverrides,
    validator: DefaultToolValidator,
    builder: CommandBuilder,
    scanner: SafetyScanner,
    invocation_logger: Arc<dyn InvocationLogger>,
    progress: Arc<dyn DispatchProgress>,
}

impl Clone for CommandDispatcher {
    fn clone(&self) -> Self {
        Self {
            catalog: self.catalog.clone(),
            config: self.config.clone(),
            executor: self.executor.clone(),
            renderer: self.renderer.clone(),
            default_overrides: self.default_overrides.clone(),
            validator: self.validator.clone(),
            builder: self.builder,
            scanner: self.scanner.clone(),
            invocation_logger: self.invocation_logger.clone(),
            progress: self.progress.clone(),
        }
    }
}

impl CommandDispatcher {
    pub fn new(
        catalog: Arc<ToolCatalog>,
        config: Arc<DevOpsConfig>,
        executor: Arc<dyn CommandExecutor>,
        renderer: Arc<dyn WorkflowRenderer>,
    ) -> Self {
        let scanner = SafetyScanner::new(&config);
        Self {
            catalog,
            config,
            executor,
            renderer,
            default_overrides: ConfigOverrides::default(),
            validator: DefaultToolValidator,
            builder: CommandBuilder,
            scanner,
            invocation_logger: Arc::new(NoInvocationLogger),
            progress: Arc::new(NoDispatchProgress),
        }
    }

    /// Overrides applied to every call beneath the call's own arguments.
    pub fn with_default_overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.default_overrides = overrides;
        self
    }

    /// Create with an invocation (audit) logger.
    pub fn with_invocation_logger(mut self, logger: Arc<dyn InvocationLogger>) -> Self {
        self.invocation_logger = logger;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn DispatchProgress>) -> Self {
        self.progress = progress;
        self
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// Configuration a call would run with, without dispatching it
    pub fn resolve_for(&self, call: &ToolCall) -> ResolvedConfig {
        self.config
            .resolve(&overrides_from_call(call).or(self.default_overrides.clone()))
    }

    /// Dispatch a call and wrap the outcome in the wire response.
    pub async fn dispatch_response(&self, call: &ToolCall) -> ToolResponse {
        ToolResponse::from(self.dispatch(call).await)
    }

    /// Dispatch one tool call.
    ///
    /// Performs at most one external action. Errors are values: the
    /// dispatcher itself stays usable after any failure.
    pub async fn dispatch(&self, call: &ToolCall) -> Result<InvocationResult, ToolError> {
        let tool = call.tool_name.as_str();
        self.transition(tool, InvocationState::Received);

        let started = Instant::now();
        let outcome = self.run(call).await;

        match &outcome {
            Ok(result) => {
                info!(
                    "{} completed in {}ms{}",
                    tool,
                    started.elapsed().as_millis(),
                    if result.warnings.is_empty() {
                        String::new()
                    } else {
                        format!(" ({} safety findings)", result.warnings.len())
                    }
                );
                self.transition(tool, InvocationState::Completed);
            }
            Err(e) => {
                warn!("{} failed [{}]: {}", tool, e.code(), e);
                self.transition(tool, InvocationState::Failed);
            }
        }

        self.log_invocation(call, &outcome);
        outcome
    }

    async fn run(&self, call: &ToolCall) -> Result<InvocationResult, ToolError> {
        let definition = self.catalog.lookup(&call.tool_name)?;
        self.validator.validate(call, definition)?;
        self.transition(&call.tool_name, InvocationState::Validated);

        let resolved = self.resolve_for(call);
        debug!(
            "{}: namespace={} cloud_provider={} registry={}",
            call.tool_name,
            resolved.k8s_namespace,
            resolved.cloud_provider,
            resolved.docker_registry.as_deref().unwrap_or("-")
        );

        match definition.kind {
            ToolKind::SpawnProcess => self.execute(call, &resolved).await,
            ToolKind::RenderTemplate => self.generate(call, &resolved),
        }
    }

    async fn execute(
        &self,
        call: &ToolCall,
        resolved: &ResolvedConfig,
    ) -> Result<InvocationResult, ToolError> {
        let tool = call.tool_name.as_str();
        let command = self.builder.build(call, resolved)?;

        let warnings = self.scanner.scan(tool, &command);
        for finding in &warnings {
            warn!("{} [{}] {}: {}", tool, finding.level, finding.rule, finding.message);
            self.progress.on_finding(tool, finding);
        }

        self.transition(tool, InvocationState::Executing);
        let shown = redact_argv(&command.to_argv()).join(" ");
        debug!("{} via {}: {}", tool, self.executor.name(), shown);
        self.progress.on_command(tool, &shown);

        let started = Instant::now();
        let output = self.executor.run(&command).await.map_err(|e| {
            ToolError::ExternalProcessFailure {
                program: command.program.clone(),
                exit_code: None,
                stdout: String::new(),
                stderr: e.to_string(),
            }
        })?;
        let duration_ms = started.elapsed().as_millis() as u64;

        if !output.is_success() {
            return Err(ToolError::ExternalProcessFailure {
                program: command.program,
                exit_code: output.exit_code,
                stdout: output.stdout,
                stderr: output.stderr,
            });
        }

        Ok(
            InvocationResult::process(tool, command.to_argv(), output.stdout, output.stderr)
                .with_warnings(warnings)
                .with_duration(duration_ms),
        )
    }

    fn generate(
        &self,
        call: &ToolCall,
        resolved: &ResolvedConfig,
    ) -> Result<InvocationResult, ToolError> {
        let spec = WorkflowSpec::from_call(call, resolved)?;
        self.transition(&call.tool_name, InvocationState::Generating);

        let started = Instant::now();
        let artifact = self
            .renderer
            .render(&spec)
            .map_err(|e| ToolError::generation_failed(e.to_string()))?;

        Ok(InvocationResult::generated(&call.tool_name, artifact)
            .with_duration(started.elapsed().as_millis() as u64))
    }

    fn transition(&self, tool: &str, state: InvocationState) {
        debug!("{} -> {}", tool, state);
        self.progress.on_state(tool, state);
    }

    fn log_invocation(&self, call: &ToolCall, outcome: &Result<InvocationResult, ToolError>) {
        let arguments = serde_json::to_value(&call.arguments)
            .map(|v| redact_value(&v))
            .unwrap_or_default();

        let payload = match outcome {
            Ok(result) => json!({
                "tool": call.tool_name,
                "arguments": arguments,
                "status": "completed",
                "exit_code": result.exit_code,
                "command": result.command.as_deref().map(redact_argv),
                "generated_bytes": result.generated_artifact.as_ref().map(String::len),
                "warnings": result.warnings,
                "duration_ms": result.duration_ms,
            }),
            Err(error) => json!({
                "tool": call.tool_name,
                "arguments": arguments,
                "status": "failed",
                "code": error.code(),
                "message": devops_domain::devops::redact::redact_text(&error.to_string()),
            }),
        };

        self.invocation_logger
            .log(InvocationEvent::new("tool_invocation", payload));
    }
}
